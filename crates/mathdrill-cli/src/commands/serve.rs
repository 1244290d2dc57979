//! The `mathdrill serve` command.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use mathdrill_core::store::InMemorySessionStore;
use mathdrill_core::traits::QuestionSource;
use mathdrill_core::QuizService;
use mathdrill_providers::config::load_config_from;
use mathdrill_providers::create_source;

pub async fn execute(
    host: Option<String>,
    port: Option<u16>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let host = host.unwrap_or_else(|| config.host.clone());
    let ip: IpAddr = host
        .parse()
        .with_context(|| format!("invalid host address: {host}"))?;
    let addr = SocketAddr::new(ip, port.unwrap_or(config.port));

    let source = create_source(&config, seed)?;
    tracing::info!(source = source.name(), "question source ready");
    let service = QuizService::new(source, Arc::new(InMemorySessionStore::new()));

    mathdrill_server::serve(addr, service).await
}
