//! Configuration loading and question source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mathdrill_core::template::TemplateSource;
use mathdrill_core::traits::QuestionSource;

use crate::openai::OpenAiQuestionSource;

/// Where session questions come from.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Built-in closed-form templates.
    #[default]
    Templates,
    OpenAI {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceConfig::Templates => f.write_str("Templates"),
            SourceConfig::OpenAI {
                api_key: _,
                base_url,
                model,
                timeout_secs,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("model", model)
                .field("timeout_secs", timeout_secs)
                .finish(),
        }
    }
}

/// Top-level mathdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MathdrillConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Seed for template question draws; unset means seeded from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub source: SourceConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5000
}

impl Default for MathdrillConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            seed: None,
            source: SourceConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Templates => SourceConfig::Templates,
        SourceConfig::OpenAI {
            api_key,
            base_url,
            model,
            timeout_secs,
        } => SourceConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            model: model.as_ref().map(|m| resolve_env_vars(m)),
            timeout_secs: *timeout_secs,
        },
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `mathdrill.toml` in the current directory
/// 2. `~/.config/mathdrill/config.toml`
///
/// Environment variable overrides: `MATHDRILL_OPENAI_KEY`, `MATHDRILL_PORT`.
pub fn load_config_from(path: Option<&Path>) -> Result<MathdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mathdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MathdrillConfig::default(),
    };

    if let Ok(key) = std::env::var("MATHDRILL_OPENAI_KEY") {
        if let SourceConfig::OpenAI { api_key, .. } = &mut config.source {
            *api_key = key;
        }
    }
    if let Ok(port) = std::env::var("MATHDRILL_PORT") {
        config.port = port
            .parse()
            .with_context(|| format!("MATHDRILL_PORT is not a valid port: {port}"))?;
    }

    config.source = resolve_source_config(&config.source);
    Ok(config)
}

/// Parse a TOML configuration string.
pub fn parse_config(content: &str) -> Result<MathdrillConfig> {
    Ok(toml::from_str::<MathdrillConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mathdrill"))
}

/// Create the configured question source.
///
/// `seed` overrides the config's seed for template sources.
pub fn create_source(config: &MathdrillConfig, seed: Option<u64>) -> Result<Arc<dyn QuestionSource>> {
    match &config.source {
        SourceConfig::Templates => {
            let source = match seed.or(config.seed) {
                Some(seed) => TemplateSource::with_seed(seed),
                None => TemplateSource::new(),
            };
            Ok(Arc::new(source))
        }
        SourceConfig::OpenAI {
            api_key,
            base_url,
            model,
            timeout_secs,
        } => Ok(Arc::new(OpenAiQuestionSource::new(
            api_key,
            base_url.clone(),
            model.clone(),
            *timeout_secs,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_MATHDRILL_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_MATHDRILL_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_MATHDRILL_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${_MATHDRILL_UNSET_VAR}"), "");
        assert_eq!(resolve_env_vars("no vars ${"), "no vars ${");
        std::env::remove_var("_MATHDRILL_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = MathdrillConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert!(config.seed.is_none());
        assert!(matches!(config.source, SourceConfig::Templates));
    }

    #[test]
    fn parse_openai_source() {
        let config = parse_config(
            r#"
port = 8080
seed = 7

[source]
type = "openai"
api_key = "sk-test"
model = "gpt-4o"
timeout_secs = 10
"#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.seed, Some(7));
        match &config.source {
            SourceConfig::OpenAI {
                api_key,
                model,
                timeout_secs,
                base_url,
            } => {
                assert_eq!(api_key, "sk-test");
                assert_eq!(model.as_deref(), Some("gpt-4o"));
                assert_eq!(*timeout_secs, Some(10));
                assert!(base_url.is_none());
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn debug_masks_api_key() {
        let source = SourceConfig::OpenAI {
            api_key: "sk-secret".into(),
            base_url: None,
            model: None,
            timeout_secs: None,
        };
        let debug = format!("{source:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mathdrill.toml");
        std::fs::write(&path, "host = \"0.0.0.0\"\n[source]\ntype = \"templates\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn load_missing_file_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/mathdrill.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn create_template_source() {
        let source = create_source(&MathdrillConfig::default(), Some(1)).unwrap();
        assert_eq!(source.name(), "templates");
    }

    #[test]
    fn create_openai_source() {
        let config = MathdrillConfig {
            source: SourceConfig::OpenAI {
                api_key: "k".into(),
                base_url: Some("http://localhost:1".into()),
                model: None,
                timeout_secs: None,
            },
            ..Default::default()
        };
        let source = create_source(&config, None).unwrap();
        assert_eq!(source.name(), "openai");
    }
}
