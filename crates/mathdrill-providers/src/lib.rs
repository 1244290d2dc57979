//! mathdrill-providers: question sources and configuration.
//!
//! Implements the `QuestionSource` trait for OpenAI-compatible chat APIs,
//! provides a mock source for tests, and loads `mathdrill.toml`.

pub mod config;
pub mod error;
pub mod mock;
pub mod openai;

pub use config::{create_source, load_config_from, MathdrillConfig, SourceConfig};
pub use error::ProviderError;
