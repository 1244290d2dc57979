//! mathdrill-core: question generation, answer matching, and sessions.
//!
//! This crate defines the data model, the closed-form question generators,
//! the answer matcher, and the service that creates, scores, and analyses
//! practice sessions.

pub mod analysis;
pub mod batch;
pub mod builder;
pub mod error;
pub mod generator;
pub mod matcher;
pub mod model;
pub mod service;
pub mod store;
pub mod template;
pub mod traits;

pub use error::{BatchError, QuizError};
pub use matcher::matches;
pub use service::QuizService;
