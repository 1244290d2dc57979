//! Question source backed by the built-in generators.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::instrument;

use crate::builder::draw_questions;
use crate::model::Question;
use crate::traits::{QuestionRequest, QuestionSource};

/// Generates questions locally from closed-form templates.
pub struct TemplateSource {
    rng: Mutex<StdRng>,
}

impl TemplateSource {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic source; the same seed yields the same questions.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionSource for TemplateSource {
    fn name(&self) -> &str {
        "templates"
    }

    fn origin_message(&self) -> &str {
        "Session generated from practice templates."
    }

    #[instrument(skip(self, request), fields(topic = %request.topic, count = request.count))]
    async fn generate(&self, request: &QuestionRequest) -> anyhow::Result<Vec<Question>> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow::anyhow!("random source lock poisoned"))?;
        Ok(draw_questions(
            &request.topic,
            request.difficulty,
            request.count,
            &mut *rng,
        ))
    }
}
