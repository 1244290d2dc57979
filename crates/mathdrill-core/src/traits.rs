//! Trait seams: where questions come from and where sessions live.
//!
//! `QuestionSource` is implemented here by [`crate::template::TemplateSource`]
//! and by the remote sources in `mathdrill-providers`. `SessionStore` is
//! implemented by [`crate::store::InMemorySessionStore`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, PracticeSession, Question, SessionStatus};

// ---------------------------------------------------------------------------
// Question source trait
// ---------------------------------------------------------------------------

/// Anything that can produce a batch of practice questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Short source name (e.g. "templates").
    fn name(&self) -> &str;

    /// Line returned to the client alongside a freshly created session.
    fn origin_message(&self) -> &str;

    /// Produce exactly `request.count` questions, or fail as a whole.
    async fn generate(&self, request: &QuestionRequest) -> anyhow::Result<Vec<Question>>;
}

/// Parameters for one batch of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub grade: i64,
    pub topic: String,
    pub difficulty: Difficulty,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Session store trait
// ---------------------------------------------------------------------------

/// Storage for practice sessions, keyed by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: &str) -> anyhow::Result<Option<PracticeSession>>;

    /// Insert or replace a session. Concurrent writers race; the last one wins.
    async fn put(&self, session: PracticeSession) -> anyhow::Result<()>;

    /// Move a session from `from` to `to` without touching anything else.
    ///
    /// Returns `false` if the session is missing or not in `from`.
    async fn transition(
        &self,
        id: &str,
        from: SessionStatus,
        to: SessionStatus,
    ) -> anyhow::Result<bool>;

    /// Remove a session, returning whether it existed.
    async fn delete(&self, id: &str) -> anyhow::Result<bool>;
}
