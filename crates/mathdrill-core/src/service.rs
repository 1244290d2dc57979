//! Quiz orchestration.
//!
//! Ties a question source and a session store together behind the three
//! operations clients use: create a session, submit answers, and ask for a
//! weakness summary.

use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::analysis::{score_answers, weakness_summary, Analysis, Submission};
use crate::builder::{assemble, SessionSpec};
use crate::error::QuizError;
use crate::model::{PracticeSession, PublicSession, SessionStatus};
use crate::traits::{QuestionRequest, QuestionSource, SessionStore};

/// The central quiz service.
#[derive(Clone)]
pub struct QuizService {
    source: Arc<dyn QuestionSource>,
    store: Arc<dyn SessionStore>,
}

impl QuizService {
    pub fn new(source: Arc<dyn QuestionSource>, store: Arc<dyn SessionStore>) -> Self {
        Self { source, store }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Generate a session for `spec` and register it in the store.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn create_session(&self, spec: SessionSpec) -> Result<PublicSession, QuizError> {
        let request = QuestionRequest {
            grade: spec.grade,
            topic: spec.topic.clone(),
            difficulty: spec.difficulty,
            count: spec.question_count(),
        };

        let questions = self.source.generate(&request).await.map_err(|e| {
            tracing::error!("question generation failed: {e:#}");
            QuizError::Generation(e)
        })?;

        let session = assemble(Uuid::new_v4().to_string(), &spec, questions);
        let public = session.to_public(self.source.origin_message());
        tracing::info!(
            session_id = %session.id,
            questions = session.num_questions(),
            difficulty = %session.difficulty,
            "session created"
        );
        self.store.put(session).await.map_err(QuizError::Store)?;
        Ok(public)
    }

    /// Score `answers` and record them on the session.
    #[instrument(skip(self, answers), fields(answers = answers.len()))]
    pub async fn submit(
        &self,
        session_id: &str,
        answers: Vec<String>,
    ) -> Result<Submission, QuizError> {
        let mut session = self.load(session_id).await?;

        let submission = score_answers(&session, &answers);
        session.student_answers = answers;
        session.score = Some(submission.score);
        session.feedback = Some(submission.feedback.clone());
        session.status = SessionStatus::Submitted;
        session.submitted_at = Some(Utc::now());

        tracing::info!(session_id, score = submission.score, "answers submitted");
        self.store.put(session).await.map_err(QuizError::Store)?;
        Ok(submission)
    }

    /// Summarise the category the student missed most often.
    #[instrument(skip(self))]
    pub async fn analyze(&self, session_id: &str) -> Result<Analysis, QuizError> {
        let session = self.load(session_id).await?;

        if session.status == SessionStatus::Created {
            tracing::warn!(session_id, "analysis requested before any answers were submitted");
        }
        let summary = weakness_summary(&session);

        // Only the status is written; answers may have been resubmitted since the read.
        if session.status == SessionStatus::Submitted {
            self.store
                .transition(session_id, SessionStatus::Submitted, SessionStatus::Analyzed)
                .await
                .map_err(QuizError::Store)?;
        }

        Ok(Analysis {
            session_id: session_id.to_string(),
            weakness_summary: summary,
        })
    }

    async fn load(&self, session_id: &str) -> Result<PracticeSession, QuizError> {
        match self.store.get(session_id).await.map_err(QuizError::Store)? {
            Some(session) => Ok(session),
            None => {
                tracing::warn!(session_id, "session not found");
                Err(QuizError::SessionNotFound(session_id.to_string()))
            }
        }
    }
}
