//! Mock question source for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use mathdrill_core::model::{AnswerKind, Question};
use mathdrill_core::traits::{QuestionRequest, QuestionSource};

/// A question source that returns canned questions or a canned failure.
///
/// With [`MockQuestionSource::numbered`], every question asks for `n + 1`
/// and expects that number, so the correct answers are easy to predict.
pub struct MockQuestionSource {
    outcome: Outcome,
    call_count: AtomicU32,
    last_request: Mutex<Option<QuestionRequest>>,
}

enum Outcome {
    Numbered { category: String },
    Fixed(Vec<Question>),
    Fail(String),
}

impl MockQuestionSource {
    /// Questions "What is n + 1?" answered by `n + 1`, all tagged `category`.
    pub fn numbered(category: &str) -> Self {
        Self::with_outcome(Outcome::Numbered {
            category: category.to_string(),
        })
    }

    /// Always return these questions, whatever count was asked for.
    pub fn with_fixed_questions(questions: Vec<Question>) -> Self {
        Self::with_outcome(Outcome::Fixed(questions))
    }

    /// Always fail with this message.
    pub fn failing(message: &str) -> Self {
        Self::with_outcome(Outcome::Fail(message.to_string()))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this source.
    pub fn last_request(&self) -> Option<QuestionRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl QuestionSource for MockQuestionSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn origin_message(&self) -> &str {
        "Session generated by the mock source."
    }

    async fn generate(&self, request: &QuestionRequest) -> anyhow::Result<Vec<Question>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.outcome {
            Outcome::Numbered { category } => Ok((0..request.count)
                .map(|n| Question {
                    id: format!("mock-{n}"),
                    prompt: format!("What is {n} + 1?"),
                    answer: (n + 1).to_string(),
                    category: category.clone(),
                    answer_type: AnswerKind::Numeric,
                })
                .collect()),
            Outcome::Fixed(questions) => Ok(questions.clone()),
            Outcome::Fail(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}
