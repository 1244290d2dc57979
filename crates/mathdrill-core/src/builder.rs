//! Session assembly: how many questions, which generators, and the record
//! that ties them together.

use chrono::Utc;
use rand::Rng;

use crate::generator::Generator;
use crate::model::{Difficulty, PracticeSession, Question, SessionStatus};

pub const DEFAULT_GRADE: i64 = 5;
pub const DEFAULT_TOPIC: &str = "math";

/// Number of questions in a session for a given grade.
pub fn question_count(grade: i64) -> usize {
    if grade >= 8 {
        12
    } else if grade <= 4 {
        8
    } else {
        10
    }
}

/// What a caller asked for, with defaults resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSpec {
    pub grade: i64,
    pub topic: String,
    pub difficulty: Difficulty,
}

impl SessionSpec {
    /// Resolve a request. Missing difficulty follows the grade.
    pub fn new(grade: i64, topic: impl Into<String>, difficulty: Option<Difficulty>) -> Self {
        Self {
            grade,
            topic: topic.into(),
            difficulty: difficulty.unwrap_or_else(|| Difficulty::for_grade(grade)),
        }
    }

    pub fn question_count(&self) -> usize {
        question_count(self.grade)
    }
}

impl Default for SessionSpec {
    fn default() -> Self {
        Self::new(DEFAULT_GRADE, DEFAULT_TOPIC, None)
    }
}

/// Draw `count` questions for `topic`, picking a generator uniformly per slot.
///
/// Generators are drawn with replacement, so categories repeat.
pub fn draw_questions<R: Rng>(
    topic: &str,
    difficulty: Difficulty,
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let candidates = Generator::for_topic(topic);
    let mut questions = Vec::with_capacity(count);
    for _ in 0..count {
        let generator = candidates[rng.random_range(0..candidates.len())];
        questions.push(generator.generate(difficulty, rng));
    }
    questions
}

/// Build a fresh, unsubmitted session record.
pub fn assemble(id: String, spec: &SessionSpec, questions: Vec<Question>) -> PracticeSession {
    PracticeSession {
        id,
        grade: spec.grade,
        topic: spec.topic.clone(),
        difficulty: spec.difficulty,
        questions,
        student_answers: Vec::new(),
        score: None,
        feedback: None,
        status: SessionStatus::Created,
        created_at: Utc::now(),
        submitted_at: None,
    }
}
