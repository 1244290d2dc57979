//! Core data model types for mathdrill.
//!
//! These are the types every other crate passes around: generated
//! questions, practice sessions, and the public views handed to clients.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single practice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Opaque unique identifier.
    pub id: String,
    /// Text shown to the student.
    pub prompt: String,
    /// Expected answer, compared through [`crate::matcher::matches`].
    pub answer: String,
    /// Skill tag (e.g. "fractions").
    pub category: String,
    /// How the answer is expected to be written.
    #[serde(default)]
    pub answer_type: AnswerKind,
}

/// How a question expects to be answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerKind {
    #[default]
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "short text")]
    ShortText,
    #[serde(rename = "multiple choice")]
    MultipleChoice,
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerKind::Numeric => write!(f, "numeric"),
            AnswerKind::ShortText => write!(f, "short text"),
            AnswerKind::MultipleChoice => write!(f, "multiple choice"),
        }
    }
}

impl FromStr for AnswerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "numeric" => Ok(AnswerKind::Numeric),
            "short text" | "short_text" => Ok(AnswerKind::ShortText),
            "multiple choice" | "multiple_choice" => Ok(AnswerKind::MultipleChoice),
            other => Err(format!("unknown answer type: {other}")),
        }
    }
}

/// Question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Default difficulty for a grade: up to 3 is easy, up to 5 medium, then hard.
    pub fn for_grade(grade: i64) -> Self {
        if grade <= 3 {
            Difficulty::Easy
        } else if grade <= 5 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }

    pub fn is_hard(self) -> bool {
        self == Difficulty::Hard
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Created,
    Submitted,
    Analyzed,
}

/// A generated practice session and the student's submission, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSession {
    pub id: String,
    pub grade: i64,
    pub topic: String,
    pub difficulty: Difficulty,
    /// Ordered; answers are matched by position.
    pub questions: Vec<Question>,
    #[serde(default)]
    pub student_answers: Vec<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl PracticeSession {
    pub fn num_questions(&self) -> usize {
        self.questions.len()
    }

    /// The client-facing view, with expected answers withheld.
    pub fn to_public(&self, message: impl Into<String>) -> PublicSession {
        PublicSession {
            id: self.id.clone(),
            grade: self.grade,
            topic: self.topic.clone(),
            difficulty: self.difficulty,
            num_questions: self.num_questions(),
            questions: self
                .questions
                .iter()
                .map(|q| PublicQuestion {
                    id: q.id.clone(),
                    prompt: q.prompt.clone(),
                    category: q.category.clone(),
                    answer_type: q.answer_type,
                })
                .collect(),
            student_answers: self.student_answers.clone(),
            score: self.score,
            feedback: self.feedback.clone(),
            message: message.into(),
        }
    }
}

/// A question as shown to the student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub prompt: String,
    pub category: String,
    pub answer_type: AnswerKind,
}

/// A session as returned from session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicSession {
    pub id: String,
    pub grade: i64,
    pub topic: String,
    pub difficulty: Difficulty,
    pub num_questions: usize,
    pub questions: Vec<PublicQuestion>,
    pub student_answers: Vec<String>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub message: String,
}
