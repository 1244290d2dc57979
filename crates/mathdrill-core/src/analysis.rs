//! Scoring submissions and summarising weaknesses.

use serde::{Deserialize, Serialize};

use crate::matcher::matches;
use crate::model::PracticeSession;

pub const GREAT_WORK: &str = "Great work!";
pub const KEEP_PRACTICING: &str = "Keep practicing these skills.";
pub const NO_WEAKNESS: &str = "No major weaknesses detected. Keep challenging yourself!";

/// Minimum score that earns the positive feedback line.
pub const GREAT_WORK_THRESHOLD: f64 = 80.0;

/// Per-question outcome of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correctness {
    pub question_id: String,
    pub correct: bool,
    pub expected: String,
}

/// A scored submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub session_id: String,
    /// Percentage of all questions answered correctly, one decimal place.
    pub score: f64,
    /// One entry per answered question, in question order.
    pub correctness: Vec<Correctness>,
    pub feedback: String,
}

/// Weakness report for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub session_id: String,
    pub weakness_summary: String,
}

/// Grade `answers` against the session's questions.
///
/// Answers are zipped with questions, so extra or missing answers are
/// ignored, but the score is always out of the full question count.
pub fn score_answers(session: &PracticeSession, answers: &[String]) -> Submission {
    let correctness: Vec<Correctness> = session
        .questions
        .iter()
        .zip(answers)
        .map(|(question, answer)| Correctness {
            question_id: question.id.clone(),
            correct: matches(&question.answer, answer),
            expected: question.answer.clone(),
        })
        .collect();

    let correct = correctness.iter().filter(|c| c.correct).count();
    let score = percentage(correct, session.questions.len());

    Submission {
        session_id: session.id.clone(),
        score,
        correctness,
        feedback: feedback_for(score).to_string(),
    }
}

pub fn feedback_for(score: f64) -> &'static str {
    if score >= GREAT_WORK_THRESHOLD {
        GREAT_WORK
    } else {
        KEEP_PRACTICING
    }
}

fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = 100.0 * correct as f64 / total as f64;
    (raw * 10.0).round() / 10.0
}

/// Category with the most misses, ties going to the one seen first.
pub fn weakest_category(session: &PracticeSession) -> Option<String> {
    let mut misses: Vec<(&str, usize)> = Vec::new();
    for (question, answer) in session.questions.iter().zip(&session.student_answers) {
        if matches(&question.answer, answer) {
            continue;
        }
        match misses.iter_mut().find(|(c, _)| *c == question.category) {
            Some((_, count)) => *count += 1,
            None => misses.push((question.category.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (category, count) in misses {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category.to_string())
}

/// Human-readable weakness summary for a session.
pub fn weakness_summary(session: &PracticeSession) -> String {
    match weakest_category(session) {
        Some(category) => format!("Struggled with {} questions.", category.replace('_', " ")),
        None => NO_WEAKNESS.to_string(),
    }
}
