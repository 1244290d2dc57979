//! Strict validation of externally sourced question batches.
//!
//! A batch is accepted only if every entry is well formed. The first defect
//! rejects the whole batch.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::BatchError;
use crate::model::{AnswerKind, Question};

/// Parse and validate a raw batch of questions.
///
/// `raw` must be a JSON array (optionally inside a markdown code fence) of
/// exactly `expected_count` objects with keys `id`, `question_text`,
/// `answer`, `answer_type`, and `skills_tag`.
pub fn parse_question_batch(raw: &str, expected_count: usize) -> Result<Vec<Question>, BatchError> {
    let body = strip_code_fence(raw);
    let value: Value =
        serde_json::from_str(body).map_err(|e| BatchError::InvalidJson(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(BatchError::NotAnArray);
    };
    if items.len() != expected_count {
        return Err(BatchError::WrongCount {
            expected: expected_count,
            actual: items.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut questions = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let question = parse_entry(index, item)?;
        if !seen.insert(question.id.clone()) {
            return Err(BatchError::DuplicateId {
                index,
                id: question.id,
            });
        }
        questions.push(question);
    }
    Ok(questions)
}

fn parse_entry(index: usize, item: &Value) -> Result<Question, BatchError> {
    let Value::Object(fields) = item else {
        return Err(BatchError::InvalidEntry {
            index,
            reason: "entry is not an object".into(),
        });
    };

    let text_field = |key: &str| -> Result<String, BatchError> {
        match fields.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            Some(Value::String(_)) => Err(BatchError::InvalidEntry {
                index,
                reason: format!("`{key}` is empty"),
            }),
            Some(_) => Err(BatchError::InvalidEntry {
                index,
                reason: format!("`{key}` is not a string"),
            }),
            None => Err(BatchError::InvalidEntry {
                index,
                reason: format!("missing `{key}`"),
            }),
        }
    };

    let id = text_field("id")?;
    let prompt = text_field("question_text")?;
    let category = text_field("skills_tag")?;
    let answer_type: AnswerKind = text_field("answer_type")?
        .parse()
        .map_err(|reason| BatchError::InvalidEntry { index, reason })?;

    let answer = match fields.get("answer") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            return Err(BatchError::InvalidEntry {
                index,
                reason: "`answer` must be a non-empty string or a number".into(),
            })
        }
        None => {
            return Err(BatchError::InvalidEntry {
                index,
                reason: "missing `answer`".into(),
            })
        }
    };

    Ok(Question {
        id,
        prompt,
        answer,
        category,
        answer_type,
    })
}

/// Remove a surrounding markdown code fence, if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
