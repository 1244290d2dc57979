//! Request handlers.
//!
//! Bodies are parsed leniently: missing or mistyped fields fall back to
//! defaults instead of rejecting the request. Only a body that is not JSON
//! at all is refused.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use serde_json::{Map, Value};

use mathdrill_core::analysis::{Analysis, Submission};
use mathdrill_core::builder::{SessionSpec, DEFAULT_GRADE, DEFAULT_TOPIC};
use mathdrill_core::model::{Difficulty, PublicSession};

use crate::error::ApiError;
use crate::AppState;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PublicSession>, ApiError> {
    let fields = parse_body(&body)?;
    let spec = session_spec(&fields);
    let session = state.service.create_session(spec).await?;
    Ok(Json(session))
}

pub async fn submit_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Bytes,
) -> Result<Json<Submission>, ApiError> {
    let fields = parse_body(&body)?;
    let answers = student_answers(&fields);
    let submission = state.service.submit(&session_id, answers).await?;
    Ok(Json(submission))
}

pub async fn analyze_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Analysis>, ApiError> {
    let fields = parse_body(&body)?;
    let session_id = match fields.get("session_id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(ApiError::NotFound),
    };
    let analysis = state.service.analyze(&session_id).await?;
    Ok(Json(analysis))
}

/// Parse a JSON object body. An empty body or `null` counts as `{}`.
fn parse_body(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(_) => Err(ApiError::BadRequest(
            "request body must be a JSON object".into(),
        )),
        Err(e) => Err(ApiError::BadRequest(format!("invalid JSON body: {e}"))),
    }
}

fn session_spec(fields: &Map<String, Value>) -> SessionSpec {
    let grade = match fields.get("grade") {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .unwrap_or(DEFAULT_GRADE);

    let topic = match fields.get("topic") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => DEFAULT_TOPIC.to_string(),
    };

    let difficulty = match fields.get("difficulty") {
        Some(Value::String(s)) => s.parse::<Difficulty>().ok(),
        _ => None,
    };

    SessionSpec::new(grade, topic, difficulty)
}

fn student_answers(fields: &Map<String, Value>) -> Vec<String> {
    match fields.get("student_answers") {
        Some(Value::Array(items)) => items.iter().map(answer_text).collect(),
        _ => Vec::new(),
    }
}

fn answer_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
