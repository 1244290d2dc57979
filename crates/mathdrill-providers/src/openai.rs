//! OpenAI-compatible question source.
//!
//! Sends one chat-completion request asking for a JSON array of questions
//! and validates the reply as a whole. There is no retry: any failure is
//! returned to the caller as-is.

use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mathdrill_core::batch::parse_question_batch;
use mathdrill_core::model::Question;
use mathdrill_core::traits::{QuestionRequest, QuestionSource};

use crate::error::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TEMPERATURE: f64 = 0.5;
const SYSTEM_PROMPT: &str = "You are a tutor that outputs strict JSON only.";
const SCHEMA_DESCRIPTION: &str = "Each question must be a JSON object with keys: \
    id (string), question_text (string), answer (string or number), \
    answer_type (numeric | short text | multiple choice), \
    skills_tag (string, e.g., linear-equations).";

/// Question source backed by an OpenAI-compatible chat completions API.
pub struct OpenAiQuestionSource {
    api_key: String,
    base_url: String,
    model: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenAiQuestionSource {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        model: Option<String>,
        timeout_secs: Option<u64>,
    ) -> anyhow::Result<Self> {
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_secs,
            client,
        })
    }
}

/// The user prompt describing the batch we want back.
pub fn build_prompt(request: &QuestionRequest) -> String {
    format!(
        "Generate {count} math practice questions.\n\
         Grade: {grade}\n\
         Topic: {topic}\n\
         Difficulty: {difficulty}\n\
         Target time <= 20 minutes.\n\
         {SCHEMA_DESCRIPTION}\n\
         Return a JSON array only. No extra text.",
        count = request.count,
        grade = request.grade,
        topic = request.topic,
        difficulty = request.difficulty,
    )
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    temperature: f64,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl QuestionSource for OpenAiQuestionSource {
    fn name(&self) -> &str {
        "openai"
    }

    fn origin_message(&self) -> &str {
        "Session generated using a structured model prompt."
    }

    #[instrument(skip(self, request), fields(model = %self.model, count = request.count))]
    async fn generate(&self, request: &QuestionRequest) -> anyhow::Result<Vec<Question>> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey("OpenAI").into());
        }
        let start = Instant::now();

        let body = ChatRequest {
            model: self.model.clone(),
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_prompt(request),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationFailed(body).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let api_response: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::ApiError {
                    status: 0,
                    message: format!("failed to parse response: {e}"),
                })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse)?;

        let questions =
            parse_question_batch(&content, request.count).map_err(ProviderError::from)?;

        tracing::debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            "received question batch"
        );
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathdrill_core::model::Difficulty;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(count: usize) -> QuestionRequest {
        QuestionRequest {
            grade: 7,
            topic: "ratios".into(),
            difficulty: Difficulty::Hard,
            count,
        }
    }

    fn questions_json(count: usize) -> String {
        let items: Vec<_> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "id": format!("q{i}"),
                    "question_text": format!("What is {i} + 1?"),
                    "answer": i + 1,
                    "answer_type": "numeric",
                    "skills_tag": "addition"
                })
            })
            .collect();
        serde_json::Value::Array(items).to_string()
    }

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"content": content, "role": "assistant"}, "index": 0}],
            "model": "gpt-4o-mini"
        })
    }

    #[test]
    fn prompt_describes_the_batch() {
        let prompt = build_prompt(&request(12));
        assert!(prompt.starts_with("Generate 12 math practice questions."));
        assert!(prompt.contains("Grade: 7"));
        assert!(prompt.contains("Topic: ratios"));
        assert!(prompt.contains("Difficulty: hard"));
        assert!(prompt.contains("skills_tag"));
        assert!(prompt.ends_with("Return a JSON array only. No extra text."));
    }

    #[tokio::test]
    async fn successful_generation() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "temperature": 0.5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(&questions_json(3))))
            .expect(1)
            .mount(&server)
            .await;

        let source = OpenAiQuestionSource::new("test-key", Some(server.uri()), None, None).unwrap();
        let questions = source.generate(&request(3)).await.unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[2].answer, "3");
        assert_eq!(questions[0].category, "addition");
    }

    #[tokio::test]
    async fn wrong_count_rejects_batch() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(&questions_json(2))))
            .mount(&server)
            .await;

        let source = OpenAiQuestionSource::new("key", Some(server.uri()), None, None).unwrap();
        let err = source.generate(&request(10)).await.unwrap_err();
        assert!(
            err.to_string().contains("expected 10 questions, received 2"),
            "got: {err}"
        );
    }

    #[tokio::test]
    async fn prose_reply_rejects_batch() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("Sure! Here you go.")),
            )
            .mount(&server)
            .await;

        let source = OpenAiQuestionSource::new("key", Some(server.uri()), None, None).unwrap();
        let err = source.generate(&request(1)).await.unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[tokio::test]
    async fn error_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .expect(1)
            .mount(&server)
            .await;

        let source = OpenAiQuestionSource::new("key", Some(server.uri()), None, None).unwrap();
        let err = source.generate(&request(1)).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn unauthorized_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let source = OpenAiQuestionSource::new("key", Some(server.uri()), None, None).unwrap();
        let err = source.generate(&request(1)).await.unwrap_err();
        assert!(err.to_string().contains("authentication failed"));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let source = OpenAiQuestionSource::new("", Some(server.uri()), None, None).unwrap();
        let err = source.generate(&request(1)).await.unwrap_err();
        assert!(err.to_string().contains("API key is not configured"));
    }
}
