//! HTTP API tests against a server bound to an ephemeral port.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::net::TcpListener;

use mathdrill_core::model::{AnswerKind, Question};
use mathdrill_core::store::InMemorySessionStore;
use mathdrill_core::template::TemplateSource;
use mathdrill_core::traits::{QuestionSource, SessionStore};
use mathdrill_core::QuizService;
use mathdrill_providers::mock::MockQuestionSource;

struct TestServer {
    base: String,
    store: Arc<InMemorySessionStore>,
    client: reqwest::Client,
}

impl TestServer {
    async fn start(source: Arc<dyn QuestionSource>) -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let service = QuizService::new(source, store.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(mathdrill_server::serve_on(listener, service));
        Self {
            base: format!("http://{addr}"),
            store,
            client: reqwest::Client::new(),
        }
    }

    async fn templates() -> Self {
        Self::start(Arc::new(TemplateSource::with_seed(2024))).await
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let response = self
            .client
            .post(format!("{}{path}", self.base))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    async fn answers_for(&self, session_id: &str) -> Vec<String> {
        self.store
            .get(session_id)
            .await
            .unwrap()
            .unwrap()
            .questions
            .into_iter()
            .map(|q| q.answer)
            .collect()
    }
}

#[tokio::test]
async fn geometry_session_full_flow() {
    let server = TestServer::templates().await;

    let (status, session) = server
        .post("/api/sessions", json!({"grade": 9, "topic": "geometry"}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(session["num_questions"], 12);
    assert_eq!(session["difficulty"], "hard");
    assert_eq!(session["student_answers"], json!([]));
    assert!(session["score"].is_null());
    assert!(session["feedback"].is_null());
    assert_eq!(session["message"], "Session generated from practice templates.");

    let questions = session["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 12);
    for q in questions {
        let category = q["category"].as_str().unwrap();
        assert!(category == "geometry" || category == "fractions");
        assert!(q.get("answer").is_none(), "answer leaked: {q}");
    }

    let id = session["id"].as_str().unwrap();
    let answers = server.answers_for(id).await;
    let (status, result) = server
        .post(
            &format!("/api/sessions/{id}/submit"),
            json!({ "student_answers": answers }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(result["session_id"], id);
    assert_eq!(result["score"], 100.0);
    assert_eq!(result["feedback"], "Great work!");
    assert_eq!(result["correctness"].as_array().unwrap().len(), 12);

    let (status, analysis) = server
        .post("/api/analysis", json!({ "session_id": id }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        analysis["weakness_summary"],
        "No major weaknesses detected. Keep challenging yourself!"
    );
}

#[tokio::test]
async fn defaults_apply_to_empty_body() {
    let server = TestServer::templates().await;
    let (status, session) = server.post("/api/sessions", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(session["grade"], 5);
    assert_eq!(session["topic"], "math");
    assert_eq!(session["difficulty"], "medium");
    assert_eq!(session["num_questions"], 10);
}

#[tokio::test]
async fn partial_submission_and_weakness() {
    let server = TestServer::start(Arc::new(MockQuestionSource::numbered("linear_equations"))).await;
    let (_, session) = server
        .post("/api/sessions", json!({"grade": 2, "topic": "algebra"}))
        .await;
    assert_eq!(session["num_questions"], 8);
    let id = session["id"].as_str().unwrap();

    // Mock questions expect n + 1; answer the first two, one of them wrong.
    let (status, result) = server
        .post(
            &format!("/api/sessions/{id}/submit"),
            json!({ "student_answers": [1, "5"] }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(result["score"], 12.5);
    assert_eq!(result["feedback"], "Keep practicing these skills.");
    let correctness = result["correctness"].as_array().unwrap();
    assert_eq!(correctness.len(), 2);
    assert_eq!(correctness[0]["correct"], true);
    assert_eq!(correctness[1]["correct"], false);
    assert_eq!(correctness[1]["expected"], "2");

    let (_, analysis) = server
        .post("/api/analysis", json!({ "session_id": id }))
        .await;
    assert_eq!(
        analysis["weakness_summary"],
        "Struggled with linear equations questions."
    );
}

fn fixed_question(id: &str, answer: &str, category: &str) -> Question {
    Question {
        id: id.into(),
        prompt: format!("Question {id}"),
        answer: answer.into(),
        category: category.into(),
        answer_type: AnswerKind::Numeric,
    }
}

#[tokio::test]
async fn weakness_tie_goes_to_first_category() {
    let source = MockQuestionSource::with_fixed_questions(vec![
        fixed_question("q1", "1", "division"),
        fixed_question("q2", "2", "geometry"),
        fixed_question("q3", "3", "geometry"),
        fixed_question("q4", "4", "division"),
    ]);
    let server = TestServer::start(Arc::new(source)).await;
    let (_, session) = server.post("/api/sessions", json!({})).await;
    assert_eq!(session["num_questions"], 4);
    assert_eq!(session["message"], "Session generated by the mock source.");
    let id = session["id"].as_str().unwrap();

    let (_, result) = server
        .post(
            &format!("/api/sessions/{id}/submit"),
            json!({ "student_answers": ["0", "0", "0", "0"] }),
        )
        .await;
    assert_eq!(result["score"], 0.0);

    let (_, analysis) = server
        .post("/api/analysis", json!({ "session_id": id }))
        .await;
    assert_eq!(
        analysis["weakness_summary"],
        "Struggled with division questions."
    );
}

#[tokio::test]
async fn unknown_session_is_404() {
    let server = TestServer::templates().await;

    let (status, body) = server
        .post("/api/sessions/nope/submit", json!({"student_answers": []}))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Session not found");

    let (status, _) = server
        .post("/api/analysis", json!({"session_id": "nope"}))
        .await;
    assert_eq!(status, 404);

    let (status, _) = server.post("/api/analysis", json!({})).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn generation_failure_is_502() {
    let server = TestServer::start(Arc::new(MockQuestionSource::failing("model offline"))).await;
    let (status, body) = server.post("/api/sessions", json!({"grade": 4})).await;
    assert_eq!(status, 502);
    assert_eq!(body["error"], "Unable to generate questions: model offline");
    assert!(server.store.is_empty().await);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let server = TestServer::templates().await;
    let response = server
        .client
        .post(format!("{}/api/sessions", server.base))
        .body("{grade: five")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn index_page_is_served() {
    let server = TestServer::templates().await;
    let response = server.client.get(&server.base).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("<title>mathdrill</title>"));
}
