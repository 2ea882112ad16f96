use std::path::PathBuf;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use exam_service::{
    app,
    config::{AppState, EnvVars},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// The client is never used to reach a server in these tests.
async fn state(question_bank_path: &str, exam_question_count: usize) -> AppState {
    let mongodb_uri = "mongodb://localhost:27017/placement".to_string();
    let client = records::db::lazy_client(&mongodb_uri).await.unwrap();
    let db = records::db::database(&client, None).unwrap();

    AppState {
        db,
        env_vars: EnvVars {
            port: 0,
            mongodb_uri,
            mongodb_db: None,
            question_bank_paths: vec![PathBuf::from(question_bank_path)],
            exam_question_count,
            exam_tracks: vec!["Python Programming".to_string(), "Robotics".to_string()],
            exam_difficulties: vec![1, 2, 3],
            request_body_size_limit: 1024,
            request_timeout_in_ms: 5_000,
            sentry_dsn: None,
        },
    }
}

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/bank.json");

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn ping_is_ok() {
    let response = app(state(FIXTURE, 12).await)
        .oneshot(Request::get("/status/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn generate_questions_returns_bank_shape() {
    let response = app(state(FIXTURE, 12).await)
        .oneshot(
            Request::post("/api/generate-questions")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"seed": 7}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["seed"], 7);
    assert_eq!(body["partial"], false);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 12);
    for q in questions {
        assert!(q["ans_idx"].is_u64());
        assert!(q["justification"].is_string());
        assert!(q["question"].is_string());
    }
}

#[tokio::test]
async fn shortage_is_reported_as_json_error() {
    let response = app(state(FIXTURE, 40).await)
        .oneshot(
            Request::post("/api/generate-questions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Not enough questions to generate 40. Got 30.");
}

#[tokio::test]
async fn missing_bank_is_server_error() {
    let response = app(state("does/not/exist.json", 12).await)
        .oneshot(
            Request::post("/api/generate-questions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn save_without_student_email_is_bad_request() {
    let response = app(state(FIXTURE, 12).await)
        .oneshot(
            Request::post("/api/save-test-results")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"studentInfo": {"name": "Sam"}, "score": 3, "totalQuestions": 12}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Missing required student information");
}

#[tokio::test]
async fn mistyped_save_body_is_bad_request_json() {
    let response = app(state(FIXTURE, 12).await)
        .oneshot(
            Request::post("/api/save-test-results")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"studentInfo": {"name": "Sam", "email": "s@e.org"}, "score": "seven"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
}

#[tokio::test]
async fn save_accepts_results_page_question_shape() {
    // Parses, then fails student validation before any database call.
    let response = app(state(FIXTURE, 12).await)
        .oneshot(
            Request::post("/api/save-test-results")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "studentInfo": {"name": "Sam"},
                        "questions": [
                            {"question": "Q1", "options": ["a", "b"], "correctAnswer": 1, "justification": "j"}
                        ],
                        "selectedAnswers": [1]
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Missing required student information");
}
