//! Placement test HTTP service.
//!
//! - `POST /api/generate-questions` samples a balanced exam from the bank
//! - `POST /api/save-test-results` scores and stores a submission
//! - `GET /api/admin/results` lists submissions for review
pub mod bank;
pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::{
    LatencyUnit,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::AppState;

pub fn app(app_state: AppState) -> Router {
    let request_timeout_in_ms = app_state.env_vars.request_timeout_in_ms;
    let request_body_size_limit = app_state.env_vars.request_body_size_limit;

    Router::new()
        .route("/status/ping", get(routes::get_status_ping))
        .route(
            "/api/generate-questions",
            post(routes::post_generate_questions),
        )
        .route(
            "/api/save-test-results",
            post(routes::post_save_test_results),
        )
        .route("/api/admin/results", get(routes::get_admin_results))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(request_timeout_in_ms),
        ))
        .layer(RequestBodyLimitLayer::new(request_body_size_limit))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                ),
        )
        .with_state(app_state)
}
