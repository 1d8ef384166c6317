use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::diagnosis::router::{diagnosis_router, result_payload_handler};

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

async fn post_evaluate(answers: Value) -> Response {
    diagnosis_router(Arc::new(engine()))
        .oneshot(
            axum::http::Request::post("/api/v1/diagnosis/evaluate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({ "answers": answers })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("router responds")
}

#[tokio::test]
async fn questions_endpoint_lists_the_catalog() {
    let response = diagnosis_router(Arc::new(engine()))
        .oneshot(
            axum::http::Request::get("/api/v1/diagnosis/questions")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["policy"], "dual_threshold");
    let questions = body["questions"].as_array().expect("question list");
    assert_eq!(questions.len(), 15);
    assert_eq!(questions[0]["number"], 1);
    assert_eq!(questions[0]["can_go_back"], false);
    assert_eq!(questions[14]["question_id"], 15);
    assert!(questions[0]["options"][0].get("score").is_none());
}

#[tokio::test]
async fn evaluate_endpoint_returns_outcome_and_payload() {
    let response = post_evaluate(json!(answers(LEGAL_PATH))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["outcome"]["category"], "C");
    assert_eq!(body["outcome"]["risk"], 45);
    assert_eq!(body["outcome"]["totals"]["L"], 14);
    assert_eq!(body["result"]["payload"]["cta_text"], "Book a legal consultation");
    assert_eq!(body["loading"]["steps"][1]["at"], 500);
}

#[tokio::test]
async fn evaluate_endpoint_rejects_incomplete_answers() {
    let response = post_evaluate(json!(["A", "B"])).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("expected 15 answers"));
}

#[tokio::test]
async fn evaluate_endpoint_reports_unknown_options_as_json() {
    let response = post_evaluate(json!(["E"])).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(!body["error"].as_str().expect("error message").is_empty());
}

#[tokio::test]
async fn evaluate_endpoint_reports_malformed_bodies_as_json() {
    let response = diagnosis_router(Arc::new(engine()))
        .oneshot(
            axum::http::Request::post("/api/v1/diagnosis/evaluate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from("{\"answers\": "))
                .unwrap(),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn result_payload_handler_validates_the_category() {
    let engine = Arc::new(engine());

    let ok = result_payload_handler(State(engine.clone()), Path("e".to_string())).await;
    assert_eq!(ok.status(), StatusCode::OK);
    let body = json_body(ok).await;
    assert!(body["label"].as_str().expect("label").starts_with("TYPE E"));

    let bad = result_payload_handler(State(engine), Path("Z".to_string())).await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn result_payload_handler_reports_missing_payloads() {
    let engine = Arc::new(empty_results_engine());

    let response = result_payload_handler(State(engine), Path("A".to_string())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
