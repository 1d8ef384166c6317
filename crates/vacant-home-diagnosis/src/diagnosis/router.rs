use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::{Discriminant, ResultCategory};
use super::engine::{DiagnosisEngine, ResultView};
use super::loading::LoadingSequence;
use super::session::{DiagnosisOutcome, QuestionView};

/// Router builder exposing the questionnaire and stateless evaluation endpoints.
pub fn diagnosis_router(engine: Arc<DiagnosisEngine>) -> Router {
    Router::new()
        .route("/api/v1/diagnosis/questions", get(questions_handler))
        .route("/api/v1/diagnosis/evaluate", post(evaluate_handler))
        .route(
            "/api/v1/diagnosis/results/:category",
            get(result_payload_handler),
        )
        .with_state(engine)
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub policy: String,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    /// One option value per question, in catalog order.
    pub answers: Vec<Discriminant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluateResponse {
    pub outcome: DiagnosisOutcome,
    /// `None` when the result catalog has no payload for the category.
    pub result: Option<ResultView>,
    pub loading: LoadingSequence,
}

pub(crate) async fn questions_handler(State(engine): State<Arc<DiagnosisEngine>>) -> Response {
    let catalog = engine.questions();
    let questions = catalog
        .questions()
        .iter()
        .enumerate()
        .map(|(cursor, question)| QuestionView::new(question, cursor, catalog.len()))
        .collect();

    let view = QuestionnaireView {
        policy: engine.policy().name.clone(),
        questions,
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn evaluate_handler(
    State(engine): State<Arc<DiagnosisEngine>>,
    request: Result<axum::Json<EvaluateRequest>, JsonRejection>,
) -> Response {
    let axum::Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            let payload = json!({
                "error": rejection.body_text(),
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match engine.evaluate(&request.answers) {
        Ok(outcome) => {
            let body = EvaluateResponse {
                outcome,
                result: engine.render(&outcome),
                loading: LoadingSequence::standard(),
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn result_payload_handler(
    State(engine): State<Arc<DiagnosisEngine>>,
    Path(category): Path<String>,
) -> Response {
    let category = match category.parse::<ResultCategory>() {
        Ok(category) => category,
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match engine.results().get(category) {
        Some(payload) => (StatusCode::OK, axum::Json(payload.clone())).into_response(),
        None => {
            let payload = json!({
                "error": format!("no result payload for category {category}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
