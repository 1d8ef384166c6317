use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use vacant_home_diagnosis::diagnosis::{
    diagnosis_router, AnswerSheetImporter, AnswerSheetResult, DiagnosisEngine,
};
use vacant_home_diagnosis::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    /// Answer-sheet export: a `respondent` column plus `Q1`..`Qn`.
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) policy: String,
    pub(crate) results: Vec<AnswerSheetResult>,
}

pub(crate) fn with_diagnosis_routes(engine: Arc<DiagnosisEngine>) -> axum::Router {
    diagnosis_router(engine)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/diagnosis/batch",
            axum::routing::post(batch_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({
            "status": "ready",
            "policy": state.engine.policy().name,
            "questions": state.engine.questions().len(),
        })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn batch_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let reader = Cursor::new(payload.csv.into_bytes());
    let results = AnswerSheetImporter::from_reader(reader, &state.engine)?;

    Ok(Json(BatchResponse {
        generated_at: Utc::now(),
        policy: state.engine.policy().name.clone(),
        results,
    }))
}
