use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::service::{GradingError, QuoteGrade, QuoteGradingService};

/// Body accepted by the grading endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRequest {
    pub signals: Value,
    #[serde(default)]
    pub opening_count_hint: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    pub graded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub grade: QuoteGrade,
}

/// Router builder exposing the quote grading endpoint.
pub fn grading_router(service: Arc<QuoteGradingService>) -> Router {
    Router::new()
        .route("/api/v1/quotes/grade", post(grade_handler))
        .with_state(service)
}

pub(crate) async fn grade_handler(
    State(service): State<Arc<QuoteGradingService>>,
    axum::Json(request): axum::Json<GradeRequest>,
) -> Response {
    match service.grade(&request.signals, request.opening_count_hint) {
        Ok(grade) => {
            let body = GradeResponse {
                graded_at: Utc::now(),
                grade,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(GradingError::Contract(violation)) => {
            let payload = json!({
                "error": violation.to_string(),
                "violations": violation.violations(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
