//! Session logging and transcript metrics HTTP handlers

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use deadpool_postgres::Pool;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use rehab_core::{ChatMessage, extract_metrics, render_transcript};

use crate::db::{NewSession, SessionRepository};
use crate::error::AppError;

/// POST /api/sessions - Log an exercise session
pub async fn create(
    State(pool): State<Pool>,
    Json(body): Json<NewSession>,
) -> Result<impl IntoResponse, AppError> {
    let repo = SessionRepository::new(pool);

    match repo.create(Uuid::new_v4(), &body, Utc::now()).await? {
        Some(id) => {
            tracing::info!(
                session_id = %id,
                patient_id = %body.patient_id,
                exercise_id = %body.exercise_id,
                "Exercise session logged"
            );
            Ok((
                StatusCode::CREATED,
                Json(json!({"status": "success", "session_id": id})),
            ))
        }
        None => Err(AppError::NotFound(format!(
            "Exercise {} not found",
            body.exercise_id
        ))),
    }
}

/// Transcript submitted for metric extraction. The coaching dialogue
/// service historically posted `conversation_history`; both keys work.
#[derive(Debug, Deserialize)]
pub struct MetricsRequest {
    #[serde(alias = "conversation_history")]
    pub messages: Vec<ChatMessage>,
}

/// POST /api/sessions/metrics - Mine workout numbers from a coaching
/// transcript. Extraction is best-effort and never fails.
pub async fn extract(Json(body): Json<MetricsRequest>) -> impl IntoResponse {
    tracing::debug!(
        transcript = %render_transcript(&body.messages),
        "Extracting exercise metrics"
    );
    let metrics = extract_metrics(&body.messages);

    Json(json!({"metrics": metrics, "status": "success"}))
}
