//! Session report HTTP handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use deadpool_postgres::Pool;
use serde_json::json;
use uuid::Uuid;

use rehab_core::ExerciseReport;

use crate::db::SessionRepository;
use crate::error::AppError;

/// GET /api/patients/{id}/exercises/{exercise_id}/report - Build a report
/// from the patient's most recent session of the exercise
pub async fn build(
    State(pool): State<Pool>,
    Path((patient_id, exercise_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let repo = SessionRepository::new(pool);

    match repo.latest_for(patient_id, exercise_id).await? {
        Some(session) => {
            let report = ExerciseReport::from_session(session);
            Ok(Json(json!({"report": report, "status": "success"})))
        }
        None => Err(AppError::NotFound("Exercise session not found".to_string())),
    }
}
