//! Exercise catalog HTTP handlers

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use deadpool_postgres::Pool;
use serde_json::json;
use uuid::Uuid;

use crate::db::{ExerciseRepository, NewExercise};
use crate::error::AppError;

/// POST /api/exercises - Register an exercise in the catalog
pub async fn create(
    State(pool): State<Pool>,
    Json(body): Json<NewExercise>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ExerciseRepository::new(pool);
    let id = repo.create(Uuid::new_v4(), &body, Utc::now()).await?;

    tracing::info!(exercise_id = %id, name = %body.name, "Exercise registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({"status": "success", "exercise_id": id})),
    ))
}
