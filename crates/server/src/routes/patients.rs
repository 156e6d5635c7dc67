//! Patient onboarding HTTP handlers

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use deadpool_postgres::Pool;
use serde_json::{Value as JsonValue, json};
use uuid::Uuid;

use rehab_core::validate_and_normalize;

use crate::db::{DocumentStore, PATIENTS_COLLECTION};
use crate::error::AppError;

/// POST /api/patients - Validate an intake payload and persist the
/// canonical patient record
pub async fn onboard(
    State(pool): State<Pool>,
    Json(body): Json<JsonValue>,
) -> Result<impl IntoResponse, AppError> {
    let record = validate_and_normalize(&body, Uuid::new_v4(), Utc::now()).map_err(|err| {
        tracing::warn!(error = %err, "Rejected onboarding intake");
        AppError::Validation(err)
    })?;

    let doc = serde_json::to_value(&record)
        .map_err(|err| AppError::Internal(format!("Failed to encode patient record: {}", err)))?;
    let store = DocumentStore::new(pool);
    store.put(PATIENTS_COLLECTION, record.id, &doc).await?;

    tracing::info!(patient_id = %record.id, "Patient onboarded");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        format!("/api/patients/{}", record.id).parse().unwrap(),
    );

    Ok((
        StatusCode::CREATED,
        headers,
        Json(json!({
            "status": "success",
            "message": "Patient onboarded successfully",
            "patient_id": record.id,
        })),
    ))
}

/// POST /api/patients/validate - Run the full validation pipeline without
/// storing anything
pub async fn validate(Json(body): Json<JsonValue>) -> Result<impl IntoResponse, AppError> {
    // Dry run. The record is discarded, so the placeholder id and the
    // timestamps never leave this handler.
    validate_and_normalize(&body, Uuid::nil(), Utc::now()).map_err(|err| {
        tracing::warn!(error = %err, "Rejected intake on dry-run validation");
        AppError::Validation(err)
    })?;

    Ok(Json(json!({
        "status": "success",
        "message": "Intake is valid",
    })))
}

/// GET /api/patients/{id} - Read a stored patient document
pub async fn read(
    State(pool): State<Pool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let store = DocumentStore::new(pool);

    match store.get(PATIENTS_COLLECTION, id).await? {
        Some(doc) => Ok(Json(json!({"patient": doc, "status": "success"}))),
        None => Err(AppError::NotFound(format!("Patient {} not found", id))),
    }
}
