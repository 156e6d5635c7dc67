mod exercises;
pub mod health;
pub mod metrics;
mod patients;
mod reports;
mod sessions;

use axum::{
    Router,
    routing::{get, post},
};
use deadpool_postgres::Pool;

/// Build the protected API routes
pub fn api_routes() -> Router<Pool> {
    Router::new()
        .route("/patients", post(patients::onboard))
        .route("/patients/validate", post(patients::validate))
        .route("/patients/{id}", get(patients::read))
        .route(
            "/patients/{id}/exercises/{exercise_id}/report",
            get(reports::build),
        )
        .route("/exercises", post(exercises::create))
        .route("/sessions", post(sessions::create))
        .route("/sessions/metrics", post(sessions::extract))
}
