//! PostgreSQL schema bootstrap.

use deadpool_postgres::Pool;

use crate::error::AppError;

/// Complete database schema, idempotent so startup can run it on every boot.
pub const SCHEMA: &str = r#"
-- Document storage: one row per (collection, document id), patient records
-- live in the 'patients' collection
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT NOT NULL,
    id          UUID NOT NULL,
    doc         JSONB NOT NULL,
    PRIMARY KEY (collection, id)
);

-- Exercise catalog
CREATE TABLE IF NOT EXISTS exercises (
    id           UUID PRIMARY KEY,
    name         TEXT NOT NULL,
    description  TEXT,
    instructions TEXT[] NOT NULL DEFAULT '{}',
    video_id     TEXT,
    created_at   TIMESTAMPTZ NOT NULL
);

-- Logged sessions; reports read the newest row per (patient_id, exercise_id)
CREATE TABLE IF NOT EXISTS exercise_sessions (
    id               UUID PRIMARY KEY,
    patient_id       UUID NOT NULL,
    exercise_id      UUID NOT NULL REFERENCES exercises(id),
    duration_minutes INTEGER NOT NULL,
    completed        BOOLEAN NOT NULL,
    notes            TEXT,
    created_at       TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sessions_patient_exercise
    ON exercise_sessions (patient_id, exercise_id, created_at DESC);
"#;

/// Create all tables and indexes if they do not exist yet.
pub async fn init_schema(pool: &Pool) -> Result<(), AppError> {
    let client = pool.get().await?;
    client.batch_execute(SCHEMA).await?;
    Ok(())
}
