use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use rehab_core::SessionRecord;

use crate::error::AppError;

/// Collection holding canonical patient documents.
pub const PATIENTS_COLLECTION: &str = "patients";

/// Document store over the `documents` table: JSON documents addressed by
/// (collection, id), Firestore-style.
#[derive(Clone)]
pub struct DocumentStore {
    pool: Pool,
}

impl DocumentStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create or overwrite a document.
    pub async fn put(&self, collection: &str, id: Uuid, doc: &JsonValue) -> Result<(), AppError> {
        let client = self.pool.get().await?;
        client
            .execute(
                "INSERT INTO documents (collection, id, doc) VALUES ($1, $2, $3::jsonb)
                 ON CONFLICT (collection, id) DO UPDATE SET doc = EXCLUDED.doc",
                &[&collection, &id, doc],
            )
            .await?;
        Ok(())
    }

    /// Fetch a document by id.
    pub async fn get(&self, collection: &str, id: Uuid) -> Result<Option<JsonValue>, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT doc FROM documents WHERE collection = $1 AND id = $2",
                &[&collection, &id],
            )
            .await?;
        Ok(row.map(|row| row.get(0)))
    }
}

/// Payload for registering an exercise in the catalog.
#[derive(Debug, Deserialize)]
pub struct NewExercise {
    pub name: String,
    pub description: Option<String>,
    pub instructions: Option<Vec<String>>,
    pub video_id: Option<String>,
}

/// Repository for the exercise catalog
#[derive(Clone)]
pub struct ExerciseRepository {
    pool: Pool,
}

impl ExerciseRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Insert a new exercise
    pub async fn create(
        &self,
        id: Uuid,
        exercise: &NewExercise,
        now: DateTime<Utc>,
    ) -> Result<Uuid, AppError> {
        let client = self.pool.get().await?;
        let instructions = exercise.instructions.clone().unwrap_or_default();
        client
            .execute(
                "INSERT INTO exercises (id, name, description, instructions, video_id, created_at)
                 VALUES ($1, $2, $3, $4, $5, $6)",
                &[
                    &id,
                    &exercise.name,
                    &exercise.description,
                    &instructions,
                    &exercise.video_id,
                    &now,
                ],
            )
            .await?;
        Ok(id)
    }
}

/// Payload for logging a completed (or interrupted) session. The mobile
/// client historically sent `duration`; both spellings are accepted.
#[derive(Debug, Deserialize)]
pub struct NewSession {
    pub patient_id: Uuid,
    pub exercise_id: Uuid,
    #[serde(alias = "duration")]
    pub duration_minutes: i32,
    pub completed: bool,
    pub notes: Option<String>,
}

/// Repository for logged exercise sessions
#[derive(Clone)]
pub struct SessionRepository {
    pool: Pool,
}

impl SessionRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Insert a session. Returns `None` without inserting when the
    /// referenced exercise does not exist.
    pub async fn create(
        &self,
        id: Uuid,
        session: &NewSession,
        now: DateTime<Utc>,
    ) -> Result<Option<Uuid>, AppError> {
        let client = self.pool.get().await?;

        let exercise = client
            .query_opt(
                "SELECT 1 FROM exercises WHERE id = $1",
                &[&session.exercise_id],
            )
            .await?;
        if exercise.is_none() {
            return Ok(None);
        }

        client
            .execute(
                "INSERT INTO exercise_sessions
                     (id, patient_id, exercise_id, duration_minutes, completed, notes, created_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
                &[
                    &id,
                    &session.patient_id,
                    &session.exercise_id,
                    &session.duration_minutes,
                    &session.completed,
                    &session.notes,
                    &now,
                ],
            )
            .await?;
        Ok(Some(id))
    }

    /// Most recent session for a (patient, exercise) pair, joined with the
    /// exercise's name and description.
    pub async fn latest_for(
        &self,
        patient_id: Uuid,
        exercise_id: Uuid,
    ) -> Result<Option<SessionRecord>, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT e.name, COALESCE(e.description, ''), s.duration_minutes,
                        s.completed, COALESCE(s.notes, ''), s.created_at
                 FROM exercise_sessions s
                 JOIN exercises e ON e.id = s.exercise_id
                 WHERE s.patient_id = $1 AND s.exercise_id = $2
                 ORDER BY s.created_at DESC
                 LIMIT 1",
                &[&patient_id, &exercise_id],
            )
            .await?;

        Ok(row.map(|row| SessionRecord {
            exercise_name: row.get(0),
            description: row.get(1),
            duration_minutes: row.get(2),
            completed: row.get(3),
            notes: row.get(4),
            created_at: row.get(5),
        }))
    }
}
