//! Session report composition.
//!
//! A report is built from the most recent logged session for a
//! (patient, exercise) pair; picking that session is the store's job, so
//! this module only shapes the row into the outward payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logged exercise session joined with its exercise's name and
/// description, as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub exercise_name: String,
    pub description: String,
    pub duration_minutes: i32,
    pub completed: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// The report payload returned to clients. Field names are the wire
/// contract; `summary` is a fixed-form sentence assembled from the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseReport {
    pub exercise_name: String,
    pub description: String,
    pub duration_minutes: i32,
    pub completed: bool,
    pub notes: String,
    pub date: DateTime<Utc>,
    pub summary: String,
}

impl ExerciseReport {
    /// Shape a session row into the outward report.
    pub fn from_session(session: SessionRecord) -> Self {
        let summary =
            summary_line(&session.exercise_name, session.duration_minutes, session.completed);
        ExerciseReport {
            exercise_name: session.exercise_name,
            description: session.description,
            duration_minutes: session.duration_minutes,
            completed: session.completed,
            notes: session.notes,
            date: session.created_at,
            summary,
        }
    }
}

fn summary_line(exercise_name: &str, duration_minutes: i32, completed: bool) -> String {
    let outcome = if completed {
        "Successfully completed all reps."
    } else {
        "Exercise was interrupted."
    };
    format!("Completed {exercise_name} exercise for {duration_minutes} minutes. {outcome}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(completed: bool) -> SessionRecord {
        SessionRecord {
            exercise_name: "Heel Slides".into(),
            description: "Gentle knee flexion from a lying position".into(),
            duration_minutes: 15,
            completed,
            notes: "Mild stiffness at the start".into(),
            created_at: "2025-03-14T09:30:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn completed_session_summary() {
        let report = ExerciseReport::from_session(session(true));
        assert_eq!(
            report.summary,
            "Completed Heel Slides exercise for 15 minutes. Successfully completed all reps."
        );
    }

    #[test]
    fn interrupted_session_summary() {
        let report = ExerciseReport::from_session(session(false));
        assert_eq!(
            report.summary,
            "Completed Heel Slides exercise for 15 minutes. Exercise was interrupted."
        );
    }

    #[test]
    fn session_fields_pass_through_verbatim() {
        let report = ExerciseReport::from_session(session(true));
        assert_eq!(report.exercise_name, "Heel Slides");
        assert_eq!(report.description, "Gentle knee flexion from a lying position");
        assert_eq!(report.duration_minutes, 15);
        assert!(report.completed);
        assert_eq!(report.notes, "Mild stiffness at the start");
        assert_eq!(report.date, session(true).created_at);
    }

    #[test]
    fn report_serializes_with_wire_names() {
        let value = serde_json::to_value(ExerciseReport::from_session(session(false))).unwrap();
        for key in [
            "exercise_name",
            "description",
            "duration_minutes",
            "completed",
            "notes",
            "date",
            "summary",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["completed"], false);
    }
}
