//! rehab-core: domain logic for the rehab coaching backend
//!
//! This crate holds the pure pieces shared by the server: intake
//! validation and normalization, transcript metric extraction, and
//! session report composition. No I/O happens here.

pub mod error;
pub mod onboarding;
pub mod report;
pub mod transcript;

// Re-export the types handlers touch on every request
pub use error::ValidationError;
pub use onboarding::{validate_and_normalize, PatientRecord, ACCEPTED_FREQUENCIES};
pub use report::{ExerciseReport, SessionRecord};
pub use transcript::{
    extract_metrics, render_transcript, ChatMessage, ExerciseMetrics, Role,
};
