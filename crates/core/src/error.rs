use thiserror::Error;

use crate::onboarding::ACCEPTED_FREQUENCIES;

/// Intake validation failures, one variant per failure class.
///
/// Every variant renders the exact human-readable message returned to the
/// client, so handlers format the error without caring which check tripped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Age must be between 5 and 100, got {0}")]
    AgeOutOfRange(i64),

    #[error("Age must be an integer between 5 and 100, got {0}")]
    AgeNotInteger(String),

    #[error("Pain level must be between 1 and 10, got {0}")]
    PainLevelOutOfRange(i64),

    #[error("Pain level must be an integer between 1 and 10, got {0}")]
    PainLevelNotInteger(String),

    #[error("Invalid frequency value. Must be one of: {accepted}", accepted = ACCEPTED_FREQUENCIES.join(", "))]
    InvalidFrequency,

    #[error("Invalid notification time format. Must be HH:MM in 24-hour format, got {0}")]
    InvalidNotificationTime(String),

    #[error("Field '{field}' must be a string, got {value}")]
    ExpectedText { field: &'static str, value: String },
}
