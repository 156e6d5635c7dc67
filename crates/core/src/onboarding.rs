//! Patient intake validation and normalization.
//!
//! Turns a raw onboarding payload into a [`PatientRecord`] ready for
//! persistence, or a [`ValidationError`] naming exactly what was wrong.
//! Checks run in a fixed order and stop at the first failure.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::ValidationError;

/// Exercise frequencies accepted at intake, canonical lowercase.
///
/// Comparison lowercases the submitted value and matches it against this
/// set; the same list, in this declared casing, is rendered into the
/// rejection message.
pub const ACCEPTED_FREQUENCIES: [&str; 8] = [
    "daily",
    "2 times a week",
    "3 times a week",
    "4 times a week",
    "5 times a week",
    "6 times a week",
    "everyday",
    "every other day",
];

/// Keys that must be present in an intake payload, in reporting order.
const REQUIRED_FIELDS: [&str; 8] = [
    "name",
    "age",
    "injury",
    "pain_level",
    "frequency",
    "time_of_day",
    "notification_time",
    "goal",
];

const AGE_RANGE: std::ops::RangeInclusive<i64> = 5..=100;
const PAIN_RANGE: std::ops::RangeInclusive<i64> = 1..=10;

/// Strict 24-hour clock: two-digit hour 00-23, colon, two-digit minute 00-59.
static NOTIFICATION_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("valid time regex"));

/// The canonical patient document persisted after a successful onboarding.
///
/// Field names match the stored document, not the intake payload: `injury`
/// arrives as free text and is stored as `pain_description`, `pain_level`
/// as `pain_severity`, `frequency` (lowercased) as `exercise_frequency`,
/// and `time_of_day` as `preferred_time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub pain_description: String,
    pub pain_severity: i32,
    pub exercise_frequency: String,
    pub preferred_time: String,
    pub notification_time: String,
    pub goal: String,
    pub fcm_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validate an intake payload and build the canonical record from it.
///
/// `id` and `now` come from the caller so the function stays deterministic;
/// `now` is used for both `created_at` and `updated_at`. Checks run in
/// order (presence, age, pain level, frequency, notification time) and
/// the first failure wins.
pub fn validate_and_normalize(
    body: &JsonValue,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<PatientRecord, ValidationError> {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| body.get(field).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing.join(", ")));
    }

    let raw_age = body.get("age").unwrap_or(&JsonValue::Null);
    let age = match coerce_int(raw_age) {
        Some(age) if AGE_RANGE.contains(&age) => age,
        Some(age) => return Err(ValidationError::AgeOutOfRange(age)),
        None => return Err(ValidationError::AgeNotInteger(render(raw_age))),
    };

    let raw_pain = body.get("pain_level").unwrap_or(&JsonValue::Null);
    let pain_level = match coerce_int(raw_pain) {
        Some(level) if PAIN_RANGE.contains(&level) => level,
        Some(level) => return Err(ValidationError::PainLevelOutOfRange(level)),
        None => return Err(ValidationError::PainLevelNotInteger(render(raw_pain))),
    };

    // Null (and anything else non-textual) compares as the empty string,
    // which the enumeration never contains.
    let frequency = body
        .get("frequency")
        .and_then(JsonValue::as_str)
        .unwrap_or("");
    let exercise_frequency = frequency.to_lowercase();
    if !ACCEPTED_FREQUENCIES.contains(&exercise_frequency.as_str()) {
        return Err(ValidationError::InvalidFrequency);
    }

    let raw_time = body.get("notification_time").unwrap_or(&JsonValue::Null);
    let notification_time = match raw_time.as_str() {
        Some(s) if NOTIFICATION_TIME_RE.is_match(s) => s.to_owned(),
        _ => return Err(ValidationError::InvalidNotificationTime(render(raw_time))),
    };

    Ok(PatientRecord {
        id,
        name: require_text(body, "name")?,
        age: age as i32,
        pain_description: require_text(body, "injury")?,
        pain_severity: pain_level as i32,
        exercise_frequency,
        preferred_time: require_text(body, "time_of_day")?,
        notification_time,
        goal: require_text(body, "goal")?,
        fcm_token: optional_text(body, "fcm_token")?,
        created_at: now,
        updated_at: now,
    })
}

/// Integer coercion for values arriving as JSON numbers or digit strings.
/// Floats truncate toward zero; strings are trimmed before parsing.
fn coerce_int(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Offending values are cited in error messages: strings verbatim,
/// everything else in its compact JSON rendering.
fn render(value: &JsonValue) -> String {
    match value.as_str() {
        Some(s) => s.to_owned(),
        None => value.to_string(),
    }
}

fn require_text(body: &JsonValue, field: &'static str) -> Result<String, ValidationError> {
    match body.get(field) {
        Some(JsonValue::String(s)) => Ok(s.clone()),
        other => Err(ValidationError::ExpectedText {
            field,
            value: render(other.unwrap_or(&JsonValue::Null)),
        }),
    }
}

/// Absent or null optional text defaults to the empty string.
fn optional_text(body: &JsonValue, field: &'static str) -> Result<String, ValidationError> {
    match body.get(field) {
        None | Some(JsonValue::Null) => Ok(String::new()),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(other) => Err(ValidationError::ExpectedText {
            field,
            value: render(other),
        }),
    }
}
