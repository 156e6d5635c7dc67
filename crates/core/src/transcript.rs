//! Exercise-metric extraction from coaching chat transcripts.
//!
//! The extractor is deliberately best-effort: it scans each message for
//! numbers attached to the keywords "sets", "reps" and "minutes", keeps the
//! last mention within a message, and folds messages together with `max`.
//! It never fails; a transcript with no usable mention yields all zeroes.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static SETS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*sets?").expect("valid sets regex"));
static REPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*reps?").expect("valid reps regex"));
static MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*minutes?").expect("valid minutes regex"));

/// Who authored a transcript line. Accepts the upstream chat runtime's
/// `user`/`assistant` labels as aliases on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "user")]
    Patient,
    #[serde(alias = "assistant")]
    Coach,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Coach => "Coach",
        }
    }
}

/// One line of a coaching conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Aggregated workout numbers recovered from a transcript. Counters start
/// at zero and only ever move up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseMetrics {
    pub sets_completed: u32,
    pub reps_completed: u32,
    pub duration_minutes: u32,
}

/// What a single message mentioned, per metric kind. `None` means the
/// message said nothing usable about that kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageMentions {
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub minutes: Option<u32>,
}

/// Per-message scanning strategy. The aggregation policy (max across
/// messages) lives in [`extract_with`] and does not change with the
/// scanner.
pub trait MentionScanner {
    fn scan(&self, content: &str) -> MessageMentions;
}

/// Keyword-plus-regex scanner: lowercases the message, checks for the
/// keyword stem before running the pattern, and keeps the last parseable
/// number attached to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordScanner;

impl MentionScanner for KeywordScanner {
    fn scan(&self, content: &str) -> MessageMentions {
        let lowered = content.to_lowercase();
        MessageMentions {
            sets: last_mention(&lowered, "set", &SETS_RE),
            reps: last_mention(&lowered, "rep", &REPS_RE),
            minutes: last_mention(&lowered, "minute", &MINUTES_RE),
        }
    }
}

fn last_mention(lowered: &str, stem: &str, pattern: &Regex) -> Option<u32> {
    if !lowered.contains(stem) {
        return None;
    }
    pattern
        .captures_iter(lowered)
        .filter_map(|caps| caps[1].parse().ok())
        .last()
}

/// Fold a transcript into metrics with an explicit scanning strategy.
pub fn extract_with<S: MentionScanner + ?Sized>(
    messages: &[ChatMessage],
    scanner: &S,
) -> ExerciseMetrics {
    let mut metrics = ExerciseMetrics::default();
    for message in messages {
        // Both roles are scanned.
        let mentions = scanner.scan(&message.content);
        if let Some(sets) = mentions.sets {
            metrics.sets_completed = metrics.sets_completed.max(sets);
        }
        if let Some(reps) = mentions.reps {
            metrics.reps_completed = metrics.reps_completed.max(reps);
        }
        if let Some(minutes) = mentions.minutes {
            metrics.duration_minutes = metrics.duration_minutes.max(minutes);
        }
    }
    metrics
}

/// Fold a transcript into metrics with the default keyword scanner.
pub fn extract_metrics(messages: &[ChatMessage]) -> ExerciseMetrics {
    extract_with(messages, &KeywordScanner)
}

/// Render a transcript as labelled lines, one message per line.
pub fn render_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|message| format!("{}: {}", message.role.label(), message.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(content: &str) -> ChatMessage {
        ChatMessage {
            role: Role::Patient,
            content: content.to_owned(),
        }
    }

    fn coach(content: &str) -> ChatMessage {
        ChatMessage {
            role: Role::Coach,
            content: content.to_owned(),
        }
    }

    #[test]
    fn takes_the_max_across_messages() {
        let transcript = [patient("2 sets"), patient("3 sets"), patient("1 set")];
        assert_eq!(extract_metrics(&transcript).sets_completed, 3);
    }

    #[test]
    fn last_mention_within_a_message_wins() {
        let transcript = [patient("started with 2 sets but finished 4 sets total")];
        assert_eq!(extract_metrics(&transcript).sets_completed, 4);
    }

    #[test]
    fn unmentioned_metrics_stay_zero() {
        let transcript = [patient("I did 3 sets of 12 reps")];
        let metrics = extract_metrics(&transcript);
        assert_eq!(metrics.sets_completed, 3);
        assert_eq!(metrics.reps_completed, 12);
        assert_eq!(metrics.duration_minutes, 0);

        assert_eq!(extract_metrics(&[]), ExerciseMetrics::default());
        assert_eq!(
            extract_metrics(&[patient("felt pretty good today")]),
            ExerciseMetrics::default()
        );
    }

    #[test]
    fn whitespace_between_number_and_keyword_is_optional() {
        let transcript = [patient("managed 5sets and 20  reps in 15 minutes")];
        let metrics = extract_metrics(&transcript);
        assert_eq!(metrics.sets_completed, 5);
        assert_eq!(metrics.reps_completed, 20);
        assert_eq!(metrics.duration_minutes, 15);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let transcript = [patient("3 SETS of 10 Reps, about 12 MINUTES")];
        let metrics = extract_metrics(&transcript);
        assert_eq!(metrics.sets_completed, 3);
        assert_eq!(metrics.reps_completed, 10);
        assert_eq!(metrics.duration_minutes, 12);
    }

    #[test]
    fn singular_keywords_match_too() {
        let transcript = [patient("1 set, 1 rep, 1 minute. rough day")];
        let metrics = extract_metrics(&transcript);
        assert_eq!(metrics.sets_completed, 1);
        assert_eq!(metrics.reps_completed, 1);
        assert_eq!(metrics.duration_minutes, 1);
    }

    #[test]
    fn decimal_mentions_contribute_their_fractional_digits() {
        // "3.5 sets" matches as "5 sets"; the heuristic is integer-only.
        let transcript = [patient("about 3.5 sets")];
        assert_eq!(extract_metrics(&transcript).sets_completed, 5);
    }

    #[test]
    fn extraction_is_role_blind() {
        let lines = ["you did 4 sets, nice", "yes, 4 sets of 8 reps"];
        let as_patient: Vec<_> = lines.iter().map(|l| patient(l)).collect();
        let as_coach: Vec<_> = lines.iter().map(|l| coach(l)).collect();
        assert_eq!(extract_metrics(&as_patient), extract_metrics(&as_coach));
    }

    #[test]
    fn counters_never_decrease_across_messages() {
        let transcript = [
            patient("finished 4 sets"),
            coach("log says 2 sets, is that right?"),
            patient("no, 4 sets"),
        ];
        assert_eq!(extract_metrics(&transcript).sets_completed, 4);
    }

    #[test]
    fn oversized_numbers_are_ignored() {
        let transcript = [patient("99999999999999999999 sets"), patient("3 sets")];
        assert_eq!(extract_metrics(&transcript).sets_completed, 3);
    }

    #[test]
    fn custom_scanner_replaces_the_heuristic_but_not_the_fold() {
        struct FixedScanner(u32);
        impl MentionScanner for FixedScanner {
            fn scan(&self, _content: &str) -> MessageMentions {
                MessageMentions {
                    sets: Some(self.0),
                    ..MessageMentions::default()
                }
            }
        }

        let transcript = [patient("anything"), patient("at all")];
        let metrics = extract_with(&transcript, &FixedScanner(7));
        assert_eq!(metrics.sets_completed, 7);
        assert_eq!(metrics.reps_completed, 0);
    }

    #[test]
    fn wire_roles_accept_upstream_aliases() {
        let message: ChatMessage =
            serde_json::from_value(serde_json::json!({"role": "user", "content": "2 sets"}))
                .unwrap();
        assert_eq!(message.role, Role::Patient);

        let message: ChatMessage =
            serde_json::from_value(serde_json::json!({"role": "assistant", "content": "nice"}))
                .unwrap();
        assert_eq!(message.role, Role::Coach);
    }

    #[test]
    fn renders_labelled_lines() {
        let transcript = [patient("knee felt stiff"), coach("take it slow today")];
        assert_eq!(
            render_transcript(&transcript),
            "Patient: knee felt stiff\nCoach: take it slow today"
        );
    }

    #[test]
    fn metrics_serialize_with_wire_names() {
        let metrics = ExerciseMetrics {
            sets_completed: 3,
            reps_completed: 12,
            duration_minutes: 15,
        };
        assert_eq!(
            serde_json::to_value(metrics).unwrap(),
            serde_json::json!({
                "sets_completed": 3,
                "reps_completed": 12,
                "duration_minutes": 15,
            })
        );
    }
}
