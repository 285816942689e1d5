//! Failure classification into a fixed taxonomy.
//!
//! Classification is message-pattern based: case-insensitive substring
//! triggers checked in a fixed priority order, so a message mentioning both a
//! safety block and a network hiccup is treated as the more serious of the
//! two. Unrecognised failures default to transient infrastructure trouble,
//! which is the only retryable kind.

use serde::{Deserialize, Serialize};

/// The six failure kinds.
///
/// `Validation` and `Classification` are soft content-quality findings: the
/// validation engine returns them as data, they never arrive here as raised
/// failures, but they are part of the taxonomy so callers can carry a single
/// kind through audit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    Tool,
    Validation,
    Classification,
    Security,
    Compliance,
    System,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Tool => "tool",
            FailureKind::Validation => "validation",
            FailureKind::Classification => "classification",
            FailureKind::Security => "security",
            FailureKind::Compliance => "compliance",
            FailureKind::System => "system",
        }
    }
}

/// A raw failure after classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedFailure {
    pub kind: FailureKind,
    pub retryable: bool,
    pub message: String,
    /// What the application was doing, e.g. `"extraction"`.
    pub context: String,
}

const SECURITY_TRIGGERS: &[&str] = &["safety", "blocked", "harmful"];
const TOOL_TRIGGERS: &[&str] = &[
    "network", "fetch", "timeout", "timed out", "500", "502", "503", "504",
];
const COMPLIANCE_TRIGGERS: &[&str] = &["pii", "compliance"];
const SYSTEM_TRIGGERS: &[&str] = &["quota", "api key", "api-key"];

fn matches_any(haystack: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|t| haystack.contains(t))
}

/// Classify a raw failure message.
pub fn classify(raw_message: &str, context: &str) -> ClassifiedFailure {
    let lower = raw_message.to_lowercase();

    let kind = if matches_any(&lower, SECURITY_TRIGGERS) {
        FailureKind::Security
    } else if matches_any(&lower, TOOL_TRIGGERS) {
        FailureKind::Tool
    } else if matches_any(&lower, COMPLIANCE_TRIGGERS) {
        FailureKind::Compliance
    } else if matches_any(&lower, SYSTEM_TRIGGERS) {
        FailureKind::System
    } else {
        FailureKind::Tool
    };

    ClassifiedFailure {
        kind,
        retryable: kind == FailureKind::Tool,
        message: raw_message.to_string(),
        context: context.to_string(),
    }
}
