//! Recovery policy: what to do with a classified failure.
//!
//! The mapping is deliberately small and total:
//!
//! - Security / System → freeze. The session must lock; nothing local may
//!   swallow these.
//! - Compliance → halt. The operation is aborted and reported, never retried.
//! - Retryable (Tool) under the attempt budget → retry.
//! - Anything else → halt with an escalation message.
//!
//! Every decision constructs an audit record and logs it before returning;
//! a classification is never silently dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{ClassifiedFailure, FailureKind};

/// Retries allowed after the first attempt of a guarded operation.
pub const MAX_RETRIES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryAction {
    Retry,
    Halt,
    Freeze,
}

impl RecoveryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryAction::Retry => "retry",
            RecoveryAction::Halt => "halt",
            RecoveryAction::Freeze => "freeze",
        }
    }
}

/// Audit trail entry, one per policy decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub kind: FailureKind,
    pub message: String,
    pub context: String,
    pub attempt: u32,
    pub timestamp: DateTime<Utc>,
}

/// The policy's verdict for one failed attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: RecoveryAction,
    /// Human-readable, user-facing; no stack traces.
    pub message: String,
    pub audit: AuditRecord,
}

/// Decide how to handle a classified failure on attempt `attempt` (0-based).
pub fn decide(failure: &ClassifiedFailure, attempt: u32) -> Decision {
    let action = match failure.kind {
        FailureKind::Security | FailureKind::System => RecoveryAction::Freeze,
        FailureKind::Compliance => RecoveryAction::Halt,
        _ if failure.retryable && attempt < MAX_RETRIES => RecoveryAction::Retry,
        _ => RecoveryAction::Halt,
    };

    let message = match action {
        RecoveryAction::Freeze => {
            format!("session frozen ({}): {}", failure.kind.as_str(), failure.message)
        }
        RecoveryAction::Retry => format!(
            "transient failure, retrying (attempt {} of {}): {}",
            attempt + 1,
            MAX_RETRIES,
            failure.message
        ),
        RecoveryAction::Halt if failure.kind == FailureKind::Compliance => {
            format!("operation blocked: {}", failure.message)
        }
        RecoveryAction::Halt => format!(
            "operation failed after {} attempt(s): {}",
            attempt + 1,
            failure.message
        ),
    };

    let audit = AuditRecord {
        kind: failure.kind,
        message: failure.message.clone(),
        context: failure.context.clone(),
        attempt,
        timestamp: Utc::now(),
    };

    tracing::warn!(
        kind = failure.kind.as_str(),
        context = %failure.context,
        attempt,
        action = action.as_str(),
        "recovery decision"
    );

    Decision {
        action,
        message,
        audit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    #[test]
    fn security_always_freezes() {
        let failure = classify("blocked by safety filter", "chat");
        for attempt in 0..4 {
            assert_eq!(decide(&failure, attempt).action, RecoveryAction::Freeze);
        }
    }

    #[test]
    fn system_always_freezes() {
        let failure = classify("quota exceeded", "extraction");
        assert_eq!(decide(&failure, 0).action, RecoveryAction::Freeze);
    }

    #[test]
    fn compliance_halts_without_retry() {
        let failure = classify("PII detected", "extraction");
        assert_eq!(decide(&failure, 0).action, RecoveryAction::Halt);
        assert!(decide(&failure, 0).message.contains("operation blocked"));
    }

    #[test]
    fn tool_retries_twice_then_halts() {
        let failure = classify("network error", "extraction");
        assert_eq!(decide(&failure, 0).action, RecoveryAction::Retry);
        assert_eq!(decide(&failure, 1).action, RecoveryAction::Retry);
        assert_eq!(decide(&failure, 2).action, RecoveryAction::Halt);
    }

    #[test]
    fn retry_message_states_attempt_number() {
        let failure = classify("network error", "extraction");
        assert!(decide(&failure, 1).message.contains("attempt 2 of 2"));
    }

    #[test]
    fn every_decision_carries_an_audit_record() {
        let failure = classify("network error", "extraction");
        let decision = decide(&failure, 1);
        assert_eq!(decision.audit.kind, FailureKind::Tool);
        assert_eq!(decision.audit.attempt, 1);
        assert_eq!(decision.audit.context, "extraction");
    }
}
