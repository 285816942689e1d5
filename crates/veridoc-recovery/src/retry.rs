//! Guarded execution of boundary calls with sequential exponential backoff.
//!
//! The backoff loop is explicit and the sleep is injected behind a trait, so
//! tests drive the whole retry sequence without real delays. At most one
//! attempt is in flight at a time; abandoning a guarded call means dropping
//! its future and ignoring its settlement.

use std::fmt::Display;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::classify::{FailureKind, classify};
use crate::policy::{AuditRecord, RecoveryAction, decide};

/// Base delay before the first retry; doubles on each subsequent one.
pub const BACKOFF_BASE: Duration = Duration::from_millis(1000);

/// Injectable sleep, so tests can record delays instead of waiting them out.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A terminal, non-retryable failure. Deliberately an error type: it must
/// propagate to whoever owns the session so the whole application can enter
/// its locked state. Nothing below that level may absorb it.
#[derive(Debug, Clone, Error)]
#[error("session frozen ({}): {message}", kind.as_str())]
pub struct FrozenFailure {
    pub kind: FailureKind,
    pub message: String,
    pub context: String,
}

/// How a guarded operation ended, short of a freeze.
#[derive(Debug)]
pub enum Outcome<T> {
    Done(T),
    /// The operation was given up on; `message` is final and user-facing.
    Halted { message: String },
}

impl<T> Outcome<T> {
    pub fn is_halted(&self) -> bool {
        matches!(self, Outcome::Halted { .. })
    }
}

/// A completed guarded call plus the audit trail of every recovery decision
/// taken along the way.
#[derive(Debug)]
pub struct Guarded<T> {
    pub outcome: Outcome<T>,
    pub audit_trail: Vec<AuditRecord>,
}

/// Run `op`, classifying each failure and applying the recovery policy.
///
/// Retries sleep `BACKOFF_BASE * 2^attempt` before re-invoking. A halt is
/// returned as data ([`Outcome::Halted`]); a freeze is returned as an error
/// and must not be swallowed by the caller.
pub async fn run_guarded<T, E, F, Fut>(
    mut op: F,
    context: &str,
    sleeper: &dyn Sleeper,
) -> Result<Guarded<T>, FrozenFailure>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut audit_trail = Vec::new();
    let mut attempt: u32 = 0;

    loop {
        match op().await {
            Ok(value) => {
                return Ok(Guarded {
                    outcome: Outcome::Done(value),
                    audit_trail,
                });
            }
            Err(raw) => {
                let failure = classify(&raw.to_string(), context);
                let decision = decide(&failure, attempt);
                audit_trail.push(decision.audit);

                match decision.action {
                    RecoveryAction::Retry => {
                        sleeper.sleep(BACKOFF_BASE * 2u32.pow(attempt)).await;
                        attempt += 1;
                    }
                    RecoveryAction::Halt => {
                        return Ok(Guarded {
                            outcome: Outcome::Halted {
                                message: decision.message,
                            },
                            audit_trail,
                        });
                    }
                    RecoveryAction::Freeze => {
                        return Err(FrozenFailure {
                            kind: failure.kind,
                            message: decision.message,
                            context: context.to_string(),
                        });
                    }
                }
            }
        }
    }
}
