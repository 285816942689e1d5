//! Failure classification and recovery policy for asynchronous boundary
//! calls (extraction, chat, generation).
//!
//! Flow: a raw failure is [`classify`]d into a fixed taxonomy, the
//! [`decide`] policy maps (kind, attempt) to retry / halt / freeze, and
//! [`run_guarded`] executes the whole loop with exponential backoff. Halts
//! come back as data; freezes come back as errors that must reach the
//! session owner.

pub mod classify;
pub mod policy;
pub mod retry;

pub use classify::{ClassifiedFailure, FailureKind, classify};
pub use policy::{AuditRecord, Decision, MAX_RETRIES, RecoveryAction, decide};
pub use retry::{BACKOFF_BASE, FrozenFailure, Guarded, Outcome, Sleeper, TokioSleeper, run_guarded};
