//! Stateless validation engine: snapshot in, ordered list of typed issues out.
//!
//! Four rule groups run in a fixed order — field formats, confidence tiers,
//! cross-field document logic, then per-table arithmetic — and their findings
//! are concatenated. No rule ever fails the engine: unreadable input degrades
//! to "no issue emitted" for that rule.
//!
//! Results are never cached; every caller revalidates the snapshot it holds.

pub mod coerce;
pub mod confidence;
pub mod format;
pub mod issue;
pub mod logic;
pub mod table_math;

use serde::{Deserialize, Serialize};
use veridoc_core::{Snapshot, flatten};

pub use confidence::BLOCKER_BELOW;
pub use issue::{Issue, IssueKind, Severity};

/// Everything the validation engine found in one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub issues: Vec<Issue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// The export gate: any error-severity issue blocks export.
    pub fn has_blockers(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == Severity::Error)
    }

    pub fn blockers(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }
}

/// Validate one snapshot.
pub fn validate(snapshot: &Snapshot) -> ValidationResult {
    let flat = flatten(snapshot);
    let mut issues = Vec::new();

    issues.extend(format::check_formats(&flat));
    issues.extend(confidence::check_confidence(&snapshot.structured_data));
    issues.extend(logic::check_document_logic(&flat));
    for table in &snapshot.structured_data.tables {
        issues.extend(table_math::check_table(table));
    }

    ValidationResult { issues }
}
