//! Typed findings produced by the validation engine.

use serde::{Deserialize, Serialize};

/// How bad a finding is. Errors block export; warnings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Which rule family produced the finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Format,
    Logic,
    Math,
    Confidence,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Format => "format",
            IssueKind::Logic => "logic",
            IssueKind::Math => "math",
            IssueKind::Confidence => "confidence",
        }
    }
}

/// One finding. Never persisted; always recomputed from the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    /// Flat keys or walk paths this finding is about, for UI highlighting.
    pub involved_keys: Vec<String>,
    /// Table row the finding applies to, when row-local.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<usize>,
}

impl Issue {
    pub fn new(
        kind: IssueKind,
        severity: Severity,
        message: impl Into<String>,
        involved_keys: Vec<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            involved_keys,
            row_index: None,
        }
    }

    pub fn with_row(mut self, row_index: usize) -> Self {
        self.row_index = Some(row_index);
        self
    }
}
