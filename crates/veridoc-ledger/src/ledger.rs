//! Linear undo/redo history over document snapshots.
//!
//! An owned struct with no globals: one ledger per editing session, mutated
//! only through `&mut self`, so exclusive ownership is enforced at compile
//! time. Background work that wants the current document clones
//! [`VersionLedger::present`] out and never touches the ledger itself.
//!
//! History is linear with branch discard: committing after an undo throws the
//! redo branch away. There is no merge and no redo across a fork.

use serde::{Deserialize, Serialize};
use veridoc_core::Snapshot;

use crate::regression::{RegressionReport, detect};

/// Undo/redo/baseline history container for one document session.
///
/// The baseline is captured at construction and fixed for the lifetime of
/// the instance; `restore_baseline` re-commits it but never replaces it.
/// History is unbounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionLedger {
    past: Vec<Snapshot>,
    present: Snapshot,
    future: Vec<Snapshot>,
    baseline: Snapshot,
    alert: Option<RegressionReport>,
}

impl VersionLedger {
    /// Start a session from the initial extraction. The initial snapshot is
    /// both the first `present` and the fixed baseline.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            past: Vec::new(),
            present: initial.clone(),
            future: Vec::new(),
            baseline: initial,
            alert: None,
        }
    }

    /// Rebuild a ledger from persisted session state.
    ///
    /// `initial` must be the snapshot the session originally started from:
    /// the baseline is reconstructed from it, never from the restored present.
    pub fn resume(initial: Snapshot, past: Vec<Snapshot>, present: Snapshot) -> Self {
        Self {
            past,
            present,
            future: Vec::new(),
            baseline: initial,
            alert: None,
        }
    }

    pub fn present(&self) -> &Snapshot {
        &self.present
    }

    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    /// The alert raised by the most recent transition, if any. Stays visible
    /// until the next transition replaces or clears it, or the user dismisses
    /// it explicitly.
    pub fn current_alert(&self) -> Option<&RegressionReport> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo steps available.
    pub fn depth(&self) -> usize {
        self.past.len()
    }

    /// Commit an edited snapshot. Runs regression detection against the
    /// outgoing present, raises or clears the alert accordingly, and discards
    /// any redo branch.
    pub fn commit(&mut self, next: Snapshot) {
        let report = detect(&self.present, &next);
        if report.is_regression() {
            tracing::warn!(
                severity = report.severity.as_str(),
                message = report.message.as_deref().unwrap_or_default(),
                "regression detected on commit"
            );
            self.alert = Some(report);
        } else {
            self.alert = None;
        }

        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        self.future.clear();
    }

    /// Step back one version. Clears the alert: undoing is taken as
    /// acknowledging it. Returns false (and does nothing) on empty history.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        self.alert = None;
        true
    }

    /// Step forward one version. Re-runs regression detection against the
    /// restored version's predecessor so a re-applied regression re-raises
    /// its alert. Returns false (and does nothing) on empty redo branch.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);

        // Predecessor of the new present is what we just pushed onto past.
        let report = detect(
            self.past.last().unwrap_or(&self.baseline),
            &self.present,
        );
        self.alert = report.is_regression().then_some(report);
        true
    }

    /// Re-commit the fixed baseline as the next version. Goes through the
    /// same commit path, so regression relative to the *current* present is
    /// still evaluated and alerted on.
    pub fn restore_baseline(&mut self) {
        let baseline = self.baseline.clone();
        self.commit(baseline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::RegressionSeverity;
    use veridoc_core::{
        ConfidenceField, DocumentMeta, LabeledField, Section, StructuredData,
    };

    fn snapshot(label: &str, value: &str, confidence_score: u8) -> Snapshot {
        Snapshot {
            document_type: "invoice".into(),
            confidence_score,
            meta: DocumentMeta::default(),
            structured_data: StructuredData {
                title: ConfidenceField::text("Invoice", 95),
                sections: vec![Section {
                    heading: "Billing".into(),
                    content: vec![LabeledField {
                        label: label.into(),
                        field: ConfidenceField::text(value, 90),
                    }],
                }],
                tables: vec![],
            },
            raw_text_summary: String::new(),
        }
    }

    #[test]
    fn undo_then_redo_restores_present() {
        let mut ledger = VersionLedger::new(snapshot("Total", "100", 90));
        ledger.commit(snapshot("Total", "110", 90));
        ledger.commit(snapshot("Total", "120", 90));
        let before = ledger.present().clone();

        assert!(ledger.undo());
        assert!(ledger.can_redo());
        assert!(ledger.redo());

        assert_eq!(ledger.present(), &before);
        assert!(ledger.can_undo());
        assert!(!ledger.can_redo());
    }

    #[test]
    fn commit_after_undo_discards_redo_branch() {
        let mut ledger = VersionLedger::new(snapshot("Total", "100", 90));
        ledger.commit(snapshot("Total", "110", 90));
        assert!(ledger.undo());
        assert!(ledger.can_redo());

        ledger.commit(snapshot("Total", "105", 90));
        assert!(!ledger.can_redo());
    }

    #[test]
    fn undo_on_empty_history_is_a_noop() {
        let mut ledger = VersionLedger::new(snapshot("Total", "100", 90));
        assert!(!ledger.undo());
        assert!(!ledger.redo());
        assert_eq!(ledger.depth(), 0);
    }

    #[test]
    fn commit_with_regression_raises_alert() {
        let mut ledger = VersionLedger::new(snapshot("Total", "100", 90));
        ledger.commit(snapshot("Total", "100", 80));

        let alert = ledger.current_alert().expect("alert expected");
        assert_eq!(alert.severity, RegressionSeverity::Moderate);
    }

    #[test]
    fn clean_commit_clears_prior_alert() {
        let mut ledger = VersionLedger::new(snapshot("Total", "100", 90));
        ledger.commit(snapshot("Total", "100", 80));
        assert!(ledger.current_alert().is_some());

        ledger.commit(snapshot("Total", "100", 85));
        assert!(ledger.current_alert().is_none());
    }

    #[test]
    fn undo_acknowledges_alert() {
        let mut ledger = VersionLedger::new(snapshot("Total", "100", 90));
        ledger.commit(snapshot("Total", "100", 70));
        assert!(ledger.current_alert().is_some());

        ledger.undo();
        assert!(ledger.current_alert().is_none());
    }

    #[test]
    fn redo_re_raises_alert_for_regressive_step() {
        let mut ledger = VersionLedger::new(snapshot("Total", "100", 90));
        ledger.commit(snapshot("Total", "100", 80));
        ledger.undo();
        assert!(ledger.current_alert().is_none());

        ledger.redo();
        let alert = ledger.current_alert().expect("alert expected after redo");
        assert_eq!(alert.severity, RegressionSeverity::Moderate);
    }

    #[test]
    fn restore_baseline_runs_regression_path() {
        let weak_baseline = snapshot("Total", "100", 70);
        let mut ledger = VersionLedger::new(weak_baseline.clone());
        ledger.commit(snapshot("Total", "100", 95));

        ledger.restore_baseline();
        assert_eq!(ledger.present(), &weak_baseline);
        // Baseline has a lower score than the edited present: that drop is
        // still a regression and must be surfaced.
        let alert = ledger.current_alert().expect("alert expected");
        assert_eq!(alert.severity, RegressionSeverity::Major);
    }

    #[test]
    fn baseline_is_fixed_across_commits() {
        let initial = snapshot("Total", "100", 90);
        let mut ledger = VersionLedger::new(initial.clone());
        ledger.commit(snapshot("Total", "110", 92));
        ledger.commit(snapshot("Total", "120", 94));
        assert_eq!(ledger.baseline(), &initial);
    }

    #[test]
    fn resume_rebuilds_baseline_from_initial_not_present() {
        let initial = snapshot("Total", "100", 90);
        let edited = snapshot("Total", "120", 92);
        let ledger = VersionLedger::resume(initial.clone(), vec![initial.clone()], edited.clone());

        assert_eq!(ledger.baseline(), &initial);
        assert_eq!(ledger.present(), &edited);
        assert!(ledger.can_undo());
        assert!(!ledger.can_redo());
    }

    #[test]
    fn ledger_serializes_for_session_persistence() {
        let mut ledger = VersionLedger::new(snapshot("Total", "100", 90));
        ledger.commit(snapshot("Total", "110", 92));

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: VersionLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.present(), ledger.present());
        assert_eq!(restored.baseline(), ledger.baseline());
        assert_eq!(restored.depth(), 1);
    }
}
