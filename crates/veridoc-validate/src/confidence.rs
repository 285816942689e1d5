//! Confidence-tier pass: policy thresholds over every extracted field.
//!
//! Walks the typed structure rather than the flat view so issues keep their
//! row/section context. Tier boundaries are product constants the export gate
//! depends on; see [`BLOCKER_BELOW`].

use veridoc_core::{StructuredData, walk_fields};

use crate::issue::{Issue, IssueKind, Severity};

/// Fields below this confidence are blockers: they make export refuse.
pub const BLOCKER_BELOW: u8 = 70;
/// Fields below this (and at/above [`BLOCKER_BELOW`]) are low-confidence.
pub const LOW_BELOW: u8 = 80;
/// Fields below this (and at/above [`LOW_BELOW`]) are moderate-confidence.
pub const MODERATE_BELOW: u8 = 90;

fn tier(confidence: u8) -> Option<(Severity, &'static str)> {
    match confidence {
        c if c < BLOCKER_BELOW => Some((Severity::Error, "very low confidence, blocks export")),
        c if c < LOW_BELOW => Some((Severity::Warning, "low confidence, review recommended")),
        c if c < MODERATE_BELOW => Some((Severity::Warning, "moderate confidence")),
        _ => None,
    }
}

/// Run the confidence pass over every field in the document.
pub fn check_confidence(data: &StructuredData) -> Vec<Issue> {
    walk_fields(data)
        .into_iter()
        .filter_map(|field_ref| {
            let (severity, label) = tier(field_ref.field.confidence)?;
            let mut issue = Issue::new(
                IssueKind::Confidence,
                severity,
                format!(
                    "{}: {label} ({}%)",
                    field_ref.path, field_ref.field.confidence
                ),
                vec![field_ref.path.clone()],
            );
            if let veridoc_core::NodeKind::TableCell { row } = field_ref.kind {
                issue = issue.with_row(row);
            }
            Some(issue)
        })
        .collect()
}
