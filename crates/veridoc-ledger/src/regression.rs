//! Regression detection between two snapshots.
//!
//! Checks run most-severe-first and short-circuit: losing extracted data
//! outright is strictly worse than quality decay, and losing a structural
//! capability is worse than a numeric confidence dip. Exactly one severity is
//! reported per comparison.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use veridoc_core::{Snapshot, flatten};

/// Confidence-score drop (in points) at which a regression becomes major.
pub const MAJOR_SCORE_DROP: i16 = 15;

/// How bad the transition from baseline to candidate is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegressionSeverity {
    None,
    Moderate,
    Major,
    Critical,
}

impl RegressionSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegressionSeverity::None => "none",
            RegressionSeverity::Moderate => "moderate",
            RegressionSeverity::Major => "major",
            RegressionSeverity::Critical => "critical",
        }
    }
}

/// Outcome of comparing two snapshots. Ephemeral: attached to the most
/// recent ledger transition only, never persisted independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    pub severity: RegressionSeverity,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl RegressionReport {
    fn at(severity: RegressionSeverity, message: Option<String>) -> Self {
        Self {
            severity,
            message,
            timestamp: Utc::now(),
        }
    }

    pub fn is_regression(&self) -> bool {
        self.severity != RegressionSeverity::None
    }
}

/// Compare a candidate snapshot against a baseline. First match wins:
///
/// 1. **Critical** — a key with a non-empty value in the baseline's flat view
///    is missing from the candidate's key set (silent field loss).
/// 2. **Major** — aggregate confidence dropped by [`MAJOR_SCORE_DROP`]+.
/// 3. **Major** — table-detection capability lost (`has_tables` true→false).
/// 4. **Moderate** — any other aggregate confidence drop.
/// 5. **None** — otherwise.
pub fn detect(baseline: &Snapshot, candidate: &Snapshot) -> RegressionReport {
    let baseline_flat = flatten(baseline);
    let candidate_flat = flatten(candidate);

    let lost: Vec<&str> = baseline_flat
        .iter()
        .filter(|(key, value)| !value.is_empty() && !candidate_flat.contains_key(key))
        .map(|(key, _)| key)
        .collect();

    if let Some(example) = lost.first() {
        return RegressionReport::at(
            RegressionSeverity::Critical,
            Some(format!(
                "{} field(s) from the previous version are missing (e.g. \"{example}\")",
                lost.len()
            )),
        );
    }

    let score_drop = i16::from(baseline.confidence_score) - i16::from(candidate.confidence_score);

    if score_drop >= MAJOR_SCORE_DROP {
        return RegressionReport::at(
            RegressionSeverity::Major,
            Some(format!(
                "overall confidence dropped from {}% to {}%",
                baseline.confidence_score, candidate.confidence_score
            )),
        );
    }

    if baseline.meta.has_tables && !candidate.meta.has_tables {
        return RegressionReport::at(
            RegressionSeverity::Major,
            Some("table detection capability was lost in this version".to_string()),
        );
    }

    if score_drop > 0 {
        return RegressionReport::at(
            RegressionSeverity::Moderate,
            Some(format!(
                "overall confidence dipped from {}% to {}%",
                baseline.confidence_score, candidate.confidence_score
            )),
        );
    }

    RegressionReport::at(RegressionSeverity::None, None)
}
