pub mod ledger;
pub mod regression;

pub use ledger::VersionLedger;
pub use regression::{MAJOR_SCORE_DROP, RegressionReport, RegressionSeverity, detect};
