//! Plain-text rendering of validation results and regression reports.

use veridoc_ledger::RegressionReport;
use veridoc_validate::{Issue, IssueKind, Severity, ValidationResult};

const KIND_ORDER: &[IssueKind] = &[
    IssueKind::Format,
    IssueKind::Logic,
    IssueKind::Math,
    IssueKind::Confidence,
];

fn kind_heading(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::Format => "Format",
        IssueKind::Logic => "Document Logic",
        IssueKind::Math => "Arithmetic",
        IssueKind::Confidence => "Confidence",
    }
}

fn print_issue(issue: &Issue) {
    let marker = match issue.severity {
        Severity::Error => "error",
        Severity::Warning => "warn ",
    };
    match issue.row_index {
        Some(row) => println!("  [{marker}] {} (row {row})", issue.message),
        None => println!("  [{marker}] {}", issue.message),
    }
}

/// Print issues grouped by rule family, then a one-line summary.
pub fn print_validation(result: &ValidationResult) {
    if result.is_valid() {
        println!("No issues found.");
        return;
    }

    for kind in KIND_ORDER {
        let group: Vec<&Issue> = result.issues.iter().filter(|i| i.kind == *kind).collect();
        if group.is_empty() {
            continue;
        }
        println!("=== {} ===", kind_heading(*kind));
        for issue in group {
            print_issue(issue);
        }
        println!();
    }

    let errors = result
        .issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let warnings = result.issues.len() - errors;
    println!("{errors} error(s), {warnings} warning(s)");
    if result.has_blockers() {
        println!("Export is blocked until error-severity issues are resolved.");
    }
}

/// Print a regression report.
pub fn print_regression(report: &RegressionReport) {
    match &report.message {
        Some(message) => println!(
            "[{}] {} (at {})",
            report.severity.as_str(),
            message,
            report.timestamp.to_rfc3339()
        ),
        None => println!("[none] no regression detected"),
    }
}
