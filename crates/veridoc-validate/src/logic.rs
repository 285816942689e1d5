//! Document-logic pass: cross-field consistency over the flat view.
//!
//! Two sub-checks: invoice/due date ordering, and tax/total/subtotal
//! arithmetic. Fields are located by key-name heuristics behind named
//! classifier fns, same approach as the format pass.

use veridoc_core::FlatView;

use crate::coerce::{coerce_amount, parse_flexible_date};
use crate::issue::{Issue, IssueKind, Severity};

/// Arithmetic slack for currency comparisons (rounding in the source doc).
pub const AMOUNT_TOLERANCE: f64 = 0.05;

fn is_invoice_date_key(key: &str) -> bool {
    key.contains("invoice") && key.contains("date")
}

fn is_due_date_key(key: &str) -> bool {
    key.contains("due")
}

fn is_tax_key(key: &str) -> bool {
    key.contains("tax")
}

fn is_total_key(key: &str) -> bool {
    key.contains("total") && !key.contains("sub")
}

fn is_subtotal_key(key: &str) -> bool {
    key.contains("subtotal") || (key.contains("sub") && key.contains("total"))
}

fn find<'a>(flat: &'a FlatView, pred: impl Fn(&str) -> bool) -> Option<(&'a str, &'a str)> {
    flat.iter().find(|(key, _)| pred(&key.to_lowercase()))
}

/// Run the document-logic pass.
pub fn check_document_logic(flat: &FlatView) -> Vec<Issue> {
    let mut issues = Vec::new();

    // Due date before the invoice date is almost always a mis-read.
    if let Some((invoice_key, invoice_raw)) = find(flat, is_invoice_date_key)
        && let Some((due_key, due_raw)) = find(flat, is_due_date_key)
        && let Some(invoice_date) = parse_flexible_date(invoice_raw)
        && let Some(due_date) = parse_flexible_date(due_raw)
        && due_date < invoice_date
    {
        issues.push(Issue::new(
            IssueKind::Logic,
            Severity::Warning,
            format!("due date ({due_raw}) is before the invoice date ({invoice_raw})"),
            vec![invoice_key.to_string(), due_key.to_string()],
        ));
    }

    if let Some((tax_key, tax_raw)) = find(flat, is_tax_key)
        && let Some((total_key, total_raw)) = find(flat, is_total_key)
    {
        let tax = coerce_amount(tax_raw);
        let total = coerce_amount(total_raw);

        if tax > total && total > 0.0 {
            issues.push(Issue::new(
                IssueKind::Logic,
                Severity::Error,
                format!("tax ({tax_raw}) exceeds the document total ({total_raw})"),
                vec![tax_key.to_string(), total_key.to_string()],
            ));
        }

        if let Some((subtotal_key, subtotal_raw)) = find(flat, is_subtotal_key) {
            let subtotal = coerce_amount(subtotal_raw);
            if (subtotal + tax - total).abs() > AMOUNT_TOLERANCE {
                issues.push(Issue::new(
                    IssueKind::Math,
                    Severity::Warning,
                    format!(
                        "subtotal ({subtotal_raw}) plus tax ({tax_raw}) does not add up to the total ({total_raw})"
                    ),
                    vec![
                        subtotal_key.to_string(),
                        tax_key.to_string(),
                        total_key.to_string(),
                    ],
                ));
            }
        }
    }

    issues
}
