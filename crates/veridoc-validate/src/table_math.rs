//! Per-table arithmetic rule: quantity × unit price must equal the row total.
//!
//! Runs per table rather than over the flat view because it needs row-local
//! column identity: the flat view only carries a row-count summary.

use veridoc_core::{ConfidenceField, Scalar, Table, TableRow};

use crate::coerce::coerce_amount;
use crate::issue::{Issue, IssueKind, Severity};
use crate::logic::AMOUNT_TOLERANCE;

fn is_quantity_column(name: &str) -> bool {
    name.contains("qty") || name.contains("quantity")
}

fn is_price_column(name: &str) -> bool {
    name.contains("price") || name.contains("rate") || name.contains("unit cost")
}

fn is_total_column(name: &str) -> bool {
    name.contains("total") || name.contains("amount")
}

fn numeric_cell(field: &ConfidenceField) -> Option<f64> {
    match field.value.as_ref()? {
        Scalar::Number(n) => Some(*n),
        Scalar::Text(s) => {
            let n = coerce_amount(s);
            (n != 0.0 || s.trim() == "0").then_some(n)
        }
        Scalar::Bool(_) => None,
    }
}

fn find_column<'a>(row: &'a TableRow, pred: impl Fn(&str) -> bool) -> Option<(&'a str, f64)> {
    row.iter().find_map(|(column, cell)| {
        if pred(&column.to_lowercase()) {
            Some((column.as_str(), numeric_cell(cell)?))
        } else {
            None
        }
    })
}

/// Check every row of a table. Rows missing any of the three roles, or with
/// unreadable cells, are skipped rather than flagged.
pub fn check_table(table: &Table) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (row_index, row) in table.rows.iter().enumerate() {
        let Some((qty_col, qty)) = find_column(row, is_quantity_column) else {
            continue;
        };
        let Some((price_col, price)) = find_column(row, is_price_column) else {
            continue;
        };
        let Some((total_col, total)) = find_column(row, is_total_column) else {
            continue;
        };

        if (qty * price - total).abs() > AMOUNT_TOLERANCE {
            issues.push(
                Issue::new(
                    IssueKind::Math,
                    Severity::Error,
                    format!(
                        "{} row {row_index}: {qty_col} ({qty}) × {price_col} ({price}) does not equal {total_col} ({total})",
                        table.table_name
                    ),
                    vec![qty_col.to_string(), price_col.to_string(), total_col.to_string()],
                )
                .with_row(row_index),
            );
        }
    }

    issues
}
