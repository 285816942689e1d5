//! Lenient value coercion shared by the format, logic, and table-math rules.
//!
//! Extracted values arrive as display strings ("$1,200.50", "12 March 2024"),
//! so every numeric or date rule goes through these helpers. Coercion never
//! fails loudly: a value that cannot be read degrades to "rule not applied"
//! at the call site.

use chrono::NaiveDate;

/// Parse a monetary-ish amount, stripping currency symbols, commas, and
/// whitespace. Defaults to 0.0 when nothing numeric remains.
pub fn coerce_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Accepted calendar date formats, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Try to read a calendar date out of a display string.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}
