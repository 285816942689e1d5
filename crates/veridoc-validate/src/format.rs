//! Field-format pass: per-key shape checks over the flat view.
//!
//! Rule families are selected by the key *name* (case-insensitive substring
//! match). That dispatch is brittle under renaming, so each heuristic lives
//! behind a named classifier fn; swapping in explicit field-role tags later
//! only touches this module. Keys matching no family are not inspected.

use std::sync::LazyLock;

use regex::Regex;
use veridoc_core::FlatView;

use crate::coerce::parse_flexible_date;
use crate::issue::{Issue, IssueKind, Severity};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

fn is_email_key(key: &str) -> bool {
    key.contains("email") || key.contains("e-mail")
}

fn is_phone_key(key: &str) -> bool {
    key.contains("phone") || key.contains("mobile") || key.contains("fax")
}

fn is_date_key(key: &str) -> bool {
    let named_like_date =
        ["date", "dob", "due", "expires"].iter().any(|m| key.contains(m));
    let excluded = key.contains("update") || key.contains("candidate");
    named_like_date && !excluded
}

fn is_url_key(key: &str) -> bool {
    key.contains("website") || key.contains("url")
}

/// A phone value should be mostly digits and punctuation; letters beyond an
/// extension marker ("ext"/"x") are suspicious, and fewer than five digits is
/// not a dialable number.
fn phone_looks_valid(value: &str) -> bool {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < 5 {
        return false;
    }
    let without_ext = value.to_lowercase().replace("ext", "").replace('x', "");
    !without_ext.chars().any(|c| c.is_alphabetic())
}

fn url_looks_valid(value: &str) -> bool {
    value.contains('.') && !value.chars().any(char::is_whitespace)
}

/// Run the format pass. Warning-severity issues only; a value the rule cannot
/// read counts as a violation of its family, never as a pass failure.
pub fn check_formats(flat: &FlatView) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (key, value) in flat.iter() {
        let lower = key.to_lowercase();

        if is_email_key(&lower) && !EMAIL_RE.is_match(value) {
            issues.push(format_issue(key, format!("\"{value}\" does not look like a valid email address")));
        } else if is_phone_key(&lower) && !phone_looks_valid(value) {
            issues.push(format_issue(key, format!("\"{value}\" does not look like a valid phone number")));
        } else if is_date_key(&lower) && parse_flexible_date(value).is_none() {
            issues.push(format_issue(key, format!("\"{value}\" could not be read as a calendar date")));
        } else if is_url_key(&lower) && !url_looks_valid(value) {
            issues.push(format_issue(key, format!("\"{value}\" does not look like a valid URL")));
        }
    }

    issues
}

fn format_issue(key: &str, detail: String) -> Issue {
    Issue::new(
        IssueKind::Format,
        Severity::Warning,
        format!("{key}: {detail}"),
        vec![key.to_string()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use veridoc_core::flatten;
    use veridoc_core::{
        ConfidenceField, DocumentMeta, LabeledField, Section, Snapshot, StructuredData,
    };

    fn snapshot_with_fields(fields: Vec<(&str, &str)>) -> Snapshot {
        Snapshot {
            document_type: "form".into(),
            confidence_score: 90,
            meta: DocumentMeta::default(),
            structured_data: StructuredData {
                title: ConfidenceField::text("Form", 95),
                sections: vec![Section {
                    heading: "Contact".into(),
                    content: fields
                        .into_iter()
                        .map(|(label, value)| LabeledField {
                            label: label.into(),
                            field: ConfidenceField::text(value, 90),
                        })
                        .collect(),
                }],
                tables: vec![],
            },
            raw_text_summary: String::new(),
        }
    }

    fn issues_for(fields: Vec<(&str, &str)>) -> Vec<Issue> {
        check_formats(&flatten(&snapshot_with_fields(fields)))
    }

    #[test]
    fn bad_email_flagged_good_email_not() {
        assert_eq!(issues_for(vec![("Email", "not-an-email")]).len(), 1);
        assert!(issues_for(vec![("Email", "ana@example.com")]).is_empty());
    }

    #[test]
    fn phone_with_letters_flagged() {
        assert_eq!(issues_for(vec![("Phone", "call me maybe")]).len(), 1);
        assert!(issues_for(vec![("Phone", "+44 20 7946 0958")]).is_empty());
    }

    #[test]
    fn phone_extension_marker_allowed() {
        assert!(issues_for(vec![("Phone", "020 7946 0958 ext 12")]).is_empty());
    }

    #[test]
    fn short_phone_flagged() {
        assert_eq!(issues_for(vec![("Phone", "123")]).len(), 1);
    }

    #[test]
    fn date_keys_checked_but_update_keys_skipped() {
        assert_eq!(issues_for(vec![("Due Date", "soonish")]).len(), 1);
        assert!(issues_for(vec![("Due Date", "2024-03-12")]).is_empty());
        // "Last Update" contains "date"-adjacent wording but is excluded.
        assert!(issues_for(vec![("Last Update", "soonish")]).is_empty());
    }

    #[test]
    fn url_needs_dot_and_no_whitespace() {
        assert_eq!(issues_for(vec![("Website", "not a url")]).len(), 1);
        assert!(issues_for(vec![("Website", "example.com")]).is_empty());
    }

    #[test]
    fn unrelated_keys_not_inspected() {
        assert!(issues_for(vec![("Notes", "anything at all !!")]).is_empty());
    }

    #[test]
    fn issues_are_warnings_with_the_key_named() {
        let issues = issues_for(vec![("Email", "nope")]);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].kind, IssueKind::Format);
        assert_eq!(issues[0].involved_keys, vec!["Contact > Email".to_string()]);
    }
}
