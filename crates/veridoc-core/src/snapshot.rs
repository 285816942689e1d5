//! Typed model for one immutable version of an AI-extracted document.
//!
//! A [`Snapshot`] is produced by the extraction service (via the adapter in
//! `veridoc-extract`) or by a local edit; it is never mutated in place. Edits
//! build a new snapshot and commit it to the version ledger, so entries held
//! by the ledger stay valid forever.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A leaf value extracted from a document.
///
/// Untagged on the wire: `true`, `12.5`, and `"ACME Ltd"` all deserialize to
/// the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Render for display and flattening. Whole numbers print without a
    /// fractional part so that flattened views are stable across edits.
    pub fn to_display_string(&self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

/// The atomic unit of extracted data: a value paired with the extractor's
/// certainty in it, 0–100.
///
/// `value` may be `None` when the field was looked for and not found; the
/// confidence then reflects certainty of the *absence*, so it is always
/// meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceField {
    #[serde(default)]
    pub value: Option<Scalar>,
    pub confidence: u8,
}

impl ConfidenceField {
    /// Build a field, clamping confidence into [0, 100].
    pub fn new(value: Option<Scalar>, confidence: u8) -> Self {
        Self {
            value,
            confidence: confidence.min(100),
        }
    }

    pub fn text(value: impl Into<String>, confidence: u8) -> Self {
        Self::new(Some(Scalar::Text(value.into())), confidence)
    }

    pub fn number(value: f64, confidence: u8) -> Self {
        Self::new(Some(Scalar::Number(value)), confidence)
    }

    /// A field the extractor looked for and did not find.
    pub fn absent(confidence: u8) -> Self {
        Self::new(None, confidence)
    }

    /// Display string for the value, `None` when the value is absent.
    pub fn display_value(&self) -> Option<String> {
        self.value.as_ref().map(Scalar::to_display_string)
    }
}

/// One labelled key/value pair inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledField {
    pub label: String,
    #[serde(flatten)]
    pub field: ConfidenceField,
}

/// A named form-like zone of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub content: Vec<LabeledField>,
}

/// One table row: column name → cell. Column sets may differ row to row.
pub type TableRow = IndexMap<String, ConfidenceField>;

/// A tabular extraction; every cell carries its own confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub table_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Structural capabilities and context the extraction service reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    #[serde(default)]
    pub has_tables: bool,
    #[serde(default)]
    pub has_handwriting: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// The extracted content of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredData {
    pub title: ConfidenceField,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// One immutable version of the extracted document — the unit of history.
///
/// `confidence_score` is the service's aggregate quality signal for the whole
/// document. It is observed independently of per-field confidences; nothing
/// here derives one from the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub document_type: String,
    pub confidence_score: u8,
    #[serde(default)]
    pub meta: DocumentMeta,
    pub structured_data: StructuredData,
    #[serde(default)]
    pub raw_text_summary: String,
}
