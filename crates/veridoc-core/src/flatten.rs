//! Lossy projection of a snapshot into a flat, ordered key → value view.
//!
//! Both the regression detector and the validation engine compare and inspect
//! snapshots through this view, so key construction is defined here once:
//! the same snapshot must always flatten to the same keys in the same order.
//!
//! Tables are summarised by row count only. Table *content* regression is
//! handled structurally elsewhere; flattening rows would turn harmless
//! row-order changes into false key losses.

use indexmap::IndexMap;

use crate::snapshot::Snapshot;

/// Flat key used for the document title.
pub const TITLE_KEY: &str = "Document Title";

/// Flat key for a field inside a section: `"<heading> > <label>"`.
pub fn section_key(heading: &str, label: &str) -> String {
    format!("{heading} > {label}")
}

/// Summary value emitted for a table.
pub fn table_summary(row_count: usize) -> String {
    format!("[Table: {row_count} rows]")
}

/// Insertion-ordered flat view of a snapshot. Read-only for callers; every
/// call to [`flatten`] allocates a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatView(IndexMap<String, String>);

impl FlatView {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Project a snapshot into a [`FlatView`].
///
/// Emits, in document order: the title (when non-null), one entry per section
/// field (null values omitted), and one row-count summary per table. When all
/// of those produce nothing — a degenerate or legacy snapshot — falls back to
/// a shallow dump of the snapshot's own top-level scalars so callers always
/// have something to show and compare.
pub fn flatten(snapshot: &Snapshot) -> FlatView {
    let mut map = IndexMap::new();

    if let Some(title) = snapshot.structured_data.title.display_value() {
        map.insert(TITLE_KEY.to_string(), title);
    }

    for section in &snapshot.structured_data.sections {
        for entry in &section.content {
            if let Some(value) = entry.field.display_value() {
                map.insert(section_key(&section.heading, &entry.label), value);
            }
        }
    }

    for table in &snapshot.structured_data.tables {
        map.insert(table.table_name.clone(), table_summary(table.rows.len()));
    }

    if map.is_empty() {
        map.insert("documentType".to_string(), snapshot.document_type.clone());
        map.insert(
            "confidenceScore".to_string(),
            snapshot.confidence_score.to_string(),
        );
        if !snapshot.raw_text_summary.is_empty() {
            map.insert(
                "rawTextSummary".to_string(),
                snapshot.raw_text_summary.clone(),
            );
        }
    }

    FlatView(map)
}
