//! Exhaustive traversal over every confidence field in a snapshot.
//!
//! The confidence-tier validation pass needs row and section context that the
//! flat view deliberately drops, so it walks the typed structure instead.
//! Because the model is a closed set of shapes — title, section fields, table
//! cells — the walk is exhaustive by construction: there is no shape sniffing
//! and no leaf the compiler lets us forget.

use crate::flatten::{TITLE_KEY, section_key};
use crate::snapshot::{ConfidenceField, StructuredData};

/// Where a field sits in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Title,
    SectionField,
    TableCell { row: usize },
}

/// One confidence field together with its human-readable path, e.g.
/// `"Billing > Tax"` or `"Line Items[2] > price"`.
#[derive(Debug)]
pub struct FieldRef<'a> {
    pub path: String,
    pub field: &'a ConfidenceField,
    pub kind: NodeKind,
}

/// Collect every confidence field in document order.
///
/// Section fields reuse the flattener's key rule so validation issues and
/// regression reports name fields identically.
pub fn walk_fields(data: &StructuredData) -> Vec<FieldRef<'_>> {
    let mut out = Vec::new();

    out.push(FieldRef {
        path: TITLE_KEY.to_string(),
        field: &data.title,
        kind: NodeKind::Title,
    });

    for section in &data.sections {
        for entry in &section.content {
            out.push(FieldRef {
                path: section_key(&section.heading, &entry.label),
                field: &entry.field,
                kind: NodeKind::SectionField,
            });
        }
    }

    for table in &data.tables {
        for (row_index, row) in table.rows.iter().enumerate() {
            for (column, cell) in row {
                out.push(FieldRef {
                    path: format!("{}[{row_index}] > {column}", table.table_name),
                    field: cell,
                    kind: NodeKind::TableCell { row: row_index },
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ConfidenceField, LabeledField, Section, StructuredData, Table};
    use indexmap::IndexMap;

    #[test]
    fn walk_covers_title_sections_and_cells() {
        let mut row = IndexMap::new();
        row.insert("price".to_string(), ConfidenceField::number(5.0, 85));

        let data = StructuredData {
            title: ConfidenceField::text("Doc", 95),
            sections: vec![Section {
                heading: "Meta".into(),
                content: vec![LabeledField {
                    label: "Author".into(),
                    field: ConfidenceField::text("Ana", 72),
                }],
            }],
            tables: vec![Table {
                table_name: "Items".into(),
                headers: vec!["price".into()],
                rows: vec![row],
            }],
        };

        let fields = walk_fields(&data);
        let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["Document Title", "Meta > Author", "Items[0] > price"]);
        assert_eq!(fields[2].kind, NodeKind::TableCell { row: 0 });
    }

    #[test]
    fn absent_fields_still_visited() {
        let data = StructuredData {
            title: ConfidenceField::absent(40),
            sections: vec![],
            tables: vec![],
        };
        let fields = walk_fields(&data);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field.confidence, 40);
    }
}
