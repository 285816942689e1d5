//! Adapter from the service's raw JSON payload to a typed [`Snapshot`].
//!
//! Deliberately tolerant: the service's output drifts, and a half-usable
//! extraction is worth more than none. Confidences are clamped into [0, 100],
//! missing meta flags default to false, and malformed sections or cells are
//! skipped with a log line rather than failing the document. Only a payload
//! that is not a JSON object at all is rejected.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;
use veridoc_core::{
    ConfidenceField, DocumentMeta, LabeledField, Scalar, Section, Snapshot, StructuredData, Table,
    TableRow,
};

use crate::client::ExtractError;

fn scalar_from(value: &Value) -> Option<Scalar> {
    match value {
        Value::Bool(b) => Some(Scalar::Bool(*b)),
        Value::Number(n) => n.as_f64().map(Scalar::Number),
        Value::String(s) => Some(Scalar::Text(s.clone())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn clamp_confidence(value: &Value) -> u8 {
    value
        .get("confidence")
        .and_then(Value::as_f64)
        .map(|c| c.clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

/// Read one `{ value, confidence }` object. A bare scalar is accepted as a
/// value the service forgot to score (confidence 0).
fn field_from(value: &Value) -> ConfidenceField {
    if value.is_object() {
        ConfidenceField::new(
            value.get("value").and_then(scalar_from),
            clamp_confidence(value),
        )
    } else {
        ConfidenceField::new(scalar_from(value), 0)
    }
}

fn sections_from(value: Option<&Value>) -> Vec<Section> {
    let Some(raw_sections) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    raw_sections
        .iter()
        .filter_map(|raw| {
            let Some(heading) = raw.get("heading").and_then(Value::as_str) else {
                warn!("skipping section without a heading");
                return None;
            };
            let content = raw
                .get("content")
                .and_then(Value::as_array)
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(|entry| {
                            let label = entry.get("label").and_then(Value::as_str)?;
                            Some(LabeledField {
                                label: label.to_string(),
                                field: field_from(entry),
                            })
                        })
                        .collect()
                })
                .unwrap_or_default();
            Some(Section {
                heading: heading.to_string(),
                content,
            })
        })
        .collect()
}

fn tables_from(value: Option<&Value>) -> Vec<Table> {
    let Some(raw_tables) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    raw_tables
        .iter()
        .filter_map(|raw| {
            let Some(name) = raw.get("tableName").and_then(Value::as_str) else {
                warn!("skipping table without a name");
                return None;
            };
            let headers = raw
                .get("headers")
                .and_then(Value::as_array)
                .map(|h| {
                    h.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            let rows = raw
                .get("rows")
                .and_then(Value::as_array)
                .map(|rows| rows.iter().filter_map(row_from).collect())
                .unwrap_or_default();
            Some(Table {
                table_name: name.to_string(),
                headers,
                rows,
            })
        })
        .collect()
}

fn row_from(raw: &Value) -> Option<TableRow> {
    let cells = raw.as_object()?;
    let mut row = IndexMap::new();
    for (column, cell) in cells {
        row.insert(column.clone(), field_from(cell));
    }
    Some(row)
}

/// Adapt a raw extraction payload into a typed snapshot.
pub fn adapt_payload(raw: &Value) -> Result<Snapshot, ExtractError> {
    if !raw.is_object() {
        return Err(ExtractError::Payload(
            "expected a JSON object at the top level".to_string(),
        ));
    }

    let structured = raw.get("structuredData");

    Ok(Snapshot {
        document_type: raw
            .get("documentType")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        confidence_score: clamp_confidence_score(raw),
        meta: DocumentMeta {
            has_tables: meta_flag(raw, "hasTables"),
            has_handwriting: meta_flag(raw, "hasHandwriting"),
            page_count: raw
                .get("meta")
                .and_then(|m| m.get("pageCount"))
                .and_then(Value::as_u64)
                .map(|n| n as u32),
            language: raw
                .get("meta")
                .and_then(|m| m.get("language"))
                .and_then(Value::as_str)
                .map(str::to_string),
        },
        structured_data: StructuredData {
            title: structured
                .and_then(|s| s.get("title"))
                .map(field_from)
                .unwrap_or_else(|| ConfidenceField::absent(0)),
            sections: sections_from(structured.and_then(|s| s.get("sections"))),
            tables: tables_from(structured.and_then(|s| s.get("tables"))),
        },
        raw_text_summary: raw
            .get("rawTextSummary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

fn clamp_confidence_score(raw: &Value) -> u8 {
    raw.get("confidenceScore")
        .and_then(Value::as_f64)
        .map(|c| c.clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

fn meta_flag(raw: &Value, flag: &str) -> bool {
    raw.get("meta")
        .and_then(|m| m.get(flag))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_payload_adapts() {
        let raw = json!({
            "documentType": "invoice",
            "confidenceScore": 91,
            "meta": { "hasTables": true, "hasHandwriting": false, "pageCount": 2 },
            "structuredData": {
                "title": { "value": "Invoice #7", "confidence": 95 },
                "sections": [{
                    "heading": "Billing",
                    "content": [
                        { "label": "Total", "value": "110.00", "confidence": 92 },
                        { "label": "PO Number", "value": null, "confidence": 60 }
                    ]
                }],
                "tables": [{
                    "tableName": "Line Items",
                    "headers": ["qty", "price", "total"],
                    "rows": [{
                        "qty": { "value": 2, "confidence": 90 },
                        "price": { "value": 5, "confidence": 88 },
                        "total": { "value": 10, "confidence": 85 }
                    }]
                }]
            },
            "rawTextSummary": "An invoice."
        });

        let snapshot = adapt_payload(&raw).unwrap();
        assert_eq!(snapshot.document_type, "invoice");
        assert_eq!(snapshot.confidence_score, 91);
        assert!(snapshot.meta.has_tables);
        assert_eq!(snapshot.meta.page_count, Some(2));
        assert_eq!(snapshot.structured_data.sections.len(), 1);
        let po = &snapshot.structured_data.sections[0].content[1];
        assert!(po.field.value.is_none());
        assert_eq!(po.field.confidence, 60);
        assert_eq!(snapshot.structured_data.tables[0].rows.len(), 1);
    }

    #[test]
    fn out_of_range_confidences_clamped() {
        let raw = json!({
            "documentType": "invoice",
            "confidenceScore": 140,
            "structuredData": {
                "title": { "value": "X", "confidence": -3 }
            }
        });
        let snapshot = adapt_payload(&raw).unwrap();
        assert_eq!(snapshot.confidence_score, 100);
        assert_eq!(snapshot.structured_data.title.confidence, 0);
    }

    #[test]
    fn malformed_sections_skipped_not_fatal() {
        let raw = json!({
            "documentType": "invoice",
            "confidenceScore": 80,
            "structuredData": {
                "title": { "value": "X", "confidence": 90 },
                "sections": [
                    { "content": [] },
                    { "heading": "Ok", "content": [{ "label": "A", "value": "1", "confidence": 80 }] }
                ]
            }
        });
        let snapshot = adapt_payload(&raw).unwrap();
        assert_eq!(snapshot.structured_data.sections.len(), 1);
        assert_eq!(snapshot.structured_data.sections[0].heading, "Ok");
    }

    #[test]
    fn missing_everything_defaults() {
        let snapshot = adapt_payload(&json!({})).unwrap();
        assert_eq!(snapshot.document_type, "unknown");
        assert_eq!(snapshot.confidence_score, 0);
        assert!(!snapshot.meta.has_tables);
        assert!(snapshot.structured_data.title.value.is_none());
    }

    #[test]
    fn non_object_payload_rejected() {
        assert!(adapt_payload(&json!("just a string")).is_err());
        assert!(adapt_payload(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn bare_scalar_field_accepted_with_zero_confidence() {
        let raw = json!({
            "documentType": "note",
            "confidenceScore": 50,
            "structuredData": { "title": "Untitled" }
        });
        let snapshot = adapt_payload(&raw).unwrap();
        assert_eq!(
            snapshot.structured_data.title.display_value().as_deref(),
            Some("Untitled")
        );
        assert_eq!(snapshot.structured_data.title.confidence, 0);
    }
}
