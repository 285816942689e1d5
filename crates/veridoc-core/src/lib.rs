pub mod flatten;
pub mod snapshot;
pub mod walk;

pub use flatten::{FlatView, TITLE_KEY, flatten, section_key, table_summary};
pub use snapshot::{
    ConfidenceField, DocumentMeta, LabeledField, Scalar, Section, Snapshot, StructuredData, Table,
    TableRow,
};
pub use walk::{FieldRef, NodeKind, walk_fields};
