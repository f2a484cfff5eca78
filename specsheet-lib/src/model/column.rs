//! Column definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DataType;
use crate::id::ColumnId;

/// Width used when a document does not give one.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;

/// Descriptive metadata attached to a column.
///
/// Known keys are typed; anything else in the document is kept in `extra`
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    /// Column holds personally identifiable information.
    #[serde(default)]
    pub is_pii: bool,
    /// Declared type that cell writes are validated against.
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Allowed labels for enum columns. Empty means unrestricted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A column definition.
///
/// Display position is not stored here; it lives in the model's column
/// order so columns can be reordered without touching their definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub header: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default)]
    pub metadata: ColumnMetadata,
}

fn default_width() -> u32 {
    DEFAULT_COLUMN_WIDTH
}

impl Column {
    /// Creates a string column with the default width.
    pub fn new(id: impl Into<ColumnId>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            width: DEFAULT_COLUMN_WIDTH,
            metadata: ColumnMetadata::default(),
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.metadata.data_type = data_type;
        self
    }

    pub fn with_pii(mut self, is_pii: bool) -> Self {
        self.metadata.is_pii = is_pii;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.metadata.comment = Some(comment.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn data_type(&self) -> DataType {
        self.metadata.data_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_document_column() {
        let json = r#"{
            "id": "col_status",
            "header": "Account Status",
            "width": 130,
            "metadata": { "isPii": false, "dataType": "enum", "comment": "Active/Pending/Banned", "owner": "crm" }
        }"#;
        let column: Column = serde_json::from_str(json).unwrap();

        assert_eq!(column.id.as_str(), "col_status");
        assert_eq!(column.width, 130);
        assert_eq!(column.data_type(), DataType::Enum);
        assert_eq!(column.metadata.comment.as_deref(), Some("Active/Pending/Banned"));
        assert_eq!(column.metadata.extra["owner"], serde_json::json!("crm"));
    }

    #[test]
    fn test_missing_width_uses_default() {
        let column: Column = serde_json::from_str(r#"{"id": "a", "header": "A"}"#).unwrap();
        assert_eq!(column.width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(column.data_type(), DataType::String);
    }
}
