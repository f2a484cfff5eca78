//! Specification documents: the JSON form a table is loaded from and saved to.

mod sample;

pub use sample::*;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, TableError, ValidationError};
use crate::id::{ColumnId, IdAllocator, RowId};
use crate::model::{CellFlags, Column, Row, TableModel, Value};

/// A named table as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecDocument {
    pub document_name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<DocumentRow>,
}

/// One row of a document: cell values keyed by column id.
///
/// Cells sit under their own key so any column id, including `id` or
/// `flags`, is a valid cell key. Rows without an `id` get a fresh one when
/// loaded into a model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, CellFlags>,
    #[serde(default)]
    pub cells: BTreeMap<String, serde_json::Value>,
}

impl DocumentRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    pub fn with_flags(mut self, column: impl Into<String>, flags: CellFlags) -> Self {
        self.flags.insert(column.into(), flags);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl SpecDocument {
    pub fn new(document_name: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let doc = Self::from_json(&json)?;
        info!("Loaded '{}' from {}", doc.document_name, path.display());
        Ok(doc)
    }

    /// Write the document as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!("Saved '{}' to {}", self.document_name, path.display());
        Ok(())
    }

    /// Snapshot a model: columns in display order, rows in order.
    pub fn from_model(document_name: impl Into<String>, model: &TableModel) -> Self {
        let columns: Vec<Column> = model.columns().cloned().collect();
        let rows = model
            .rows()
            .iter()
            .map(|row| DocumentRow {
                id: Some(row.id().to_string()),
                note: row.note().map(str::to_string),
                flags: row
                    .flagged_cells()
                    .iter()
                    .map(|(c, f)| (c.to_string(), *f))
                    .collect(),
                cells: row
                    .cells()
                    .iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(c, v)| (c.to_string(), value_to_json(v)))
                    .collect(),
            })
            .collect();
        Self {
            document_name: document_name.into(),
            columns,
            rows,
        }
    }

    /// Split into model parts, parsing each cell by its column's data type.
    ///
    /// `ids` fills in missing row ids and stays with the caller.
    pub fn to_parts(
        &self,
        ids: &mut dyn IdAllocator,
    ) -> Result<(Vec<Column>, Vec<Row>), TableError> {
        let by_id: HashMap<&ColumnId, &Column> = self.columns.iter().map(|c| (&c.id, c)).collect();
        let taken: HashSet<&str> = self.rows.iter().filter_map(|r| r.id.as_deref()).collect();

        let mut rows = Vec::with_capacity(self.rows.len());
        let mut generated = Vec::new();
        for doc_row in &self.rows {
            let id = match &doc_row.id {
                Some(id) => RowId::from(id.as_str()),
                None => loop {
                    let id = ids.next_row_id();
                    if !taken.contains(id.as_str()) && !generated.contains(&id) {
                        generated.push(id.clone());
                        break id;
                    }
                },
            };

            let mut row = Row::new(id);
            if let Some(note) = &doc_row.note {
                row = row.with_note(note.as_str());
            }
            for (key, raw) in &doc_row.cells {
                let column_id = ColumnId::from(key.as_str());
                let column = by_id
                    .get(&column_id)
                    .ok_or_else(|| ValidationError::UnknownColumn(key.clone()))?;
                row = row.with_cell(column_id, value_from_json(column, raw)?);
            }
            for (key, flags) in &doc_row.flags {
                let column_id = ColumnId::from(key.as_str());
                if !by_id.contains_key(&column_id) {
                    return Err(ValidationError::UnknownColumn(key.clone()).into());
                }
                row = row.with_flags(column_id, *flags);
            }
            rows.push(row);
        }

        if !generated.is_empty() {
            debug!("Generated {} row ids for '{}'", generated.len(), self.document_name);
        }
        Ok((self.columns.clone(), rows))
    }

    /// Build a model from this document.
    pub fn into_model(self, mut ids: impl IdAllocator + 'static) -> Result<TableModel, TableError> {
        let (columns, rows) = self.to_parts(&mut ids)?;
        TableModel::from_parts(columns, rows, ids)
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        other => serde_json::Value::String(other.to_text()),
    }
}

fn value_from_json(column: &Column, raw: &serde_json::Value) -> Result<Value, ValidationError> {
    let data_type = column.data_type();
    let text = match raw {
        serde_json::Value::Null => return Ok(Value::Null),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        other => {
            return Err(ValidationError::type_mismatch(
                column.id.as_str(),
                data_type.name(),
                other.to_string(),
            ));
        }
    };
    data_type.parse(&text).ok_or_else(|| {
        ValidationError::type_mismatch(column.id.as_str(), data_type.name(), format!("'{}'", text))
    })
}
