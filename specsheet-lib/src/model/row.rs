//! Rows and per-cell properties

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Value;
use crate::id::{ColumnId, RowId};

/// Per-cell data-handling flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFlags {
    #[serde(default)]
    pub contains_pii: bool,
    #[serde(default)]
    pub end_to_end_encryption: bool,
}

impl CellFlags {
    pub fn is_empty(&self) -> bool {
        !self.contains_pii && !self.end_to_end_encryption
    }
}

/// A row: an id plus the values it holds, keyed by column id.
///
/// Columns with no entry read as [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub(crate) id: RowId,
    pub(crate) cells: HashMap<ColumnId, Value>,
    pub(crate) flags: HashMap<ColumnId, CellFlags>,
    /// Free-text discussion note shown in the row's detail panel.
    pub(crate) note: Option<String>,
}

impl Row {
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            cells: HashMap::new(),
            flags: HashMap::new(),
            note: None,
        }
    }

    /// Builder-style cell assignment. Values are not validated here; the
    /// model validates when the row is inserted.
    pub fn with_cell(mut self, column: impl Into<ColumnId>, value: impl Into<Value>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    /// Builder-style flag assignment. All-off flags are not stored.
    pub fn with_flags(mut self, column: impl Into<ColumnId>, flags: CellFlags) -> Self {
        if !flags.is_empty() {
            self.flags.insert(column.into(), flags);
        }
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = normalize_note(Some(note.into()));
        self
    }

    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Returns the value for a column, if one is stored.
    pub fn get(&self, column: &ColumnId) -> Option<&Value> {
        self.cells.get(column)
    }

    /// Returns the value for a column, or `Null` when absent.
    pub fn value(&self, column: &ColumnId) -> Value {
        self.cells.get(column).cloned().unwrap_or_default()
    }

    pub fn cells(&self) -> &HashMap<ColumnId, Value> {
        &self.cells
    }

    /// Returns the flags for a cell (all off when never set).
    pub fn flags(&self, column: &ColumnId) -> CellFlags {
        self.flags.get(column).copied().unwrap_or_default()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Cells with at least one flag set.
    pub fn flagged_cells(&self) -> &HashMap<ColumnId, CellFlags> {
        &self.flags
    }

    pub(crate) fn drop_column(&mut self, column: &ColumnId) {
        self.cells.remove(column);
        self.flags.remove(column);
    }
}

/// Blank notes are stored as no note.
pub(crate) fn normalize_note(note: Option<String>) -> Option<String> {
    note.filter(|n| !n.trim().is_empty())
}
