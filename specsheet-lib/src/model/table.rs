//! The table model: column definitions, column order and the row sequence.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::order::{is_permutation_of, move_item};
use super::row::normalize_note;
use super::{CellFlags, Column, DEFAULT_COLUMN_WIDTH, Row, Value};
use crate::error::{ItemKind, TableError, ValidationError};
use crate::id::{ColumnId, IdAllocator, RowId, UuidIds};

/// Smallest width a column may be resized to unless configured otherwise.
pub const MIN_COLUMN_WIDTH: u32 = 40;

/// The canonical in-memory table.
///
/// Columns are stored by id with a separate order sequence; rows are stored
/// in display order. All mutations are synchronous and either succeed
/// completely or leave the model untouched.
#[derive(Debug)]
pub struct TableModel {
    /// Column definitions by id.
    columns: HashMap<ColumnId, Column>,
    /// Display order of columns. Always a permutation of `columns` keys.
    column_order: Vec<ColumnId>,
    /// Rows in display order.
    rows: Vec<Row>,
    /// Source of fresh ids for added rows and columns.
    ids: Box<dyn IdAllocator>,
    default_column_width: u32,
    min_column_width: u32,
}

impl Default for TableModel {
    fn default() -> Self {
        Self::new(UuidIds)
    }
}

impl TableModel {
    /// Create an empty model with the given id allocator.
    pub fn new(ids: impl IdAllocator + 'static) -> Self {
        Self::with_allocator(Box::new(ids))
    }

    /// Create an empty model with a boxed id allocator.
    pub fn with_allocator(ids: Box<dyn IdAllocator>) -> Self {
        Self {
            columns: HashMap::new(),
            column_order: Vec::new(),
            rows: Vec::new(),
            ids,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_column_width: MIN_COLUMN_WIDTH,
        }
    }

    /// Create a model holding the given columns (in order) and rows.
    pub fn from_parts(
        columns: Vec<Column>,
        rows: Vec<Row>,
        ids: impl IdAllocator + 'static,
    ) -> Result<Self, TableError> {
        let mut model = Self::new(ids);
        model.replace(columns, rows)?;
        Ok(model)
    }

    /// Set the width given to new columns and the minimum accepted width.
    pub fn with_column_widths(mut self, default_width: u32, min_width: u32) -> Self {
        self.default_column_width = default_width;
        self.min_column_width = min_width;
        self
    }

    /// Replace every column and row, re-deriving the column order from the
    /// order of `columns`.
    pub fn replace(&mut self, columns: Vec<Column>, rows: Vec<Row>) -> Result<(), TableError> {
        let mut defs = HashMap::with_capacity(columns.len());
        let mut order = Vec::with_capacity(columns.len());
        for column in columns {
            if defs.contains_key(&column.id) {
                return Err(ValidationError::DuplicateId {
                    kind: ItemKind::Column,
                    id: column.id.to_string(),
                }
                .into());
            }
            order.push(column.id.clone());
            defs.insert(column.id.clone(), column);
        }

        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !seen.insert(&row.id) {
                return Err(ValidationError::DuplicateId {
                    kind: ItemKind::Row,
                    id: row.id.to_string(),
                }
                .into());
            }
            check_row(&defs, row)?;
        }

        debug!("Table replaced: {} columns, {} rows", order.len(), rows.len());
        self.columns = defs;
        self.column_order = order;
        self.rows = rows;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Column access
    // -------------------------------------------------------------------------

    /// Column ids in display order.
    pub fn column_order(&self) -> &[ColumnId] {
        &self.column_order
    }

    /// Column definitions in display order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.column_order.iter().filter_map(|id| self.columns.get(id))
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.column_order.iter().position(|c| c == id)
    }

    pub fn contains_column(&self, id: &ColumnId) -> bool {
        self.columns.contains_key(id)
    }

    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    pub fn min_column_width(&self) -> u32 {
        self.min_column_width
    }

    // -------------------------------------------------------------------------
    // Row access
    // -------------------------------------------------------------------------

    /// Rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_ids(&self) -> impl Iterator<Item = &RowId> + '_ {
        self.rows.iter().map(|r| &r.id)
    }

    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|r| &r.id == id)
    }

    pub fn row_index(&self, id: &RowId) -> Option<usize> {
        self.rows.iter().position(|r| &r.id == id)
    }

    pub fn contains_row(&self, id: &RowId) -> bool {
        self.row_index(id).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the stored value of a cell, if any.
    pub fn cell(&self, row: &RowId, column: &ColumnId) -> Option<&Value> {
        self.row(row).and_then(|r| r.get(column))
    }

    /// Returns `true` if the column order is a permutation of the live
    /// column ids.
    pub fn is_consistent(&self) -> bool {
        self.column_order.len() == self.columns.len()
            && is_permutation_of(&self.column_order, self.columns.keys())
    }

    // -------------------------------------------------------------------------
    // Row mutations
    // -------------------------------------------------------------------------

    /// Insert an empty row at `index` (clamped to the row count).
    pub fn add_row(&mut self, index: usize) -> RowId {
        let id = self.fresh_row_id();
        let index = index.min(self.rows.len());
        self.rows.insert(index, Row::new(id.clone()));
        debug!("Row '{}' added at {}", id, index);
        id
    }

    /// Insert a row with initial values at `index` (clamped).
    pub fn add_row_with<I>(&mut self, index: usize, values: I) -> Result<RowId, TableError>
    where
        I: IntoIterator<Item = (ColumnId, Value)>,
    {
        let mut cells = HashMap::new();
        for (column_id, value) in values {
            check_cell(&self.columns, &column_id, &value)?;
            cells.insert(column_id, value);
        }
        let id = self.add_row(index);
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.cells = cells;
        }
        Ok(id)
    }

    /// Insert a fully built row at `index` (clamped), keeping its id.
    pub fn insert_row(&mut self, index: usize, row: Row) -> Result<usize, TableError> {
        if self.contains_row(&row.id) {
            return Err(ValidationError::DuplicateId {
                kind: ItemKind::Row,
                id: row.id.to_string(),
            }
            .into());
        }
        check_row(&self.columns, &row)?;
        let index = index.min(self.rows.len());
        debug!("Row '{}' inserted at {}", row.id, index);
        self.rows.insert(index, row);
        Ok(index)
    }

    /// Remove a row, returning its former index and contents.
    pub fn delete_row(&mut self, id: &RowId) -> Result<(usize, Row), TableError> {
        let index = self.row_index(id).ok_or_else(|| {
            warn!("Delete of unknown row '{}'", id);
            TableError::row_not_found(id.as_str())
        })?;
        let row = self.rows.remove(index);
        debug!("Row '{}' deleted from {}", id, index);
        Ok((index, row))
    }

    /// Move the row at `from` to `to`. Returns `false` when they are equal.
    pub fn reorder_rows(&mut self, from: usize, to: usize) -> Result<bool, TableError> {
        check_index(ItemKind::Row, from, self.rows.len())?;
        check_index(ItemKind::Row, to, self.rows.len())?;
        if from == to {
            return Ok(false);
        }
        move_item(&mut self.rows, from, to);
        debug!("Row moved {} -> {}", from, to);
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Column mutations
    // -------------------------------------------------------------------------

    /// Insert a column definition with its id at `index` (clamped) in the
    /// column order. Returns the index it landed at.
    pub fn add_column(&mut self, index: usize, column: Column) -> Result<usize, TableError> {
        if self.columns.contains_key(&column.id) {
            return Err(ValidationError::DuplicateId {
                kind: ItemKind::Column,
                id: column.id.to_string(),
            }
            .into());
        }
        self.check_width(&column.id, column.width)?;

        let index = index.min(self.column_order.len());
        debug!("Column '{}' added at {}", column.id, index);
        self.column_order.insert(index, column.id.clone());
        self.columns.insert(column.id.clone(), column);
        Ok(index)
    }

    /// Insert a new string column with a fresh id and the default width.
    pub fn add_new_column(
        &mut self,
        index: usize,
        header: impl Into<String>,
    ) -> Result<ColumnId, TableError> {
        let id = self.fresh_column_id();
        let column = Column::new(id.clone(), header).with_width(self.default_column_width);
        self.add_column(index, column)?;
        Ok(id)
    }

    /// Remove a column definition, its order entry and every cell stored
    /// under it. Returns its former index and definition.
    pub fn delete_column(&mut self, id: &ColumnId) -> Result<(usize, Column), TableError> {
        let Some(column) = self.columns.remove(id) else {
            warn!("Delete of unknown column '{}'", id);
            return Err(TableError::column_not_found(id.as_str()));
        };
        let index = self.column_order.iter().position(|c| c == id).unwrap_or(0);
        self.column_order.retain(|c| c != id);
        for row in &mut self.rows {
            row.drop_column(id);
        }
        debug!("Column '{}' deleted from {}", id, index);
        Ok((index, column))
    }

    /// Change a column's header text. Returns the previous header.
    pub fn rename_column(
        &mut self,
        id: &ColumnId,
        header: impl Into<String>,
    ) -> Result<String, TableError> {
        let column = self
            .columns
            .get_mut(id)
            .ok_or_else(|| TableError::column_not_found(id.as_str()))?;
        let previous = std::mem::replace(&mut column.header, header.into());
        debug!("Column '{}' renamed '{}' -> '{}'", id, previous, column.header);
        Ok(previous)
    }

    /// Change a column's width. Returns the previous width.
    pub fn resize_column(&mut self, id: &ColumnId, width: u32) -> Result<u32, TableError> {
        if !self.columns.contains_key(id) {
            return Err(TableError::column_not_found(id.as_str()));
        }
        self.check_width(id, width)?;
        let column = self
            .columns
            .get_mut(id)
            .ok_or_else(|| TableError::column_not_found(id.as_str()))?;
        let previous = std::mem::replace(&mut column.width, width);
        debug!("Column '{}' resized {} -> {}", id, previous, width);
        Ok(previous)
    }

    /// Move the column at `from` to `to` in the column order. Returns
    /// `false` when they are equal.
    pub fn reorder_columns(&mut self, from: usize, to: usize) -> Result<bool, TableError> {
        check_index(ItemKind::Column, from, self.column_order.len())?;
        check_index(ItemKind::Column, to, self.column_order.len())?;
        if from == to {
            return Ok(false);
        }
        move_item(&mut self.column_order, from, to);
        debug!("Column moved {} -> {}", from, to);
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Cell mutations
    // -------------------------------------------------------------------------

    /// Overwrite one cell. Returns the previous value (`Null` if unset).
    pub fn set_cell(
        &mut self,
        row_id: &RowId,
        column_id: &ColumnId,
        value: Value,
    ) -> Result<Value, TableError> {
        check_cell(&self.columns, column_id, &value)?;
        let row = self
            .rows
            .iter_mut()
            .find(|r| &r.id == row_id)
            .ok_or_else(|| TableError::row_not_found(row_id.as_str()))?;
        debug!("Cell ({}, {}) set to {:?}", row_id, column_id, value);
        Ok(row
            .cells
            .insert(column_id.clone(), value)
            .unwrap_or_default())
    }

    /// Parse `text` as the column's data type and write it to the cell.
    pub fn set_cell_text(
        &mut self,
        row_id: &RowId,
        column_id: &ColumnId,
        text: &str,
    ) -> Result<Value, TableError> {
        let column = self
            .columns
            .get(column_id)
            .ok_or_else(|| ValidationError::UnknownColumn(column_id.to_string()))?;
        let data_type = column.data_type();
        let value = data_type.parse(text).ok_or_else(|| {
            ValidationError::type_mismatch(column_id.as_str(), data_type.name(), format!("'{}'", text))
        })?;
        self.set_cell(row_id, column_id, value)
    }

    /// Replace the flags of one cell. Returns the previous flags.
    pub fn set_cell_flags(
        &mut self,
        row_id: &RowId,
        column_id: &ColumnId,
        flags: CellFlags,
    ) -> Result<CellFlags, TableError> {
        if !self.columns.contains_key(column_id) {
            return Err(ValidationError::UnknownColumn(column_id.to_string()).into());
        }
        let row = self
            .rows
            .iter_mut()
            .find(|r| &r.id == row_id)
            .ok_or_else(|| TableError::row_not_found(row_id.as_str()))?;
        let previous = if flags.is_empty() {
            row.flags.remove(column_id)
        } else {
            row.flags.insert(column_id.clone(), flags)
        };
        Ok(previous.unwrap_or_default())
    }

    /// Replace a row's discussion note. Blank text clears it. Returns the
    /// previous note.
    pub fn set_row_note(
        &mut self,
        row_id: &RowId,
        note: Option<String>,
    ) -> Result<Option<String>, TableError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| &r.id == row_id)
            .ok_or_else(|| TableError::row_not_found(row_id.as_str()))?;
        let previous = std::mem::replace(&mut row.note, normalize_note(note));
        debug!("Row '{}' note updated", row_id);
        Ok(previous)
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn fresh_row_id(&mut self) -> RowId {
        loop {
            let id = self.ids.next_row_id();
            if !self.contains_row(&id) {
                return id;
            }
            warn!("Allocator produced live row id '{}', drawing again", id);
        }
    }

    fn fresh_column_id(&mut self) -> ColumnId {
        loop {
            let id = self.ids.next_column_id();
            if !self.columns.contains_key(&id) {
                return id;
            }
            warn!("Allocator produced live column id '{}', drawing again", id);
        }
    }

    fn check_width(&self, id: &ColumnId, width: u32) -> Result<(), ValidationError> {
        let min = self.min_column_width.max(1);
        if width < min {
            return Err(ValidationError::WidthTooSmall {
                column: id.to_string(),
                width,
                min,
            });
        }
        Ok(())
    }
}

fn check_index(axis: ItemKind, index: usize, len: usize) -> Result<(), ValidationError> {
    if index >= len {
        return Err(ValidationError::out_of_bounds(axis, index, len));
    }
    Ok(())
}

/// Validate every cell value and flag key of a row against live columns.
fn check_row(columns: &HashMap<ColumnId, Column>, row: &Row) -> Result<(), ValidationError> {
    for (column_id, value) in &row.cells {
        check_cell(columns, column_id, value)?;
    }
    if let Some(column_id) = row.flags.keys().find(|c| !columns.contains_key(*c)) {
        return Err(ValidationError::UnknownColumn(column_id.to_string()));
    }
    Ok(())
}

/// Validate a value against the declared type of a live column.
fn check_cell(
    columns: &HashMap<ColumnId, Column>,
    column_id: &ColumnId,
    value: &Value,
) -> Result<(), ValidationError> {
    let column = columns
        .get(column_id)
        .ok_or_else(|| ValidationError::UnknownColumn(column_id.to_string()))?;
    let data_type = column.data_type();
    let describe = || format!("{} '{}'", value.type_name(), value);

    if !data_type.accepts(value) {
        return Err(ValidationError::type_mismatch(
            column_id.as_str(),
            data_type.name(),
            describe(),
        ));
    }
    if let Value::Enum(label) = value {
        let options = &column.metadata.options;
        if !options.is_empty() && !options.contains(label) {
            return Err(ValidationError::type_mismatch(
                column_id.as_str(),
                "one of the declared options",
                describe(),
            ));
        }
    }
    Ok(())
}
