//! Host callbacks fired after committed changes.

use crate::id::{ColumnId, RowId};
use crate::model::Value;

/// Callbacks the host supplies to observe committed changes.
///
/// Each hook fires synchronously, once, after the model has been updated.
/// All methods default to no-ops so hosts implement only what they persist.
#[allow(unused_variables)]
pub trait TableHooks {
    fn on_add_row(&mut self, index: usize, row: &RowId) {}

    fn on_delete_row(&mut self, index: usize, row: &RowId) {}

    fn on_add_column(&mut self, index: usize, column: &ColumnId) {}

    fn on_delete_column(&mut self, index: usize, column: &ColumnId) {}

    fn on_rename_column(&mut self, column: &ColumnId, title: &str) {}

    fn on_rename_cell(&mut self, row: &RowId, column: &ColumnId, value: &Value) {}

    fn on_reorder_rows(&mut self, from: usize, to: usize) {}

    fn on_reorder_columns(&mut self, from: usize, to: usize) {}

    fn on_resize_column(&mut self, column: &ColumnId, width: u32) {}

    fn on_set_row_note(&mut self, row: &RowId, note: Option<&str>) {}
}

/// Hooks that ignore every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl TableHooks for NoHooks {}
