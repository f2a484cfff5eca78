//! Host-facing facade tying the model, controllers and hooks together.

use log::warn;

use crate::config::TableConfig;
use crate::document::SpecDocument;
use crate::drag::{DragContext, DropLayout, Point, ReorderCommand};
use crate::edit::{Commit, EditController, EditTarget};
use crate::error::{ItemKind, TableError};
use crate::expansion::Expansion;
use crate::hooks::{NoHooks, TableHooks};
use crate::id::{ColumnId, IdAllocator, RowId, SequentialIds};
use crate::model::{CellFlags, Column, Row, TableModel, Value};

/// An editable table bound to a host.
///
/// Owns the [`TableModel`] and the transient controller state (drag
/// gesture, open edit sessions, expanded rows). Every committed change is
/// reported to the host's [`TableHooks`] right after the model is updated.
#[derive(Debug)]
pub struct TableEditor<H: TableHooks = NoHooks> {
    model: TableModel,
    drag: DragContext,
    edits: EditController,
    expansion: Expansion,
    config: TableConfig,
    hooks: H,
}

impl TableEditor<NoHooks> {
    /// Create an editor with default configuration and no hooks.
    pub fn new(model: TableModel) -> Self {
        Self::with_hooks(model, NoHooks, TableConfig::default())
    }
}

impl<H: TableHooks> TableEditor<H> {
    pub fn with_hooks(model: TableModel, hooks: H, config: TableConfig) -> Self {
        let model = model.with_column_widths(config.default_column_width, config.min_column_width);
        Self {
            model,
            drag: DragContext::new(config.activation_distance),
            edits: EditController::new(config.draft_policy),
            expansion: Expansion::new(),
            config,
            hooks,
        }
    }

    /// Load a document into a new editor.
    pub fn from_document(
        document: SpecDocument,
        ids: impl IdAllocator + 'static,
        hooks: H,
        config: TableConfig,
    ) -> Result<Self, TableError> {
        let model = document.into_model(ids)?;
        Ok(Self::with_hooks(model, hooks, config))
    }

    /// Apply a fresh copy of the document from the host. Rows without an id
    /// get deterministic ones.
    pub fn refresh_document(&mut self, document: &SpecDocument) -> Result<(), TableError> {
        let mut ids = SequentialIds::new();
        let (columns, rows) = document.to_parts(&mut ids)?;
        self.refresh(columns, rows)
    }

    pub fn model(&self) -> &TableModel {
        &self.model
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn drag(&self) -> &DragContext {
        &self.drag
    }

    pub fn edits(&self) -> &EditController {
        &self.edits
    }

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_model(self) -> TableModel {
        self.model
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Insert an empty row at `index` (clamped).
    pub fn add_row(&mut self, index: usize) -> RowId {
        let id = self.model.add_row(index);
        let index = self.model.row_index(&id).unwrap_or(index);
        self.hooks.on_add_row(index, &id);
        id
    }

    /// Insert zone below the row at `index`.
    pub fn add_row_after(&mut self, index: usize) -> RowId {
        self.add_row(index.saturating_add(1))
    }

    /// Insert a row with initial values at `index` (clamped).
    pub fn add_row_with<I>(&mut self, index: usize, values: I) -> Result<RowId, TableError>
    where
        I: IntoIterator<Item = (ColumnId, Value)>,
    {
        let id = self.model.add_row_with(index, values)?;
        let index = self.model.row_index(&id).unwrap_or(index);
        self.hooks.on_add_row(index, &id);
        Ok(id)
    }

    pub fn delete_row(&mut self, id: &RowId) -> Result<Row, TableError> {
        let (index, row) = self.model.delete_row(id)?;
        self.edits.forget_row(id);
        self.expansion.collapse(id);
        if self.drag.rows().active_id() == Some(id.as_str()) {
            self.drag.cancel();
        }
        self.hooks.on_delete_row(index, id);
        Ok(row)
    }

    pub fn reorder_rows(&mut self, from: usize, to: usize) -> Result<bool, TableError> {
        let moved = self.model.reorder_rows(from, to)?;
        if moved {
            self.hooks.on_reorder_rows(from, to);
        }
        Ok(moved)
    }

    /// Open or close a row's detail panel. Returns the new state.
    pub fn toggle_expanded(&mut self, id: &RowId) -> Result<bool, TableError> {
        if !self.model.contains_row(id) {
            return Err(TableError::row_not_found(id.as_str()));
        }
        Ok(self.expansion.toggle(id))
    }

    pub fn is_expanded(&self, id: &RowId) -> bool {
        self.expansion.is_expanded(id)
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Insert a column definition at `index` (clamped). Returns its index.
    pub fn add_column(&mut self, index: usize, column: Column) -> Result<usize, TableError> {
        let id = column.id.clone();
        let index = self.model.add_column(index, column)?;
        self.hooks.on_add_column(index, &id);
        Ok(index)
    }

    /// Insert a new string column with a fresh id.
    pub fn add_new_column(
        &mut self,
        index: usize,
        header: impl Into<String>,
    ) -> Result<ColumnId, TableError> {
        let id = self.model.add_new_column(index, header)?;
        let index = self.model.column_index(&id).unwrap_or(index);
        self.hooks.on_add_column(index, &id);
        Ok(id)
    }

    /// Insert zone right of the column at `index`.
    pub fn add_column_after(
        &mut self,
        index: usize,
        header: impl Into<String>,
    ) -> Result<ColumnId, TableError> {
        self.add_new_column(index.saturating_add(1), header)
    }

    pub fn delete_column(&mut self, id: &ColumnId) -> Result<Column, TableError> {
        let (index, column) = self.model.delete_column(id)?;
        self.edits.forget_column(id);
        if self.drag.columns().active_id() == Some(id.as_str()) {
            self.drag.cancel();
        }
        self.hooks.on_delete_column(index, id);
        Ok(column)
    }

    pub fn rename_column(&mut self, id: &ColumnId, title: impl Into<String>) -> Result<(), TableError> {
        let title = title.into();
        self.model.rename_column(id, title.as_str())?;
        self.hooks.on_rename_column(id, &title);
        Ok(())
    }

    pub fn resize_column(&mut self, id: &ColumnId, width: u32) -> Result<(), TableError> {
        self.model.resize_column(id, width)?;
        self.hooks.on_resize_column(id, width);
        Ok(())
    }

    pub fn reorder_columns(&mut self, from: usize, to: usize) -> Result<bool, TableError> {
        let moved = self.model.reorder_columns(from, to)?;
        if moved {
            self.hooks.on_reorder_columns(from, to);
        }
        Ok(moved)
    }

    // -------------------------------------------------------------------------
    // Cells
    // -------------------------------------------------------------------------

    pub fn set_cell(&mut self, row: &RowId, column: &ColumnId, value: Value) -> Result<(), TableError> {
        self.model.set_cell(row, column, value.clone())?;
        self.hooks.on_rename_cell(row, column, &value);
        Ok(())
    }

    /// Parse `text` for the column's type and write it.
    pub fn set_cell_text(&mut self, row: &RowId, column: &ColumnId, text: &str) -> Result<(), TableError> {
        self.model.set_cell_text(row, column, text)?;
        let value = self.model.cell(row, column).cloned().unwrap_or_default();
        self.hooks.on_rename_cell(row, column, &value);
        Ok(())
    }

    pub fn set_cell_flags(
        &mut self,
        row: &RowId,
        column: &ColumnId,
        flags: CellFlags,
    ) -> Result<(), TableError> {
        self.model.set_cell_flags(row, column, flags)?;
        Ok(())
    }

    /// Attach a free-text note to a row. Blank text clears it.
    pub fn set_row_note(&mut self, row: &RowId, note: Option<String>) -> Result<(), TableError> {
        self.model.set_row_note(row, note)?;
        let stored = self.model.row(row).and_then(Row::note);
        self.hooks.on_set_row_note(row, stored);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Inline editing
    // -------------------------------------------------------------------------

    /// The target's committed text as stored in the model.
    pub fn current_text(&self, target: &EditTarget) -> Result<String, TableError> {
        match target {
            EditTarget::Header(column) => self
                .model
                .column(column)
                .map(|c| c.header.clone())
                .ok_or_else(|| TableError::column_not_found(column.as_str())),
            EditTarget::Cell(row, column) => {
                if !self.model.contains_column(column) {
                    return Err(TableError::column_not_found(column.as_str()));
                }
                self.model
                    .row(row)
                    .map(|r| r.value(column).to_text())
                    .ok_or_else(|| TableError::row_not_found(row.as_str()))
            }
        }
    }

    /// Text the view shows for a target: the draft while editing.
    pub fn display_text(&self, target: &EditTarget) -> Result<String, TableError> {
        let current = self.current_text(target)?;
        Ok(self.edits.display(target, &current).to_string())
    }

    /// Enter edit mode (click on a header title, focus on a cell input).
    pub fn begin_edit(&mut self, target: EditTarget) -> Result<(), TableError> {
        let current = self.current_text(&target)?;
        self.edits.begin(target, &current);
        Ok(())
    }

    /// A keystroke changed the draft. The model is not touched.
    pub fn edit_input(&mut self, target: EditTarget, text: impl Into<String>) -> Result<(), TableError> {
        let current = self.current_text(&target)?;
        self.edits.input(target, &current, text);
        Ok(())
    }

    /// Focus left the target: commit whatever draft is present.
    ///
    /// Returns `false` when the target was not editing. If the model rejects
    /// the draft the session stays open with the draft intact.
    pub fn blur(&mut self, target: &EditTarget) -> Result<bool, TableError> {
        let Some(commit) = self.edits.commit(target) else {
            return Ok(false);
        };
        self.apply_commit(commit)?;
        Ok(true)
    }

    /// Enter pressed. Confirms header renames; cells ignore it.
    pub fn press_enter(&mut self, target: &EditTarget) -> Result<bool, TableError> {
        if !target.is_header() {
            return Ok(false);
        }
        self.blur(target)
    }

    /// Discard a draft without committing.
    pub fn cancel_edit(&mut self, target: &EditTarget) -> bool {
        self.edits.cancel(target)
    }

    fn apply_commit(&mut self, commit: Commit) -> Result<(), TableError> {
        let result = match &commit.target {
            EditTarget::Header(column) => self.rename_column(column, commit.value.as_str()),
            EditTarget::Cell(row, column) => self.set_cell_text(row, column, &commit.value),
        };
        if let Err(err) = &result {
            warn!("Commit to {} rejected: {}", commit.target, err);
            if let Ok(current) = self.current_text(&commit.target) {
                self.edits.input(commit.target, &current, commit.value);
            }
        }
        result
    }

    // -------------------------------------------------------------------------
    // Drag and drop
    // -------------------------------------------------------------------------

    fn row_ids(&self) -> Vec<RowId> {
        self.model.row_ids().cloned().collect()
    }

    /// Pointer pressed on a drag handle. Returns the axis it engaged.
    pub fn pointer_down(&mut self, id: &str, pointer: Point, layout: &DropLayout) -> Option<ItemKind> {
        let row_ids = self.row_ids();
        self.drag
            .pointer_down(id, pointer, self.model.column_order(), &row_ids, layout)
    }

    pub fn pointer_move(&mut self, pointer: Point, layout: &DropLayout) -> bool {
        self.drag.pointer_move(pointer, layout)
    }

    /// Pointer released: apply the resulting reorder, if any.
    pub fn pointer_up(&mut self) -> Result<Option<ReorderCommand>, TableError> {
        let row_ids = self.row_ids();
        let Some(command) = self.drag.pointer_up(self.model.column_order(), &row_ids) else {
            return Ok(None);
        };
        match command {
            ReorderCommand::Rows(r) => self.reorder_rows(r.from, r.to)?,
            ReorderCommand::Columns(r) => self.reorder_columns(r.from, r.to)?,
        };
        Ok(Some(command))
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    // -------------------------------------------------------------------------
    // External refresh
    // -------------------------------------------------------------------------

    /// Replace rows and columns with fresh data from the host.
    ///
    /// The column order is re-derived from `columns`. Open drafts on targets
    /// that still exist are reconciled per the configured draft policy;
    /// drafts on vanished targets are dropped.
    pub fn refresh(&mut self, columns: Vec<Column>, rows: Vec<Row>) -> Result<(), TableError> {
        self.model.replace(columns, rows)?;
        self.drag.cancel();

        let model = &self.model;
        self.expansion.retain(|row| model.contains_row(row));

        let targets: Vec<EditTarget> = self.edits.targets().cloned().collect();
        for target in targets {
            match self.current_text(&target) {
                Ok(current) => {
                    self.edits.sync_external(&target, &current);
                }
                Err(_) => {
                    self.edits.cancel(&target);
                }
            }
        }
        Ok(())
    }
}
