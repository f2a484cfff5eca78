//! Shared drop container for the row and column axes.

use log::debug;

use super::collision::{Axis, Droppable};
use super::controller::{ACTIVATION_DISTANCE, DragController, Reorder};
use super::geometry::Point;
use crate::error::ItemKind;
use crate::id::{ColumnId, RowId};

/// Drop slots for both axes as laid out by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropLayout {
    /// Column header slots.
    pub columns: Vec<Droppable>,
    /// Row slots.
    pub rows: Vec<Droppable>,
}

impl DropLayout {
    fn slots(&self, kind: ItemKind) -> &[Droppable] {
        match kind {
            ItemKind::Column => &self.columns,
            ItemKind::Row => &self.rows,
        }
    }
}

/// A reorder produced by a completed drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderCommand {
    Rows(Reorder),
    Columns(Reorder),
}

/// Routes drag gestures to the row or column controller.
#[derive(Debug, Clone)]
pub struct DragContext {
    rows: DragController,
    columns: DragController,
    /// Axis owning the gesture in progress.
    active: Option<ItemKind>,
}

impl Default for DragContext {
    fn default() -> Self {
        Self::new(ACTIVATION_DISTANCE)
    }
}

impl DragContext {
    pub fn new(activation_distance: f32) -> Self {
        Self {
            rows: DragController::with_activation_distance(Axis::Vertical, activation_distance),
            columns: DragController::with_activation_distance(Axis::Horizontal, activation_distance),
            active: None,
        }
    }

    pub fn rows(&self) -> &DragController {
        &self.rows
    }

    pub fn columns(&self) -> &DragController {
        &self.columns
    }

    /// Axis of the gesture in progress.
    pub fn active_axis(&self) -> Option<ItemKind> {
        self.active
    }

    fn controller_mut(&mut self, kind: ItemKind) -> &mut DragController {
        match kind {
            ItemKind::Column => &mut self.columns,
            ItemKind::Row => &mut self.rows,
        }
    }

    /// Pointer pressed on a drag handle.
    ///
    /// Column ids take the column axis, row ids the row axis. Unknown ids are
    /// ignored and `None` is returned.
    pub fn pointer_down(
        &mut self,
        id: &str,
        pointer: Point,
        column_order: &[ColumnId],
        row_ids: &[RowId],
        layout: &DropLayout,
    ) -> Option<ItemKind> {
        let kind = if column_order.iter().any(|c| c.as_str() == id) {
            ItemKind::Column
        } else if row_ids.iter().any(|r| r.as_str() == id) {
            ItemKind::Row
        } else {
            debug!("Pointer down on unknown drag handle '{}'", id);
            return None;
        };
        self.cancel();
        self.active = Some(kind);
        self.controller_mut(kind)
            .pointer_down(id, pointer, layout.slots(kind));
        Some(kind)
    }

    /// Pointer moved. Returns `true` when the hovered slot changed.
    pub fn pointer_move(&mut self, pointer: Point, layout: &DropLayout) -> bool {
        let Some(kind) = self.active else {
            return false;
        };
        self.controller_mut(kind)
            .pointer_move(pointer, layout.slots(kind))
    }

    /// Pointer released. Indices are computed against the orders passed in.
    pub fn pointer_up(
        &mut self,
        column_order: &[ColumnId],
        row_ids: &[RowId],
    ) -> Option<ReorderCommand> {
        match self.active.take()? {
            ItemKind::Column => self.columns.pointer_up(column_order).map(ReorderCommand::Columns),
            ItemKind::Row => self.rows.pointer_up(row_ids).map(ReorderCommand::Rows),
        }
    }

    /// Abort any gesture, e.g. when the drag source unmounts.
    pub fn cancel(&mut self) {
        self.rows.cancel();
        self.columns.cancel();
        self.active = None;
    }
}
