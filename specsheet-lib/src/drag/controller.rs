//! Drag state machine for one sortable axis.

use log::{debug, trace};

use super::collision::{Axis, Droppable, bounds, closest_center};
use super::geometry::Point;

/// Default pointer travel (px) before a press becomes a drag.
pub const ACTIVATION_DISTANCE: f32 = 5.0;

/// Current state of a drag gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pointer is down on a handle but has not travelled far enough yet.
    Pending {
        active: String,
        origin: Point,
        /// Pointer position relative to the handle's slot center.
        offset: Point,
    },
    /// The item is being dragged.
    Dragging {
        active: String,
        offset: Point,
        pointer: Point,
        /// Slot under the dragged item, `None` when outside every slot.
        over: Option<String>,
    },
}

/// A move computed at drop time against the live order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    pub from: usize,
    pub to: usize,
}

/// Converts pointer gestures on one axis into [`Reorder`] commands.
#[derive(Debug, Clone)]
pub struct DragController {
    axis: Axis,
    activation_distance: f32,
    state: DragState,
}

impl DragController {
    pub fn new(axis: Axis) -> Self {
        Self::with_activation_distance(axis, ACTIVATION_DISTANCE)
    }

    pub fn with_activation_distance(axis: Axis, activation_distance: f32) -> Self {
        Self {
            axis,
            activation_distance,
            state: DragState::Idle,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Id of the pressed or dragged item.
    pub fn active_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Idle => None,
            DragState::Pending { active, .. } | DragState::Dragging { active, .. } => Some(active),
        }
    }

    /// Id of the slot currently under the dragged item.
    pub fn over_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { over, .. } => over.as_deref(),
            _ => None,
        }
    }

    /// Pointer pressed on the drag handle of `id`.
    ///
    /// The grab offset is measured from the center of the item's own slot so
    /// collisions track the dragged item rather than the raw pointer.
    pub fn pointer_down(&mut self, id: impl Into<String>, pointer: Point, droppables: &[Droppable]) {
        let active = id.into();
        let offset = droppables
            .iter()
            .find(|d| d.id == active)
            .map(|d| pointer.offset_from(d.rect.center()))
            .unwrap_or_default();
        trace!("Drag pending on '{}' at {:?}", active, pointer);
        self.state = DragState::Pending {
            active,
            origin: pointer,
            offset,
        };
    }

    /// Pointer moved. Returns `true` when the hovered slot changed.
    pub fn pointer_move(&mut self, pointer: Point, droppables: &[Droppable]) -> bool {
        let axis = self.axis;
        match &mut self.state {
            DragState::Idle => false,
            DragState::Pending {
                active,
                origin,
                offset,
            } => {
                if origin.distance(pointer) <= self.activation_distance {
                    return false;
                }
                let active = std::mem::take(active);
                let offset = *offset;
                debug!("Drag started on '{}' ({:?})", active, axis);
                let over = hovered(axis, pointer, offset, droppables);
                self.state = DragState::Dragging {
                    active,
                    offset,
                    pointer,
                    over,
                };
                true
            }
            DragState::Dragging {
                offset,
                pointer: last,
                over,
                ..
            } => {
                *last = pointer;
                let next = hovered(axis, pointer, *offset, droppables);
                if *over != next {
                    trace!("Drag over {:?} -> {:?}", over, next);
                    *over = next;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Pointer released. Returns the move to apply, if any.
    ///
    /// Indices are looked up in `order` as it stands at drop time. No command
    /// is produced for a press that never became a drag, a drop outside every
    /// slot, a drop onto the item itself, or ids missing from `order`.
    pub fn pointer_up<T: AsRef<str>>(&mut self, order: &[T]) -> Option<Reorder> {
        let state = std::mem::take(&mut self.state);
        let DragState::Dragging {
            active,
            over: Some(over),
            ..
        } = state
        else {
            return None;
        };
        if active == over {
            return None;
        }

        let position = |id: &str| order.iter().position(|item| item.as_ref() == id);
        match (position(&active), position(&over)) {
            (Some(from), Some(to)) => {
                debug!("Drop '{}' onto '{}': {} -> {}", active, over, from, to);
                Some(Reorder { from, to })
            }
            _ => {
                debug!("Drop '{}' onto '{}' ignored: id no longer in order", active, over);
                None
            }
        }
    }

    /// Abort the gesture without producing a command.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            debug!("Drag cancelled");
        }
        self.state = DragState::Idle;
    }
}

/// Slot under the dragged item's center, or `None` when the pointer has left
/// the area covered by the slots.
fn hovered(axis: Axis, pointer: Point, offset: Point, droppables: &[Droppable]) -> Option<String> {
    let area = bounds(droppables)?;
    if !area.contains(pointer) {
        return None;
    }
    let center = pointer.offset_from(offset);
    closest_center(center, droppables, axis).map(|d| d.id.clone())
}
