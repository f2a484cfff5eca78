//! Drag-to-reorder for rows and columns.
//!
//! Each axis has its own [`DragController`] state machine. The shared
//! [`DragContext`] routes a gesture to the right axis by checking whether
//! the dragged id is a column id or a row id, the way a single drop
//! container hosts both header and row sortables.

mod collision;
mod context;
mod controller;
mod geometry;

pub use collision::*;
pub use context::*;
pub use controller::*;
pub use geometry::*;
