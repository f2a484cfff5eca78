//! Validation error types

use super::ItemKind;

/// Reasons an operation is rejected before it mutates the model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A reorder index lies outside the sequence.
    #[error("{axis} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        axis: ItemKind,
        index: usize,
        len: usize,
    },

    /// A cell write targeted a column that is not live.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// An insert reused an id that is already live.
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: ItemKind, id: String },

    /// A value does not fit the column's declared data type.
    #[error("column '{column}' expects {expected}, got {value}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        value: String,
    },

    /// A resize went below the configured minimum width.
    #[error("column '{column}' width {width} is below the minimum of {min}")]
    WidthTooSmall { column: String, width: u32, min: u32 },
}

impl ValidationError {
    /// Creates an out-of-bounds error.
    pub fn out_of_bounds(axis: ItemKind, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { axis, index, len }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected,
            value: value.into(),
        }
    }
}
