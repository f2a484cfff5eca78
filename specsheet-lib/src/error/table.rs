//! Table model error types

use super::ValidationError;

/// The kind of table item an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Row,
    Column,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Row => write!(f, "row"),
            ItemKind::Column => write!(f, "column"),
        }
    }
}

/// Errors returned by table model and editor operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// The operation referenced an id that is not live in the model.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: ItemKind, id: String },

    /// The operation was rejected before touching the model.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl TableError {
    /// Creates a not-found error for a row id.
    pub fn row_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: ItemKind::Row,
            id: id.into(),
        }
    }

    /// Creates a not-found error for a column id.
    pub fn column_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: ItemKind::Column,
            id: id.into(),
        }
    }

    /// Returns `true` if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the validation error, if this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}
