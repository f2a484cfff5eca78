//! Row and column identifiers and their allocation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Stable identifier of a row.
    RowId
);

string_id!(
    /// Stable identifier of a column.
    ColumnId
);

/// Source of fresh row and column ids.
///
/// Injected into the [`TableModel`](crate::model::TableModel) so tests can use
/// a deterministic sequence while hosts use random ids.
pub trait IdAllocator: std::fmt::Debug {
    fn next_row_id(&mut self) -> RowId;

    fn next_column_id(&mut self) -> ColumnId;
}

/// Monotonic counter producing `row_1`, `row_2`, ... and `col_1`, `col_2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next_row: u64,
    next_column: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdAllocator for SequentialIds {
    fn next_row_id(&mut self) -> RowId {
        self.next_row += 1;
        RowId(format!("row_{}", self.next_row))
    }

    fn next_column_id(&mut self) -> ColumnId {
        self.next_column += 1;
        ColumnId(format!("col_{}", self.next_column))
    }
}

/// Random v4 UUID ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdAllocator for UuidIds {
    fn next_row_id(&mut self) -> RowId {
        RowId(Uuid::new_v4().to_string())
    }

    fn next_column_id(&mut self) -> ColumnId {
        ColumnId(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_monotonic() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_row_id().as_str(), "row_1");
        assert_eq!(ids.next_row_id().as_str(), "row_2");
        assert_eq!(ids.next_column_id().as_str(), "col_1");
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let mut ids = UuidIds;
        assert_ne!(ids.next_row_id(), ids.next_row_id());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = RowId::new("r1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"r1\"");
    }
}
