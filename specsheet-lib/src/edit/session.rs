use serde::{Deserialize, Serialize};

use crate::id::{ColumnId, RowId};

/// What an edit session is editing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditTarget {
    /// A column header title.
    Header(ColumnId),
    /// One cell value.
    Cell(RowId, ColumnId),
}

impl EditTarget {
    pub fn header(column: impl Into<ColumnId>) -> Self {
        Self::Header(column.into())
    }

    pub fn cell(row: impl Into<RowId>, column: impl Into<ColumnId>) -> Self {
        Self::Cell(row.into(), column.into())
    }

    pub fn column(&self) -> &ColumnId {
        match self {
            Self::Header(column) | Self::Cell(_, column) => column,
        }
    }

    pub fn row(&self) -> Option<&RowId> {
        match self {
            Self::Header(_) => None,
            Self::Cell(row, _) => Some(row),
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header(_))
    }
}

impl std::fmt::Display for EditTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header(column) => write!(f, "header {}", column),
            Self::Cell(row, column) => write!(f, "cell ({}, {})", row, column),
        }
    }
}

/// What happens to an open draft when the underlying value changes
/// outside the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftPolicy {
    /// Keep the user's draft; only the base value is updated.
    #[default]
    PreserveDraft,
    /// The external value replaces the draft.
    LastWriterWins,
}

/// Result of pushing an external value into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The external value equals the base; nothing changed.
    Unchanged,
    /// The base moved but the draft was kept.
    DraftKept,
    /// The draft was overwritten by the external value.
    DraftReplaced,
}

/// Draft state for one target while it is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    /// Value the target held when editing began (or after the last sync).
    base: String,
    draft: String,
}

impl EditSession {
    /// Start editing with the draft equal to the current value.
    pub fn new(value: impl Into<String>) -> Self {
        let base = value.into();
        Self {
            draft: base.clone(),
            base,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns `true` if the draft differs from the base value.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.base
    }

    /// Replace the draft (one keystroke's worth of input).
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Apply an external change of the target's value.
    pub fn sync_external(&mut self, value: &str, policy: DraftPolicy) -> SyncOutcome {
        if value == self.base {
            return SyncOutcome::Unchanged;
        }
        self.base = value.to_string();
        match policy {
            DraftPolicy::PreserveDraft => SyncOutcome::DraftKept,
            DraftPolicy::LastWriterWins => {
                self.draft = value.to_string();
                SyncOutcome::DraftReplaced
            }
        }
    }

    pub fn into_draft(self) -> String {
        self.draft
    }
}
