//! Tracks open edit sessions across headers and cells.

use std::collections::HashMap;

use log::{debug, trace};

use super::session::{DraftPolicy, EditSession, EditTarget, SyncOutcome};
use crate::id::{ColumnId, RowId};

/// A finished edit, ready to be written to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub target: EditTarget,
    pub value: String,
}

/// Edit sessions keyed by target.
///
/// Several targets may be editing at once; each target has at most one
/// session.
#[derive(Debug, Clone, Default)]
pub struct EditController {
    sessions: HashMap<EditTarget, EditSession>,
    policy: DraftPolicy,
}

impl EditController {
    pub fn new(policy: DraftPolicy) -> Self {
        Self {
            sessions: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DraftPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DraftPolicy) {
        self.policy = policy;
    }

    pub fn session(&self, target: &EditTarget) -> Option<&EditSession> {
        self.sessions.get(target)
    }

    pub fn is_editing(&self, target: &EditTarget) -> bool {
        self.sessions.contains_key(target)
    }

    /// Targets with an open session.
    pub fn targets(&self) -> impl Iterator<Item = &EditTarget> + '_ {
        self.sessions.keys()
    }

    /// Text to show for a target: the draft while editing, else `current`.
    pub fn display<'a>(&'a self, target: &EditTarget, current: &'a str) -> &'a str {
        self.sessions
            .get(target)
            .map(EditSession::draft)
            .unwrap_or(current)
    }

    /// Enter edit mode with the draft seeded from `current`. A target that
    /// is already editing keeps its draft.
    pub fn begin(&mut self, target: EditTarget, current: &str) {
        self.sessions.entry(target).or_insert_with_key(|t| {
            trace!("Editing {}", t);
            EditSession::new(current)
        });
    }

    /// Replace the draft, entering edit mode first if needed.
    pub fn input(&mut self, target: EditTarget, current: &str, text: impl Into<String>) {
        self.sessions
            .entry(target)
            .or_insert_with(|| EditSession::new(current))
            .set_draft(text);
    }

    /// Leave edit mode, returning whatever draft is present. Returns `None`
    /// if the target was not editing.
    pub fn commit(&mut self, target: &EditTarget) -> Option<Commit> {
        let session = self.sessions.remove(target)?;
        debug!("Commit {} = '{}'", target, session.draft());
        Some(Commit {
            target: target.clone(),
            value: session.into_draft(),
        })
    }

    /// Leave edit mode, discarding the draft.
    pub fn cancel(&mut self, target: &EditTarget) -> bool {
        self.sessions.remove(target).is_some()
    }

    /// Push an external value into a target's session, if it has one.
    pub fn sync_external(&mut self, target: &EditTarget, value: &str) -> Option<SyncOutcome> {
        let policy = self.policy;
        let outcome = self.sessions.get_mut(target)?.sync_external(value, policy);
        if outcome != SyncOutcome::Unchanged {
            debug!("External update for {} while editing: {:?}", target, outcome);
        }
        Some(outcome)
    }

    /// Drop sessions whose target no longer exists.
    pub fn retain(&mut self, mut keep: impl FnMut(&EditTarget) -> bool) {
        self.sessions.retain(|target, _| keep(target));
    }

    /// Drop sessions on cells of a deleted row.
    pub fn forget_row(&mut self, row: &RowId) {
        self.retain(|t| t.row() != Some(row));
    }

    /// Drop sessions on a deleted column's header and cells.
    pub fn forget_column(&mut self, column: &ColumnId) {
        self.retain(|t| t.column() != column);
    }
}
