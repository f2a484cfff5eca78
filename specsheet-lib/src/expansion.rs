//! Which rows have their detail panel open.

use std::collections::HashSet;

use crate::id::RowId;

/// Set of rows whose detail panel is expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    expanded: HashSet<RowId>,
}

impl Expansion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, row: &RowId) -> bool {
        self.expanded.contains(row)
    }

    /// Flip a row's panel. Returns the new state.
    pub fn toggle(&mut self, row: &RowId) -> bool {
        if self.expanded.remove(row) {
            false
        } else {
            self.expanded.insert(row.clone());
            true
        }
    }

    pub fn collapse(&mut self, row: &RowId) {
        self.expanded.remove(row);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Keep only rows for which `live` returns `true`.
    pub fn retain(&mut self, mut live: impl FnMut(&RowId) -> bool) {
        self.expanded.retain(|row| live(row));
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut e = Expansion::new();
        let row = RowId::new("r1");
        assert!(e.toggle(&row));
        assert!(e.is_expanded(&row));
        assert!(!e.toggle(&row));
        assert!(e.is_empty());
    }
}
