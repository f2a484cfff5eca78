//! Table operations given on the command line.
//!
//! Each operation is `NAME` followed by colon-separated arguments, e.g.
//! `move-row:0:2` or `set:row_bob:col_status:Active`. The last argument of
//! `set`, `rename-column` and `add-column` may itself contain colons.

use std::str::FromStr;

use log::info;
use specsheet_lib::error::TableError;
use specsheet_lib::id::{ColumnId, RowId};
use specsheet_lib::model::{Column, Value};
use specsheet_lib::{TableEditor, TableHooks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Append, or insert at an index.
    AddRow(Option<usize>),
    DeleteRow(RowId),
    AddColumn {
        index: usize,
        id: ColumnId,
        header: String,
    },
    DeleteColumn(ColumnId),
    RenameColumn {
        id: ColumnId,
        title: String,
    },
    SetCell {
        row: RowId,
        column: ColumnId,
        text: String,
    },
    MoveRow {
        from: usize,
        to: usize,
    },
    MoveColumn {
        from: usize,
        to: usize,
    },
    Resize {
        id: ColumnId,
        width: u32,
    },
    /// Empty text clears the note.
    Note {
        row: RowId,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpParseError {
    #[error("unknown operation '{0}'")]
    Unknown(String),

    #[error("'{op}' expects {usage}")]
    Usage { op: String, usage: &'static str },

    #[error("'{value}' is not a valid number in '{op}'")]
    Number { op: String, value: String },
}

fn number<T: FromStr>(op: &str, value: &str) -> Result<T, OpParseError> {
    value.parse().map_err(|_| OpParseError::Number {
        op: op.to_string(),
        value: value.to_string(),
    })
}

/// Split into exactly `n` parts; the last part keeps any colons.
fn split_args(rest: Option<&str>, n: usize) -> Option<Vec<&str>> {
    let parts: Vec<&str> = rest?.splitn(n, ':').collect();
    (parts.len() == n).then_some(parts)
}

impl FromStr for Op {
    type Err = OpParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rest) = match s.split_once(':') {
            Some((name, rest)) => (name, Some(rest)),
            None => (s, None),
        };
        let args = |n: usize, usage: &'static str| {
            split_args(rest, n).ok_or_else(|| OpParseError::Usage {
                op: s.to_string(),
                usage,
            })
        };

        match name {
            "add-row" => match rest {
                None => Ok(Op::AddRow(None)),
                Some(index) => Ok(Op::AddRow(Some(number(s, index)?))),
            },
            "delete-row" => {
                let a = args(1, "delete-row:ROW")?;
                Ok(Op::DeleteRow(a[0].into()))
            }
            "add-column" => {
                let a = args(3, "add-column:INDEX:ID:HEADER")?;
                Ok(Op::AddColumn {
                    index: number(s, a[0])?,
                    id: a[1].into(),
                    header: a[2].to_string(),
                })
            }
            "delete-column" => {
                let a = args(1, "delete-column:ID")?;
                Ok(Op::DeleteColumn(a[0].into()))
            }
            "rename-column" => {
                let a = args(2, "rename-column:ID:TITLE")?;
                Ok(Op::RenameColumn {
                    id: a[0].into(),
                    title: a[1].to_string(),
                })
            }
            "set" => {
                let a = args(3, "set:ROW:COL:VALUE")?;
                Ok(Op::SetCell {
                    row: a[0].into(),
                    column: a[1].into(),
                    text: a[2].to_string(),
                })
            }
            "move-row" => {
                let a = args(2, "move-row:FROM:TO")?;
                Ok(Op::MoveRow {
                    from: number(s, a[0])?,
                    to: number(s, a[1])?,
                })
            }
            "move-column" => {
                let a = args(2, "move-column:FROM:TO")?;
                Ok(Op::MoveColumn {
                    from: number(s, a[0])?,
                    to: number(s, a[1])?,
                })
            }
            "resize" => {
                let a = args(2, "resize:ID:WIDTH")?;
                Ok(Op::Resize {
                    id: a[0].into(),
                    width: number(s, a[1])?,
                })
            }
            "note" => {
                let a = args(2, "note:ROW:TEXT")?;
                Ok(Op::Note {
                    row: a[0].into(),
                    text: a[1].to_string(),
                })
            }
            _ => Err(OpParseError::Unknown(name.to_string())),
        }
    }
}

impl Op {
    /// Run this operation against the editor.
    pub fn apply<H: TableHooks>(&self, editor: &mut TableEditor<H>) -> Result<(), TableError> {
        match self {
            Op::AddRow(index) => {
                let index = index.unwrap_or(editor.model().row_count());
                editor.add_row(index);
            }
            Op::DeleteRow(id) => {
                editor.delete_row(id)?;
            }
            Op::AddColumn { index, id, header } => {
                let width = editor.config().default_column_width;
                editor.add_column(*index, Column::new(id.clone(), header.as_str()).with_width(width))?;
            }
            Op::DeleteColumn(id) => {
                editor.delete_column(id)?;
            }
            Op::RenameColumn { id, title } => editor.rename_column(id, title.as_str())?,
            Op::SetCell { row, column, text } => editor.set_cell_text(row, column, text)?,
            Op::MoveRow { from, to } => {
                editor.reorder_rows(*from, *to)?;
            }
            Op::MoveColumn { from, to } => {
                editor.reorder_columns(*from, *to)?;
            }
            Op::Resize { id, width } => editor.resize_column(id, *width)?,
            Op::Note { row, text } => editor.set_row_note(row, Some(text.clone()))?,
        }
        Ok(())
    }
}

/// Hooks that log every committed change.
#[derive(Debug, Default)]
pub struct LogHooks;

impl TableHooks for LogHooks {
    fn on_add_row(&mut self, index: usize, row: &RowId) {
        info!("Row '{}' added at {}", row, index);
    }

    fn on_delete_row(&mut self, index: usize, row: &RowId) {
        info!("Row '{}' deleted from {}", row, index);
    }

    fn on_add_column(&mut self, index: usize, column: &ColumnId) {
        info!("Column '{}' added at {}", column, index);
    }

    fn on_delete_column(&mut self, index: usize, column: &ColumnId) {
        info!("Column '{}' deleted from {}", column, index);
    }

    fn on_rename_column(&mut self, column: &ColumnId, title: &str) {
        info!("Column '{}' renamed to '{}'", column, title);
    }

    fn on_rename_cell(&mut self, row: &RowId, column: &ColumnId, value: &Value) {
        info!("Cell ({}, {}) = '{}'", row, column, value);
    }

    fn on_reorder_rows(&mut self, from: usize, to: usize) {
        info!("Row moved {} -> {}", from, to);
    }

    fn on_reorder_columns(&mut self, from: usize, to: usize) {
        info!("Column moved {} -> {}", from, to);
    }

    fn on_resize_column(&mut self, column: &ColumnId, width: u32) {
        info!("Column '{}' resized to {}", column, width);
    }

    fn on_set_row_note(&mut self, row: &RowId, note: Option<&str>) {
        match note {
            Some(note) => info!("Row '{}' note set ({} chars)", row, note.chars().count()),
            None => info!("Row '{}' note cleared", row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specsheet_lib::document::sample_document;
    use specsheet_lib::id::SequentialIds;
    use specsheet_lib::TableConfig;

    fn parse(s: &str) -> Op {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_add_row() {
        assert_eq!(parse("add-row"), Op::AddRow(None));
        assert_eq!(parse("add-row:2"), Op::AddRow(Some(2)));
    }

    #[test]
    fn test_parse_set_keeps_colons_in_value() {
        assert_eq!(
            parse("set:row_1:col_last_login:2024-05-12T08:30:00Z"),
            Op::SetCell {
                row: "row_1".into(),
                column: "col_last_login".into(),
                text: "2024-05-12T08:30:00Z".into(),
            }
        );
    }

    #[test]
    fn test_parse_add_column() {
        assert_eq!(
            parse("add-column:1:col_notes:Notes"),
            Op::AddColumn {
                index: 1,
                id: "col_notes".into(),
                header: "Notes".into(),
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "frobnicate:1".parse::<Op>(),
            Err(OpParseError::Unknown("frobnicate".into()))
        );
        assert!(matches!(
            "move-row:1".parse::<Op>(),
            Err(OpParseError::Usage { usage: "move-row:FROM:TO", .. })
        ));
        assert!(matches!(
            "resize:col_a:wide".parse::<Op>(),
            Err(OpParseError::Number { .. })
        ));
        assert!(matches!("delete-row".parse::<Op>(), Err(OpParseError::Usage { .. })));
    }

    #[test]
    fn test_apply_sequence_to_sample() {
        let mut editor = TableEditor::from_document(
            sample_document(),
            SequentialIds::new(),
            LogHooks,
            TableConfig::default(),
        )
        .unwrap();
        for op in [
            "move-column:0:3",
            "add-row",
            "set:row_1:col_name:Dana",
            "delete-row:row_bob",
            "note:row_alice:check: retention",
        ] {
            parse(op).apply(&mut editor).unwrap();
        }
        let model = editor.model();
        assert_eq!(model.column_order()[3].as_str(), "col_name");
        let rows: Vec<_> = model.row_ids().map(|r| r.as_str()).collect();
        assert_eq!(rows, vec!["row_alice", "row_charlie", "row_1"]);
        let alice = model.row(&"row_alice".into()).and_then(|r| r.note());
        assert_eq!(alice, Some("check: retention"));
    }

    #[test]
    fn test_apply_reports_bad_value() {
        let mut editor = TableEditor::from_document(
            sample_document(),
            SequentialIds::new(),
            LogHooks,
            TableConfig::default(),
        )
        .unwrap();
        let err = parse("set:row_bob:col_email:not-an-email").apply(&mut editor).unwrap_err();
        assert!(err.validation().is_some());
    }
}
