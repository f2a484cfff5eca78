//! Table model behavior through the public API.

use specsheet_lib::error::{ItemKind, TableError, ValidationError};
use specsheet_lib::id::{ColumnId, RowId, SequentialIds};
use specsheet_lib::model::{Column, DataType, Row, TableModel, Value};

fn two_columns() -> TableModel {
    TableModel::from_parts(
        vec![Column::new("A", "A"), Column::new("B", "B")],
        vec![
            Row::new("1").with_cell("A", "a1").with_cell("B", "b1"),
            Row::new("2").with_cell("A", "a2").with_cell("B", "b2"),
        ],
        SequentialIds::new(),
    )
    .unwrap()
}

fn order(model: &TableModel) -> Vec<&str> {
    model.column_order().iter().map(ColumnId::as_str).collect()
}

fn rows(model: &TableModel) -> Vec<&str> {
    model.row_ids().map(RowId::as_str).collect()
}

#[test]
fn test_reorder_columns_swaps_display_only() {
    let mut m = two_columns();
    assert!(m.reorder_columns(0, 1).unwrap());
    assert_eq!(order(&m), vec!["B", "A"]);
    assert_eq!(m.cell(&"1".into(), &"A".into()), Some(&Value::from("a1")));
    assert_eq!(m.column(&"A".into()).unwrap().header, "A");
}

#[test]
fn test_add_column_in_the_middle() {
    let mut m = two_columns();
    assert_eq!(m.add_column(1, Column::new("C", "C")).unwrap(), 1);
    assert_eq!(order(&m), vec!["A", "C", "B"]);
    for row in m.rows() {
        assert_eq!(row.value(&"C".into()), Value::Null);
    }
    assert!(m.is_consistent());
}

#[test]
fn test_add_column_index_is_clamped() {
    let mut m = two_columns();
    assert_eq!(m.add_column(99, Column::new("C", "C")).unwrap(), 2);
    assert_eq!(order(&m), vec!["A", "B", "C"]);
}

#[test]
fn test_add_duplicate_column_is_rejected() {
    let mut m = two_columns();
    let err = m.add_column(0, Column::new("A", "again")).unwrap_err();
    assert_eq!(
        err,
        TableError::Validation(ValidationError::DuplicateId {
            kind: ItemKind::Column,
            id: "A".into()
        })
    );
    assert_eq!(order(&m), vec!["A", "B"]);
}

#[test]
fn test_add_new_column_gets_fresh_id_and_default_width() {
    let mut m = two_columns().with_column_widths(120, 40);
    let id = m.add_new_column(0, "New").unwrap();
    assert_eq!(id.as_str(), "col_1");
    assert_eq!(m.column(&id).unwrap().width, 120);
    assert_eq!(order(&m), vec!["col_1", "A", "B"]);
}

#[test]
fn test_add_row_is_empty_and_clamped() {
    let mut m = two_columns();
    let id = m.add_row(10);
    assert_eq!(rows(&m), vec!["1", "2", id.as_str()]);
    assert_eq!(m.cell(&id, &"A".into()), None);
    assert_eq!(m.row(&id).unwrap().value(&"A".into()), Value::Null);
}

#[test]
fn test_delete_row_reports_index() {
    let mut m = two_columns();
    let (index, row) = m.delete_row(&"2".into()).unwrap();
    assert_eq!(index, 1);
    assert_eq!(row.id().as_str(), "2");
    assert_eq!(rows(&m), vec!["1"]);
}

#[test]
fn test_delete_unknown_row_leaves_model_untouched() {
    let mut m = two_columns();
    let err = m.delete_row(&"nope".into()).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(rows(&m), vec!["1", "2"]);
}

#[test]
fn test_delete_column_drops_cells() {
    let mut m = two_columns();
    let (index, column) = m.delete_column(&"A".into()).unwrap();
    assert_eq!((index, column.id.as_str()), (0, "A"));
    assert_eq!(order(&m), vec!["B"]);
    assert!(m.rows().iter().all(|r| r.get(&"A".into()).is_none()));

    let err = m.set_cell(&"1".into(), &"A".into(), Value::from("x")).unwrap_err();
    assert_eq!(err.validation(), Some(&ValidationError::UnknownColumn("A".into())));
}

#[test]
fn test_reorder_out_of_bounds_is_rejected() {
    let mut m = two_columns();
    let err = m.reorder_rows(0, 2).unwrap_err();
    assert_eq!(
        err.validation(),
        Some(&ValidationError::IndexOutOfBounds {
            axis: ItemKind::Row,
            index: 2,
            len: 2
        })
    );
    assert_eq!(rows(&m), vec!["1", "2"]);
}

#[test]
fn test_reorder_rows_same_index_is_noop() {
    let mut m = two_columns();
    assert!(!m.reorder_rows(1, 1).unwrap());
    assert_eq!(rows(&m), vec!["1", "2"]);
}

#[test]
fn test_rename_column_returns_previous_header() {
    let mut m = two_columns();
    assert_eq!(m.rename_column(&"A".into(), "Full Name").unwrap(), "A");
    assert_eq!(m.column(&"A".into()).unwrap().header, "Full Name");
    assert!(m.rename_column(&"Z".into(), "x").unwrap_err().is_not_found());
}

#[test]
fn test_resize_below_minimum_is_rejected() {
    let mut m = two_columns();
    assert_eq!(m.resize_column(&"A".into(), 200).unwrap(), 150);
    let err = m.resize_column(&"A".into(), 10).unwrap_err();
    assert!(matches!(
        err.validation(),
        Some(ValidationError::WidthTooSmall { width: 10, min: 40, .. })
    ));
    assert_eq!(m.column(&"A".into()).unwrap().width, 200);
}

#[test]
fn test_set_cell_checks_declared_type() {
    let mut m = TableModel::from_parts(
        vec![
            Column::new("email", "Email").with_data_type(DataType::Email),
            Column::new("status", "Status")
                .with_data_type(DataType::Enum)
                .with_options(["Active", "Pending"]),
        ],
        vec![Row::new("1")],
        SequentialIds::new(),
    )
    .unwrap();
    let row = RowId::from("1");

    m.set_cell_text(&row, &"email".into(), "bob@hr.org").unwrap();
    assert!(m.set_cell_text(&row, &"email".into(), "not an email").is_err());
    assert_eq!(m.cell(&row, &"email".into()), Some(&Value::from("bob@hr.org")));

    m.set_cell_text(&row, &"status".into(), "Pending").unwrap();
    assert!(m.set_cell_text(&row, &"status".into(), "Banned").is_err());
    assert_eq!(
        m.cell(&row, &"status".into()),
        Some(&Value::Enum("Pending".into()))
    );
}

#[test]
fn test_set_cell_unknown_row() {
    let mut m = two_columns();
    let err = m.set_cell(&"9".into(), &"A".into(), Value::from("x")).unwrap_err();
    assert_eq!(err, TableError::row_not_found("9"));
}

#[test]
fn test_replace_rejects_duplicate_rows_atomically() {
    let mut m = two_columns();
    let err = m
        .replace(
            vec![Column::new("X", "X")],
            vec![Row::new("1"), Row::new("1")],
        )
        .unwrap_err();
    assert!(matches!(
        err.validation(),
        Some(ValidationError::DuplicateId { kind: ItemKind::Row, .. })
    ));
    assert_eq!(order(&m), vec!["A", "B"]);
}
