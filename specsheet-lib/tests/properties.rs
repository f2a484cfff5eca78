//! Property checks over random operation sequences.

use proptest::prelude::*;
use specsheet_lib::id::{ColumnId, SequentialIds};
use specsheet_lib::model::{Column, Row, TableModel, Value};

fn model(columns: usize, rows: usize) -> TableModel {
    let defs = (0..columns)
        .map(|c| Column::new(format!("c{c}"), format!("Col {c}")))
        .collect();
    let data = (0..rows)
        .map(|r| {
            (0..columns).fold(Row::new(format!("r{r}")), |row, c| {
                row.with_cell(format!("c{c}"), format!("{r}:{c}"))
            })
        })
        .collect();
    TableModel::from_parts(defs, data, SequentialIds::new()).expect("valid model")
}

#[derive(Debug, Clone)]
enum Op {
    AddRow(usize),
    DeleteRow(usize),
    AddColumn(usize),
    DeleteColumn(usize),
    ReorderRows(usize, usize),
    ReorderColumns(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8).prop_map(Op::AddRow),
        (0usize..8).prop_map(Op::DeleteRow),
        (0usize..8).prop_map(Op::AddColumn),
        (0usize..8).prop_map(Op::DeleteColumn),
        (0usize..8, 0usize..8).prop_map(|(a, b)| Op::ReorderRows(a, b)),
        (0usize..8, 0usize..8).prop_map(|(a, b)| Op::ReorderColumns(a, b)),
    ]
}

fn apply(m: &mut TableModel, op: &Op) {
    // Errors are expected for out-of-range picks; they must leave the model intact.
    match *op {
        Op::AddRow(i) => {
            m.add_row(i);
        }
        Op::DeleteRow(i) => {
            let id = m.row_ids().nth(i).cloned();
            if let Some(id) = id {
                m.delete_row(&id).expect("live row");
            }
        }
        Op::AddColumn(i) => {
            m.add_new_column(i, "new").expect("fresh column");
        }
        Op::DeleteColumn(i) => {
            let id = m.column_order().get(i).cloned();
            if let Some(id) = id {
                m.delete_column(&id).expect("live column");
            }
        }
        Op::ReorderRows(a, b) => {
            let _ = m.reorder_rows(a, b);
        }
        Op::ReorderColumns(a, b) => {
            let _ = m.reorder_columns(a, b);
        }
    }
}

proptest! {
    #[test]
    fn reorder_then_inverse_restores_order(n in 1usize..10, from in 0usize..10, to in 0usize..10) {
        prop_assume!(from < n && to < n);
        let mut m = model(n, 1);
        let before = m.column_order().to_vec();
        m.reorder_columns(from, to).expect("in bounds");
        m.reorder_columns(to, from).expect("in bounds");
        prop_assert_eq!(m.column_order(), before.as_slice());
    }

    #[test]
    fn row_reorder_then_inverse_restores_order(n in 1usize..10, from in 0usize..10, to in 0usize..10) {
        prop_assume!(from < n && to < n);
        let mut m = model(2, n);
        let before: Vec<Row> = m.rows().to_vec();
        m.reorder_rows(from, to).expect("in bounds");
        m.reorder_rows(to, from).expect("in bounds");
        prop_assert_eq!(m.rows(), before.as_slice());
    }

    #[test]
    fn add_then_delete_row_restores_table(rows in 0usize..6, at in 0usize..8) {
        let mut m = model(2, rows);
        let before: Vec<Row> = m.rows().to_vec();
        let id = m.add_row(at);
        m.delete_row(&id).expect("just added");
        prop_assert_eq!(m.rows(), before.as_slice());
    }

    #[test]
    fn row_reorder_moves_one_item(n in 1usize..10, from in 0usize..10, to in 0usize..10) {
        prop_assume!(from < n && to < n);
        let mut m = model(1, n);
        let mut expected: Vec<String> = m.row_ids().map(|r| r.to_string()).collect();
        let item = expected.remove(from);
        expected.insert(to, item);
        m.reorder_rows(from, to).expect("in bounds");
        let actual: Vec<String> = m.row_ids().map(|r| r.to_string()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn random_ops_keep_model_consistent(ops in prop::collection::vec(op(), 0..40)) {
        let mut m = model(3, 3);
        for op in &ops {
            apply(&mut m, op);
            prop_assert!(m.is_consistent());
            prop_assert_eq!(m.column_order().len(), m.column_count());
        }
    }

    #[test]
    fn add_then_delete_column_restores_table(cols in 1usize..6, rows in 0usize..6, at in 0usize..8) {
        let mut m = model(cols, rows);
        let order = m.column_order().to_vec();
        let before: Vec<Row> = m.rows().to_vec();
        let id = m.add_new_column(at, "tmp").expect("fresh column");
        m.delete_column(&id).expect("just added");
        prop_assert_eq!(m.column_order(), order.as_slice());
        prop_assert_eq!(m.rows(), before.as_slice());
    }

    #[test]
    fn set_cell_touches_one_cell(cols in 1usize..5, rows in 1usize..5, r in 0usize..5, c in 0usize..5) {
        prop_assume!(r < rows && c < cols);
        let mut m = model(cols, rows);
        let before: Vec<Row> = m.rows().to_vec();
        let row_id = before[r].id().clone();
        let column_id = ColumnId::from(format!("c{c}"));
        m.set_cell(&row_id, &column_id, Value::from("changed")).expect("live cell");

        for (i, row) in m.rows().iter().enumerate() {
            for k in 0..cols {
                let col = ColumnId::from(format!("c{k}"));
                if i == r && k == c {
                    prop_assert_eq!(row.value(&col), Value::from("changed"));
                } else {
                    prop_assert_eq!(row.value(&col), before[i].value(&col));
                }
            }
        }
    }
}
