//! The built-in sample document.

use super::{DocumentRow, SpecDocument};
use crate::model::{Column, DataType};

/// A small user-export table, handy for demos and tests.
pub fn sample_document() -> SpecDocument {
    let columns = vec![
        Column::new("col_name", "User Name")
            .with_width(180)
            .with_data_type(DataType::String)
            .with_pii(true)
            .with_comment("Full legal name"),
        Column::new("col_email", "Email Address")
            .with_width(220)
            .with_data_type(DataType::Email)
            .with_pii(true)
            .with_comment("Primary contact"),
        Column::new("col_status", "Account Status")
            .with_width(130)
            .with_data_type(DataType::Enum)
            .with_comment("Active/Pending/Banned")
            .with_options(["Active", "Pending", "Banned"]),
        Column::new("col_last_login", "Last Login")
            .with_data_type(DataType::DateTime)
            .with_comment("UTC format"),
    ];

    let rows = [
        ("row_alice", "Alice Johnson", "alice@company.com", "Active", "2024-05-12"),
        ("row_bob", "Bob Smith", "bob@hr.org", "Pending", "2024-05-10"),
        ("row_charlie", "Charlie Davis", "charlie@tech.io", "Active", "2024-05-14"),
    ]
    .into_iter()
    .map(|(id, name, email, status, login)| {
        DocumentRow::new(id)
            .with_cell("col_name", name)
            .with_cell("col_email", email)
            .with_cell("col_status", status)
            .with_cell("col_last_login", login)
    })
    .collect();

    SpecDocument {
        document_name: "User_Onboarding_Export_v1".to_string(),
        columns,
        rows,
    }
}
