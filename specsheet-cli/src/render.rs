//! Plain-text rendering of a table.

use unicode_width::UnicodeWidthStr;

use specsheet_lib::model::TableModel;

const SEPARATOR: &str = " | ";

/// Render the model as an aligned text table.
///
/// The first column holds row ids; the rest follow the column order.
/// Headers of PII columns carry a trailing `*`.
pub fn render(title: &str, model: &TableModel) -> String {
    let mut header = vec!["id".to_string()];
    header.extend(model.columns().map(|c| {
        if c.metadata.is_pii {
            format!("{}*", c.header)
        } else {
            c.header.clone()
        }
    }));

    let body: Vec<Vec<String>> = model
        .rows()
        .iter()
        .map(|row| {
            let mut line = vec![row.id().to_string()];
            line.extend(model.column_order().iter().map(|c| row.value(c).to_text()));
            line
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for line in &body {
        for (w, cell) in widths.iter_mut().zip(line) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for line in &body {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| pad(cell, *w))
        .collect();
    out.push_str(padded.join(SEPARATOR).trim_end());
    out.push('\n');
}

/// Pad to a display width; wide characters count double.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use specsheet_lib::document::sample_document;
    use specsheet_lib::id::SequentialIds;
    use specsheet_lib::model::{Column, Row};

    #[test]
    fn test_render_sample_marks_pii() {
        let model = sample_document().into_model(SequentialIds::new()).unwrap();
        let text = render("User_Onboarding_Export_v1", &model);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "User_Onboarding_Export_v1");
        assert!(lines[1].starts_with("id          | User Name*"));
        assert!(lines[1].contains("Email Address*"));
        assert!(lines[1].contains("Account Status |"));
        assert!(lines[3].starts_with("row_alice   | Alice Johnson"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("日本", 6), "日本  ");
        assert_eq!(pad("abc", 2), "abc");
    }

    #[test]
    fn test_render_follows_column_order() {
        let mut model = TableModel::from_parts(
            vec![Column::new("a", "A"), Column::new("b", "B")],
            vec![Row::new("1").with_cell("a", "x").with_cell("b", "y")],
            SequentialIds::new(),
        )
        .unwrap();
        model.reorder_columns(0, 1).unwrap();
        let text = render("t", &model);
        assert_eq!(text, "t\nid | B | A\n-- | - | -\n1  | y | x\n");
    }
}
