use super::ui;
use crate::core::dashboard::ExpenseRow;
use comfy_table::Cell;

/// Detailed list of the expenses in the selected period.
pub fn display_expense_rows(rows: &[ExpenseRow], symbol: &str) -> String {
    if rows.is_empty() {
        return ui::style_text(
            "No expense data available for the selected period.",
            ui::StyleType::Subtle,
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Description"),
        ui::header_cell("Category"),
        ui::header_cell("Amount"),
        ui::header_cell("Recurring"),
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(row.date.format("%Y-%m-%d").to_string()),
            Cell::new(&row.description),
            Cell::new(&row.category),
            ui::money_cell(row.amount, symbol),
            Cell::new(if row.recurring { "Yes" } else { "No" }),
        ]);
    }

    table.to_string()
}
