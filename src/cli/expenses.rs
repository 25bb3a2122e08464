use super::ui;
use crate::core::analytics::CategoryShare;
use crate::core::period::YearMonth;
use comfy_table::{Attribute, Cell};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Expense totals per category with their share of all expenses.
pub fn display_category_totals(shares: &[CategoryShare], symbol: &str) -> String {
    if shares.is_empty() {
        return ui::style_text(
            "Not enough expense data to show the distribution by category.",
            ui::StyleType::Subtle,
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Total"),
        ui::header_cell("Share"),
    ]);

    for share in shares {
        table.add_row(vec![
            Cell::new(&share.category),
            ui::money_cell(share.total, symbol),
            ui::percentage_cell(share.percentage),
        ]);
    }

    let total: Decimal = shares.iter().map(|s| s.total).sum();
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        ui::money_cell(total, symbol).add_attribute(Attribute::Bold),
        ui::percentage_cell(100.0).add_attribute(Attribute::Bold),
    ]);

    table.to_string()
}

/// Month x category matrix of expenses.
pub fn display_monthly_by_category(
    matrix: &BTreeMap<YearMonth, BTreeMap<String, Decimal>>,
    symbol: &str,
) -> String {
    let Some(first_row) = matrix.values().next() else {
        return ui::style_text(
            "Not enough expense data to show the monthly evolution by category.",
            ui::StyleType::Subtle,
        );
    };
    // Every row carries the same zero-filled category set.
    let categories: Vec<&String> = first_row.keys().collect();

    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Month")];
    header.extend(categories.iter().map(|c| ui::header_cell(c)));
    header.push(ui::header_cell("Total"));
    table.set_header(header);

    for (month, row) in matrix {
        let mut cells = vec![Cell::new(month.to_string())];
        for category in &categories {
            let value = row.get(*category).copied().unwrap_or(Decimal::ZERO);
            cells.push(if value.is_zero() {
                ui::na_cell()
            } else {
                ui::money_cell(value, symbol)
            });
        }
        let month_total: Decimal = row.values().copied().sum();
        cells.push(ui::money_cell(month_total, symbol).add_attribute(Attribute::Bold));
        table.add_row(cells);
    }

    table.to_string()
}
