use super::ui;
use crate::core::TransactionType;
use crate::core::analytics::MonthlyTotals;
use crate::core::dashboard::{MonthlyAmount, MonthlyCashflow};
use comfy_table::{Attribute, Cell};
use rust_decimal::Decimal;

/// Income vs expenses vs savings per month, with the net for each month and
/// a total row.
pub fn display_monthly_cashflow(rows: &[MonthlyCashflow], symbol: &str) -> String {
    if rows.is_empty() {
        return ui::style_text(
            "No cash-flow data available for the selected period.",
            ui::StyleType::Subtle,
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Income"),
        ui::header_cell("Expenses"),
        ui::header_cell("Savings"),
        ui::header_cell("Net"),
    ]);

    let mut totals = MonthlyTotals::default();
    for row in rows {
        let mut cells = vec![Cell::new(row.month.to_string())];
        for kind in TransactionType::ALL {
            let amount = row.totals.get(kind);
            totals.add(kind, amount);
            cells.push(ui::money_cell(amount, symbol));
        }
        cells.push(ui::signed_money_cell(row.net, symbol));
        table.add_row(cells);
    }

    if rows.len() > 1 {
        let mut cells = vec![Cell::new("Total").add_attribute(Attribute::Bold)];
        for kind in TransactionType::ALL {
            cells.push(ui::money_cell(totals.get(kind), symbol).add_attribute(Attribute::Bold));
        }
        cells.push(ui::signed_money_cell(totals.net(), symbol).add_attribute(Attribute::Bold));
        table.add_row(cells);
    }

    table.to_string()
}

/// Monthly income evolution with the change from the previous month.
pub fn display_monthly_income(rows: &[MonthlyAmount], symbol: &str) -> String {
    if rows.is_empty() {
        return ui::style_text(
            "No monthly income data available for the selected period.",
            ui::StyleType::Subtle,
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Income"),
        ui::header_cell("Change"),
    ]);

    let amounts: Vec<Decimal> = rows.iter().map(|r| r.amount).collect();
    for (i, row) in rows.iter().enumerate() {
        let change = (i > 0).then(|| crate::core::analytics::period_delta(&amounts, i));
        table.add_row(vec![
            Cell::new(row.month.to_string()),
            ui::money_cell(row.amount, symbol),
            ui::delta_cell(change, symbol, false),
        ]);
    }

    table.to_string()
}
