use super::ui;
use crate::core::analytics::DatedValue;
use comfy_table::Cell;

/// Running net balance, one row per date.
pub fn display_cumulative_balance(points: &[DatedValue], symbol: &str) -> String {
    if points.is_empty() {
        return ui::style_text(
            "No balance data available for the selected period.",
            ui::StyleType::Subtle,
        );
    }
    display_running_total(points, "Balance", symbol, true)
}

/// Running savings total, one row per date with savings.
pub fn display_cumulative_savings(points: &[DatedValue], symbol: &str) -> String {
    if points.is_empty() {
        return ui::style_text(
            "Not enough savings data to show accumulated savings.",
            ui::StyleType::Subtle,
        );
    }
    display_running_total(points, "Accumulated Savings", symbol, false)
}

fn display_running_total(points: &[DatedValue], label: &str, symbol: &str, signed: bool) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Movement"),
        ui::header_cell(label),
    ]);

    let mut previous = None;
    for point in points {
        let movement = previous.map_or(point.value, |p| point.value - p);
        previous = Some(point.value);
        let value_cell = if signed {
            ui::signed_money_cell(point.value, symbol)
        } else {
            ui::money_cell(point.value, symbol)
        };
        table.add_row(vec![
            Cell::new(point.date.format("%Y-%m-%d").to_string()),
            ui::delta_cell(Some(movement), symbol, false),
            value_cell,
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn point(date: &str, value: rust_decimal::Decimal) -> DatedValue {
        DatedValue {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            value,
        }
    }

    #[test]
    fn test_balance_shows_movements() {
        let points = vec![point("2024-01-05", dec!(5000)), point("2024-01-10", dec!(3500))];
        let output = display_cumulative_balance(&points, "R$");
        assert!(output.contains("2024-01-10"));
        assert!(output.contains("+R$5,000.00"));
        assert!(output.contains("R$-1,500.00"));
        assert!(output.contains("R$3,500.00"));
    }

    #[test]
    fn test_savings_empty() {
        assert!(display_cumulative_savings(&[], "R$").contains("Not enough savings data"));
    }
}
