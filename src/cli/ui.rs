use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use rust_decimal::{Decimal, RoundingStrategy};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Heading,
    TotalLabel,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Heading => style(text).cyan().bold(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an amount as `R$1,234.56`. Negative values keep the sign after
/// the symbol (`R$-1,234.56`).
pub fn format_money(value: Decimal, symbol: &str) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{symbol}{sign}{grouped}.{frac_part}")
}

/// Right-aligned money cell.
pub fn money_cell(value: Decimal, symbol: &str) -> Cell {
    Cell::new(format_money(value, symbol)).set_alignment(CellAlignment::Right)
}

/// Money cell colored by sign, used for balances.
pub fn signed_money_cell(value: Decimal, symbol: &str) -> Cell {
    let cell = money_cell(value, symbol);
    if value.is_sign_negative() && !value.is_zero() {
        cell.fg(Color::Red)
    } else {
        cell.fg(Color::Green)
    }
}

/// Creates a cell for a period-over-period change with color coding.
/// `inverted` flips the colors for metrics where growth is bad (expenses).
pub fn delta_cell(delta: Option<Decimal>, symbol: &str, inverted: bool) -> Cell {
    let Some(delta) = delta else {
        return na_cell();
    };
    let text = format_money(delta, symbol);
    let text = if delta.is_sign_positive() && !delta.is_zero() {
        format!("+{text}")
    } else {
        text
    };
    let color = if delta.is_zero() {
        Color::DarkGrey
    } else if delta.is_sign_positive() != inverted {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(text)
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Right-aligned percentage cell.
pub fn percentage_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.1}%")).set_alignment(CellAlignment::Right)
}

/// Creates a cell for missing values.
pub fn na_cell() -> Cell {
    Cell::new("N/A")
        .fg(Color::DarkGrey)
        .set_alignment(CellAlignment::Right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(dec!(0), "R$"), "R$0.00");
        assert_eq!(format_money(dec!(12.5), "R$"), "R$12.50");
        assert_eq!(format_money(dec!(999.999), "R$"), "R$1,000.00");
        assert_eq!(format_money(dec!(1234567.891), "$"), "$1,234,567.89");
        assert_eq!(format_money(dec!(100000), "€"), "€100,000.00");
    }

    #[test]
    fn test_format_money_negative() {
        assert_eq!(format_money(dec!(-1500.255), "R$"), "R$-1,500.26");
        assert_eq!(format_money(dec!(-0.001), "R$"), "R$0.00");
    }
}
