use super::ui;
use crate::core::summary::{Metric, SummaryCards, SummaryScope};
use comfy_table::Cell;

impl SummaryCards {
    pub fn display_as_table(&self, symbol: &str) -> String {
        let heading = match self.scope {
            SummaryScope::LatestInRange => {
                "Summary for the selected period (last month vs previous month)".to_string()
            }
            SummaryScope::Month { month } => format!("Summary for {month}"),
            SummaryScope::Compare { first, second } => {
                format!("Comparison between {first} and {second}")
            }
        };
        let label_suffix = match self.scope {
            SummaryScope::LatestInRange => " (last month)".to_string(),
            SummaryScope::Month { .. } => String::new(),
            SummaryScope::Compare { second, .. } => format!(" ({second})"),
        };
        let has_deltas = !matches!(self.scope, SummaryScope::Month { .. });

        let mut table = ui::new_styled_table();
        let mut header = vec![ui::header_cell("Metric"), ui::header_cell("Value")];
        if has_deltas {
            header.push(ui::header_cell("Change"));
        }
        table.set_header(header);

        let rows: [(&str, &Metric, bool); 4] = [
            ("Total Income", &self.income, false),
            ("Total Expenses", &self.expenses, true),
            ("Total Savings", &self.savings, false),
            ("Net Balance", &self.net_balance, false),
        ];
        for (label, metric, inverted) in rows {
            let mut row = vec![
                Cell::new(format!("{label}{label_suffix}")),
                ui::money_cell(metric.value, symbol),
            ];
            if has_deltas {
                row.push(ui::delta_cell(metric.delta, symbol, inverted));
            }
            table.add_row(row);
        }

        let mut output = format!("{}\n\n", ui::style_text(&heading, ui::StyleType::Heading));
        output.push_str(&table.to_string());

        if let Some(month) = self.breakdown_month {
            output.push_str(&format!(
                "\n\n{}\n",
                ui::style_text(
                    &format!("Expenses by category ({month})"),
                    ui::StyleType::TotalLabel
                )
            ));
            if self.expense_breakdown.is_empty() {
                output.push_str(&ui::style_text(
                    "No expenses by category for the selected month.",
                    ui::StyleType::Subtle,
                ));
            } else {
                for entry in &self.expense_breakdown {
                    output.push_str(&format!(
                        "- {}: {}\n",
                        entry.category,
                        ui::format_money(entry.total, symbol)
                    ));
                }
            }
        } else if matches!(self.scope, SummaryScope::LatestInRange) {
            output.push_str(&format!(
                "\n\n{}",
                ui::style_text(
                    "No expense data available for the selected period.",
                    ui::StyleType::Subtle
                )
            ));
        }

        output
    }
}
