pub mod cli;
pub mod core;

use crate::cli::{balance, cashflow, details, expenses, ui};
use crate::core::config::AppConfig;
use crate::core::filter::{self, DateFilter};
use crate::core::loader::{self, LoadOptions};
use crate::core::{Dashboard, Transaction};
use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Summary,
    Cashflow,
    Income,
    Expenses,
    Balance,
    Savings,
    Details,
    Months,
    Dashboard,
    Export { output: Option<PathBuf> },
}

/// Date filter as requested on the command line, before the data is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRequest {
    Filter(DateFilter),
    /// Compare the two most recent months in the data.
    CompareLatest,
}

impl Default for FilterRequest {
    fn default() -> Self {
        FilterRequest::Filter(DateFilter::default())
    }
}

impl FilterRequest {
    pub fn resolve(self, records: &[Transaction]) -> Result<DateFilter> {
        match self {
            FilterRequest::Filter(filter) => Ok(filter),
            FilterRequest::CompareLatest => DateFilter::compare_latest(records)
                .ok_or_else(|| anyhow!("No months available to compare")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_path: Option<String>,
    pub input: Option<String>,
    pub filter: FilterRequest,
}

pub fn run_command(command: AppCommand, options: &RunOptions) -> Result<()> {
    info!("Cashflow report starting...");

    let config = match options.config_path.as_deref() {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let input = config.resolve_input(options.input.as_deref())?;
    let records = loader::load_from_path(&input, &LoadOptions::from(&config))?;
    info!("Loaded {} transactions from {}", records.len(), input.display());

    if command == AppCommand::Months {
        println!("{}", render_months(&records));
        return Ok(());
    }

    let date_filter = options.filter.resolve(&records)?;
    let dashboard = Dashboard::build(&records, &date_filter)?;

    match command {
        AppCommand::Export { output } => export(&dashboard, output.as_deref()),
        other => {
            println!("{}", render_report(&other, &dashboard, &config.currency_symbol));
            Ok(())
        }
    }
}

/// Renders one report (or all of them for [`AppCommand::Dashboard`]).
pub fn render_report(command: &AppCommand, dashboard: &Dashboard, symbol: &str) -> String {
    let mut output = format!(
        "{} {}\n",
        ui::style_text("Period:", ui::StyleType::TotalLabel),
        dashboard.filter
    );
    if dashboard.is_empty() {
        output.push_str(&ui::style_text(
            "No transactions in the selected period.\n",
            ui::StyleType::Subtle,
        ));
    }

    let section = |title: &str, body: String| {
        format!(
            "\n{}\n\n{body}\n",
            ui::style_text(title, ui::StyleType::Title)
        )
    };

    let summary = || section("Monthly Summary", dashboard.summary.display_as_table(symbol));
    let cashflow = || {
        section(
            "Monthly Cash Flow",
            cashflow::display_monthly_cashflow(&dashboard.monthly_cashflow, symbol),
        )
    };
    let income = || {
        section(
            "Monthly Income",
            cashflow::display_monthly_income(&dashboard.monthly_income, symbol),
        )
    };
    let by_category = || {
        section(
            "Expenses by Category",
            expenses::display_category_totals(&dashboard.expense_by_category, symbol),
        )
    };
    let monthly_by_category = || {
        section(
            "Monthly Expenses by Category",
            expenses::display_monthly_by_category(&dashboard.monthly_expense_by_category, symbol),
        )
    };
    let balance = || {
        section(
            "Accumulated Net Balance",
            balance::display_cumulative_balance(&dashboard.cumulative_balance, symbol),
        )
    };
    let savings = || {
        section(
            "Accumulated Savings",
            balance::display_cumulative_savings(&dashboard.cumulative_savings, symbol),
        )
    };
    let details = || {
        section(
            "Expense Details",
            details::display_expense_rows(&dashboard.expenses, symbol),
        )
    };

    let sections: Vec<String> = match command {
        AppCommand::Summary => vec![summary()],
        AppCommand::Cashflow => vec![cashflow()],
        AppCommand::Income => vec![income()],
        AppCommand::Expenses => vec![by_category(), monthly_by_category()],
        AppCommand::Balance => vec![balance()],
        AppCommand::Savings => vec![savings()],
        AppCommand::Details => vec![details()],
        AppCommand::Dashboard => vec![
            summary(),
            cashflow(),
            income(),
            by_category(),
            balance(),
            savings(),
            monthly_by_category(),
            details(),
        ],
        AppCommand::Months | AppCommand::Export { .. } => Vec::new(),
    };
    output.push_str(&sections.concat());
    output
}

fn render_months(records: &[Transaction]) -> String {
    let months = filter::available_months(records);
    if months.is_empty() {
        return ui::style_text("No transactions found.", ui::StyleType::Subtle);
    }
    months
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn export(dashboard: &Dashboard, output: Option<&std::path::Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(dashboard).context("Failed to serialize dashboard")?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            info!("Exported dashboard to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
