use anyhow::Result;
use cashflow::core::log::init_logging;
use cashflow::core::{DateFilter, YearMonth};
use cashflow::{AppCommand, FilterRequest, RunOptions};
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Cash-flow CSV file (overrides the config file)
    #[arg(short, long, global = true)]
    input: Option<String>,

    #[command(flatten)]
    filter: FilterArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct FilterArgs {
    /// First day of the period (YYYY-MM-DD), defaults to the earliest transaction
    #[arg(long, global = true, value_name = "DATE")]
    from: Option<NaiveDate>,

    /// Last day of the period (YYYY-MM-DD), defaults to the latest transaction
    #[arg(long, global = true, value_name = "DATE")]
    to: Option<NaiveDate>,

    /// Report on a single month (YYYY-MM)
    #[arg(
        long,
        global = true,
        conflicts_with_all = ["from", "to", "compare", "compare_latest"]
    )]
    month: Option<YearMonth>,

    /// Compare two months (YYYY-MM YYYY-MM); the second one is reported
    #[arg(
        long,
        global = true,
        num_args = 2,
        value_names = ["FIRST", "SECOND"],
        conflicts_with_all = ["from", "to", "compare_latest"]
    )]
    compare: Option<Vec<YearMonth>>,

    /// Compare the latest month in the data with the month before it
    #[arg(long, global = true, conflicts_with_all = ["from", "to"])]
    compare_latest: bool,
}

impl From<FilterArgs> for FilterRequest {
    fn from(args: FilterArgs) -> FilterRequest {
        if let Some(month) = args.month {
            return FilterRequest::Filter(DateFilter::Month { month });
        }
        if let Some([first, second]) = args.compare.as_deref() {
            return FilterRequest::Filter(DateFilter::Compare {
                first: *first,
                second: *second,
            });
        }
        if args.compare_latest {
            return FilterRequest::CompareLatest;
        }
        FilterRequest::Filter(DateFilter::Range {
            start: args.from,
            end: args.to,
        })
    }
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::Summary => AppCommand::Summary,
            Commands::Cashflow => AppCommand::Cashflow,
            Commands::Income => AppCommand::Income,
            Commands::Expenses => AppCommand::Expenses,
            Commands::Balance => AppCommand::Balance,
            Commands::Savings => AppCommand::Savings,
            Commands::Details => AppCommand::Details,
            Commands::Months => AppCommand::Months,
            Commands::Dashboard => AppCommand::Dashboard,
            Commands::Export { output } => AppCommand::Export { output },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration, recording --input when given
    Setup,
    /// Display income, expenses, savings and net balance cards
    Summary,
    /// Display monthly income vs expenses vs savings
    Cashflow,
    /// Display the monthly income evolution
    Income,
    /// Display expenses by category, overall and per month
    Expenses,
    /// Display the accumulated net balance
    Balance,
    /// Display the accumulated savings
    Savings,
    /// Display the detailed expense table
    Details,
    /// List the months present in the input file
    Months,
    /// Display every report
    Dashboard,
    /// Write all aggregates as JSON
    Export {
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => cashflow::cli::setup::setup(cli.input.as_deref()).map(|path| {
            println!("Created default configuration at {}", path.display());
        }),
        Some(cmd) => {
            let options = RunOptions {
                config_path: cli.config_path,
                input: cli.input,
                filter: cli.filter.into(),
            };
            cashflow::run_command(cmd.into(), &options)
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
