use std::process::ExitCode;

use clap::Parser;
use xero_reports::{
    cli::{self, ReportArgs, SessionArgs},
    render::ReportStyle,
    reports::{BalanceSheet, Date, ReportParams},
};

/// Fetches and prints the Balance Sheet for a single date.
#[derive(Parser)]
#[command(name = "xero-balance-sheet", version, about = "Generate Xero Balance Sheet Report")]
struct Cli {
    /// Report date (YYYY-MM-DD)
    #[arg(long, default_value_t = cli::year_end())]
    date: String,

    #[command(flatten)]
    session: SessionArgs,

    #[command(flatten)]
    report: ReportArgs,
}

fn main() -> ExitCode {
    cli::init_logging();
    let args = Cli::parse();

    let Some(date) = cli::parse_date(&args.date) else {
        eprintln!("Error: Date must be in YYYY-MM-DD format");
        return ExitCode::FAILURE;
    };

    cli::run_report(
        &args.session,
        &args.report,
        &BalanceSheet,
        ReportStyle::BalanceSheet,
        ReportParams::new().with(Date(date)),
        &format!("Fetching Balance Sheet as of {date}..."),
    )
}
