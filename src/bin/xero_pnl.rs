use std::process::ExitCode;

use clap::Parser;
use xero_reports::{
    cli::{self, ReportArgs, SessionArgs},
    render::ReportStyle,
    reports::{FromDate, ProfitAndLoss, ReportParams, ToDate, TrackingCategoryId},
};

/// Fetches and prints the Profit and Loss report for a date range.
#[derive(Parser)]
#[command(name = "xero-pnl", version, about = "Generate Xero Profit and Loss Report")]
struct Cli {
    /// Start date (YYYY-MM-DD)
    #[arg(long, default_value_t = cli::year_start())]
    start_date: String,

    /// End date (YYYY-MM-DD)
    #[arg(long, default_value_t = cli::year_end())]
    end_date: String,

    /// Break the report down by this tracking category
    #[arg(long)]
    tracking_category_id: Option<String>,

    #[command(flatten)]
    session: SessionArgs,

    #[command(flatten)]
    report: ReportArgs,
}

fn main() -> ExitCode {
    cli::init_logging();
    let args = Cli::parse();

    let (Some(from), Some(to)) = (
        cli::parse_date(&args.start_date),
        cli::parse_date(&args.end_date),
    ) else {
        eprintln!("Error: Dates must be in YYYY-MM-DD format");
        return ExitCode::FAILURE;
    };

    cli::run_report(
        &args.session,
        &args.report,
        &ProfitAndLoss,
        ReportStyle::ProfitAndLoss,
        ReportParams::new()
            .with(FromDate(from))
            .with(ToDate(to))
            .with_opt(args.tracking_category_id.map(TrackingCategoryId)),
        &format!("Fetching P&L from {from} to {to}..."),
    )
}
