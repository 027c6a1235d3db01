//! Pieces shared by the command-line tools.
use std::{io, path::PathBuf, process::ExitCode};

use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use ureq::Agent;

use crate::{
    config::DEFAULT_TOKEN_FILE,
    functions::reports::{get_json, XeroReport},
    render::{render, ReportStyle},
    reports::{PaymentsOnly, Periods, ReportParams, Reports, StandardLayout, Timeframe, XeroReportType},
    session, Endpoints,
};

#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Token file written by xero-connect
    #[arg(long, default_value = DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,

    /// Tenant ID to report on
    #[arg(long)]
    pub tenant_id: Option<String>,

    /// 1-based position of the tenant among the authorized connections
    #[arg(long)]
    pub tenant_index: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Number of comparison periods
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=11))]
    pub periods: Option<u8>,

    /// Period size for comparisons: MONTH, QUARTER or YEAR
    #[arg(long)]
    pub timeframe: Option<Timeframe>,

    /// Use the standard layout instead of the organisation's custom one
    #[arg(long)]
    pub standard_layout: bool,

    /// Cash basis: only include payments
    #[arg(long)]
    pub payments_only: bool,

    /// Print the full JSON response instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ReportArgs {
    #[must_use]
    pub fn apply(&self, params: ReportParams) -> ReportParams {
        params
            .with_opt(self.periods.map(Periods))
            .with_opt(self.timeframe)
            .with_opt(self.standard_layout.then_some(StandardLayout(true)))
            .with_opt(self.payments_only.then_some(PaymentsOnly(true)))
    }
}

pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[must_use]
pub fn year_start() -> String {
    format!("{}-01-01", Local::now().year())
}

#[must_use]
pub fn year_end() -> String {
    format!("{}-12-31", Local::now().year())
}

/// Opens a session, fetches `report_type` and prints it.
pub fn run_report<T: XeroReportType>(
    session_args: &SessionArgs,
    report_args: &ReportArgs,
    report_type: &T,
    style: ReportStyle,
    params: ReportParams,
    announce: &str,
) -> ExitCode {
    run_report_with(
        Endpoints::default(),
        &xero_oauth::agent(),
        session_args,
        report_args,
        report_type,
        style,
        params,
        announce,
    )
}

/// [`run_report`] against explicit endpoints and agent.
#[allow(clippy::too_many_arguments)]
pub fn run_report_with<T: XeroReportType>(
    endpoints: Endpoints,
    client: &Agent,
    session_args: &SessionArgs,
    report_args: &ReportArgs,
    report_type: &T,
    style: ReportStyle,
    params: ReportParams,
    announce: &str,
) -> ExitCode {
    let ctx = match session::open_with(
        &session_args.token_file,
        endpoints,
        session_args.tenant_id.as_deref(),
        session_args.tenant_index,
        client,
    ) {
        Ok(Some(ctx)) => ctx,
        Ok(None) => {
            println!("Token file not found. Please run xero-connect first.");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}");
            log::debug!("{e:?}");
            return ExitCode::FAILURE;
        }
    };

    println!("{announce}");

    let params = report_args.apply(params);
    let printed = if report_args.json {
        get_json(&ctx, client, report_type, Some(&params)).map(|json| {
            serde_json::to_string_pretty(&json)
                .map(|json| println!("{json}"))
                .map_err(io::Error::from)
        })
    } else {
        Reports::get(&ctx, client, report_type, Some(&params)).map(|reports| {
            match reports.reports.first() {
                Some(report) => render(io::stdout().lock(), style, report),
                None => {
                    log::warn!("{} response contained no reports", report_type.display_name());
                    Ok(())
                }
            }
        })
    };

    match printed {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            eprintln!("Error printing report: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error fetching report: {e}");
            log::debug!("{e:?}");
            ExitCode::FAILURE
        }
    }
}
