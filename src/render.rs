//! Plain-text rendering of report rows.
//!
//! Traversal stops one level below the top: a section's own rows are printed,
//! but headers or sections nested inside a section are not. Label/value rows
//! need at least two cells, shorter rows are skipped without output.
use std::io::{self, Write};

use crate::reports::{Cell, Report, ReportRow};

pub const SEPARATOR_WIDTH: usize = 60;
pub const NO_ROWS: &str = "No rows returned in the report.";

const LABEL_WIDTH: usize = 40;
const VALUE_WIDTH: usize = 15;
const TOTAL_PREFIX: &str = "TOTAL: ";

/// Column policy for label/value lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// One right-aligned value column.
    BalanceSheet,
    /// Every value column joined with `", "`, top-level totals prefixed.
    ProfitAndLoss,
}

pub struct Renderer<W> {
    out: W,
    style: ReportStyle,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, style: ReportStyle) -> Self {
        Self { out, style }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Title block followed by the rows.
    pub fn render_report(&mut self, report: &Report) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Report: {}", report.report_name)?;
        writeln!(
            self.out,
            "Title: {}",
            report.report_titles.first().map_or("", String::as_str)
        )?;
        writeln!(self.out, "Date: {}", report.report_date)?;
        self.separator()?;
        self.render_rows(&report.rows)
    }

    pub fn render_rows(&mut self, rows: &[ReportRow]) -> io::Result<()> {
        if rows.is_empty() {
            return writeln!(self.out, "{NO_ROWS}");
        }

        writeln!(self.out, "Found {} rows.", rows.len())?;
        for row in rows {
            self.render_row(row)?;
        }
        Ok(())
    }

    /// Renders a top-level row.
    pub fn render_row(&mut self, row: &ReportRow) -> io::Result<()> {
        match row {
            ReportRow::Header { cells } => {
                let joined = cells
                    .iter()
                    .map(|c| c.value.as_str())
                    .collect::<Vec<_>>()
                    .join(" | ");
                writeln!(self.out, "{joined}")?;
                self.separator()
            }
            ReportRow::Section { title, rows } => {
                writeln!(self.out)?;
                writeln!(self.out, "--- {title} ---")?;
                for child in rows {
                    self.render_section_child(child)?;
                }
                Ok(())
            }
            ReportRow::Row { cells } => self.line(cells, false),
            ReportRow::SummaryRow { cells } => self.summary(cells, true),
        }
    }

    fn render_section_child(&mut self, row: &ReportRow) -> io::Result<()> {
        match row {
            ReportRow::Row { cells } => self.line(cells, false),
            ReportRow::SummaryRow { cells } => self.summary(cells, false),
            ReportRow::Header { .. } | ReportRow::Section { .. } => Ok(()),
        }
    }

    fn summary(&mut self, cells: &[Cell], top_level: bool) -> io::Result<()> {
        if cells.len() < 2 {
            return Ok(());
        }
        self.separator()?;
        self.line(cells, top_level)
    }

    fn line(&mut self, cells: &[Cell], total: bool) -> io::Result<()> {
        let [label, values @ ..] = cells else {
            return Ok(());
        };
        if values.is_empty() {
            return Ok(());
        }
        let label = label.value.as_str();

        match self.style {
            ReportStyle::BalanceSheet => writeln!(
                self.out,
                "{label:<lw$} {:>vw$}",
                values[0].value,
                lw = LABEL_WIDTH,
                vw = VALUE_WIDTH
            ),
            ReportStyle::ProfitAndLoss => {
                let joined = values
                    .iter()
                    .map(|c| c.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                if total {
                    let width = LABEL_WIDTH - TOTAL_PREFIX.len();
                    writeln!(self.out, "{TOTAL_PREFIX}{label:<width$} {joined}")
                } else {
                    writeln!(self.out, "{label:<lw$} {joined}", lw = LABEL_WIDTH)
                }
            }
        }
    }

    fn separator(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "-".repeat(SEPARATOR_WIDTH))
    }
}

/// Renders `report` in `style` into `out`.
pub fn render<W: Write>(out: W, style: ReportStyle, report: &Report) -> io::Result<()> {
    Renderer::new(out, style).render_report(report)
}
