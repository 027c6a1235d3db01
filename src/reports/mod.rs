use serde::{Deserialize, Serialize};

mod param;
pub use param::{
    Date, FromDate, Periods, PaymentsOnly, ReportParam, ReportParams, StandardLayout, Timeframe,
    ToDate, TrackingCategoryId,
};

/// Response envelope of the `Reports/{name}` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reports {
    #[serde(rename = "Reports", default)]
    pub reports: Vec<Report>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Report {
    #[serde(rename = "ReportID", default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    #[serde(default)]
    pub report_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    #[serde(default)]
    pub report_titles: Vec<String>,
    #[serde(default)]
    pub report_date: String,
    #[serde(rename = "UpdatedDateUTC", default, skip_serializing_if = "Option::is_none")]
    pub updated_date_utc: Option<String>,
    #[serde(default)]
    pub rows: Vec<ReportRow>,
}

/// One line of a report, discriminated by its `RowType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "RowType")]
pub enum ReportRow {
    Header {
        #[serde(rename = "Cells", default)]
        cells: Vec<Cell>,
    },
    Section {
        #[serde(rename = "Title", default)]
        title: String,
        #[serde(rename = "Rows", default)]
        rows: Vec<ReportRow>,
    },
    Row {
        #[serde(rename = "Cells", default)]
        cells: Vec<Cell>,
    },
    SummaryRow {
        #[serde(rename = "Cells", default)]
        cells: Vec<Cell>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cell {
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<CellAttribute>,
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self {
            value: value.to_string(),
            attributes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CellAttribute {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub value: String,
}

pub trait XeroReportType {
    fn url_name(&self) -> &'static str;
    fn display_name(&self) -> &'static str;
    fn valid_query_params(&self) -> &'static [&'static str];
}

macro_rules! impl_report_type {
    ($($report_ty:ident, $url_name:expr, $display:expr, [$($param:tt),* $(,)?];)+) => {
        $(
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $report_ty;

            impl XeroReportType for $report_ty {
                fn url_name(&self) -> &'static str {
                    $url_name
                }

                fn display_name(&self) -> &'static str {
                    $display
                }

                fn valid_query_params(&self) -> &'static [&'static str] {
                    &[$($param),*]
                }
            }
        )+
    };
}

impl_report_type!(
    BalanceSheet, "BalanceSheet", "Balance Sheet", ["date", "periods", "timeframe", "trackingOptionID1", "trackingOptionID2", "standardLayout", "paymentsOnly"];
    ProfitAndLoss, "ProfitAndLoss", "Profit and Loss", ["fromDate", "toDate", "periods", "timeframe", "trackingCategoryID", "trackingCategoryID2", "trackingOptionID", "trackingOptionID2", "standardLayout", "paymentsOnly"];
);
