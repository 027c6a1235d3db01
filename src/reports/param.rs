use std::{fmt, str::FromStr};

use chrono::NaiveDate;

pub trait ReportParam {
    fn name() -> &'static str;
    fn value(&self) -> String;
}

/// Comparison period granularity for multi-period reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Month,
    Quarter,
    Year,
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Timeframe::Month => "MONTH",
            Timeframe::Quarter => "QUARTER",
            Timeframe::Year => "YEAR",
        })
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MONTH" => Ok(Timeframe::Month),
            "QUARTER" => Ok(Timeframe::Quarter),
            "YEAR" => Ok(Timeframe::Year),
            other => Err(format!(
                "unknown timeframe `{other}`, expected MONTH, QUARTER or YEAR"
            )),
        }
    }
}

impl ReportParam for Timeframe {
    fn name() -> &'static str {
        "timeframe"
    }
    fn value(&self) -> String {
        self.to_string()
    }
}

macro_rules! impl_report_param {
    ($($str_name:ident - $query:expr ; $val:ty);+ $(;)?) => {
        $(
            #[derive(Debug, Clone, PartialEq)]
            pub struct $str_name(pub $val);
            impl ReportParam for $str_name {
                fn name() -> &'static str {
                    $query
                }
                fn value(&self) -> String {
                    self.0.to_string()
                }
            }
        )+
    };
}

impl_report_param!(
    Date - "date"; NaiveDate;
    FromDate - "fromDate"; NaiveDate;
    ToDate - "toDate"; NaiveDate;
    Periods - "periods"; u8;
    StandardLayout - "standardLayout"; bool;
    PaymentsOnly - "paymentsOnly"; bool;
    TrackingCategoryId - "trackingCategoryID"; String;
);

/// Ordered query parameters for a report request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportParams(Vec<(&'static str, String)>);

impl ReportParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `param`, replacing an earlier value of the same name.
    #[must_use]
    pub fn with<P: ReportParam>(mut self, param: P) -> Self {
        self.0.retain(|(name, _)| *name != P::name());
        self.0.push((P::name(), param.value()));
        self
    }

    /// Adds `param` only when it is `Some`.
    #[must_use]
    pub fn with_opt<P: ReportParam>(self, param: Option<P>) -> Self {
        match param {
            Some(param) => self.with(param),
            None => self,
        }
    }

    #[must_use]
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.0
    }
}
