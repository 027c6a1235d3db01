use serde::de::DeserializeOwned;
use serde_json::Value;
use ureq::Agent;

use crate::{
    functions::xero_get,
    reports::{ReportParams, Reports, XeroReportType},
    APIError, APIResult, XeroContext,
};

pub trait XeroReport {
    fn get<T: XeroReportType>(
        ctx: &XeroContext,
        client: &Agent,
        report_type: &T,
        params: Option<&ReportParams>,
    ) -> APIResult<Self>
    where
        Self: Sized;
}

impl XeroReport for Reports {
    fn get<T: XeroReportType>(
        ctx: &XeroContext,
        client: &Agent,
        report_type: &T,
        params: Option<&ReportParams>,
    ) -> APIResult<Self> {
        let reports: Reports = fetch(ctx, client, report_type, params)?;
        log::info!(
            "Fetched {} with {} report(s)",
            report_type.display_name(),
            reports.reports.len()
        );
        Ok(reports)
    }
}

/// Fetches a report envelope as untyped JSON, keeping every field the API
/// returned.
pub fn get_json<T: XeroReportType>(
    ctx: &XeroContext,
    client: &Agent,
    report_type: &T,
    params: Option<&ReportParams>,
) -> APIResult<Value> {
    fetch(ctx, client, report_type, params)
}

fn fetch<U: DeserializeOwned, T: XeroReportType>(
    ctx: &XeroContext,
    client: &Agent,
    report_type: &T,
    params: Option<&ReportParams>,
) -> APIResult<U> {
    if let Some(params) = params {
        let valid = report_type.valid_query_params();
        if let Some((param, _)) = params.params().iter().find(|(name, _)| !valid.contains(name)) {
            return Err(APIError::InvalidParam {
                report: report_type.url_name(),
                param: *param,
            });
        }
    }

    let tenant_id = ctx.require_tenant()?;
    let path = format!("Reports/{}", report_type.url_name());
    xero_get(
        ctx,
        client,
        &ctx.endpoints.api,
        &path,
        params.map(|p| p.params().iter().map(|(k, v)| (*k, v.as_str()))),
        Some(tenant_id),
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        reports::{
            BalanceSheet, Date, FromDate, ProfitAndLoss, ReportRow, ToDate, TrackingCategoryId,
        },
        test_util::{local_agent, serve_once},
        Endpoints,
    };

    const PNL: &str = r#"{"Reports":[{"ReportName":"Profit and Loss","ReportTitles":["Profit & Loss"],"ReportDate":"1 Jan 2026","Rows":[
        {"RowType":"Header","Cells":[{"Value":""},{"Value":"2025"}]},
        {"RowType":"Section","Title":"Income","Rows":[{"RowType":"Row","Cells":[{"Value":"Sales"},{"Value":"100.00"}]}]}
    ]}]}"#;

    fn context(api: String) -> XeroContext {
        XeroContext::new("tok".into())
            .with_tenant("tenant-9")
            .with_endpoints(Endpoints {
                api,
                connections: String::new(),
            })
    }

    #[test]
    fn fetches_report_with_tenant_and_params() {
        let (base, server) = serve_once("200 OK", PNL);
        let params = ReportParams::new()
            .with(FromDate(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()))
            .with(ToDate(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));

        let reports =
            Reports::get(&context(base), &local_agent(), &ProfitAndLoss, Some(&params)).unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with(
            "GET /Reports/ProfitAndLoss?fromDate=2025-01-01&toDate=2025-12-31 "
        ));
        assert!(request.to_ascii_lowercase().contains("xero-tenant-id: tenant-9"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer tok"));

        let report = &reports.reports[0];
        assert_eq!(report.report_name, "Profit and Loss");
        assert!(matches!(report.rows[1], ReportRow::Section { .. }));
    }

    #[test]
    fn remote_failure_is_bad_request() {
        let (base, server) = serve_once("401 Unauthorized", r#"{"Title":"Unauthorized"}"#);
        let err = Reports::get(&context(base), &local_agent(), &BalanceSheet, None).unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, APIError::BadRequest { status: 401, .. }));
    }

    #[test]
    fn rejects_parameters_the_report_does_not_take() {
        let params = ReportParams::new().with(Date(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
        let err = Reports::get(
            &context("http://127.0.0.1:9/".into()),
            &local_agent(),
            &ProfitAndLoss,
            Some(&params),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            APIError::InvalidParam {
                report: "ProfitAndLoss",
                param: "date"
            }
        ));
    }

    #[test]
    fn requires_a_tenant() {
        let ctx = XeroContext::new("tok".into());
        let err = Reports::get(&ctx, &local_agent(), &BalanceSheet, None).unwrap_err();
        assert!(matches!(err, APIError::NoTenant));
    }

    #[test]
    fn json_keeps_fields_the_model_does_not_know() {
        let body = r#"{"Id":"r1","Status":"OK","Reports":[{"ReportName":"Balance Sheet","Fields":[{"FieldID":"f"}],"Rows":[]}]}"#;
        let (base, server) = serve_once("200 OK", body);
        let json = get_json(&context(base), &local_agent(), &BalanceSheet, None).unwrap();
        server.join().unwrap();

        assert_eq!(json["Status"], "OK");
        assert_eq!(json["Reports"][0]["Fields"][0]["FieldID"], "f");
    }

    #[test]
    fn tracking_category_is_profit_and_loss_only() {
        let params = ReportParams::new().with(TrackingCategoryId("cat-1".into()));
        let err = Reports::get(
            &context("http://127.0.0.1:9/".into()),
            &local_agent(),
            &BalanceSheet,
            Some(&params),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            APIError::InvalidParam {
                report: "BalanceSheet",
                param: "trackingCategoryID"
            }
        ));

        let (base, server) = serve_once("200 OK", PNL);
        Reports::get(&context(base), &local_agent(), &ProfitAndLoss, Some(&params)).unwrap();
        assert!(server
            .join()
            .unwrap()
            .starts_with("GET /Reports/ProfitAndLoss?trackingCategoryID=cat-1 "));
    }
}
