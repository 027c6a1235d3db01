use ureq::{
    http::{request::Builder, Method, Request},
    SendBody,
};
use urlencoding::encode;

use crate::APIResult;

mod context;
pub use context::XeroContext;

pub(crate) fn set_headers(access_token: &str, tenant_id: Option<&str>, request: Builder) -> Builder {
    let bt = format!("Bearer {access_token}");
    let mut request = request.header("Authorization", bt);
    if let Some(tenant_id) = tenant_id {
        request = request.header("xero-tenant-id", tenant_id);
    }
    request.header("Accept", "application/json")
}

pub(crate) fn build_request<S, SS>(
    method: Method,
    base: &str,
    path: &str,
    query: Option<impl IntoIterator<Item = (S, SS)>>,
    access_token: &str,
    tenant_id: Option<&str>,
) -> APIResult<Request<SendBody<'static>>>
where
    S: AsRef<str>,
    SS: AsRef<str>,
{
    let url = build_url(base, path, query);
    let mut request = Request::builder().method(method.clone()).uri(url.as_str());
    request = set_headers(access_token, tenant_id, request);
    let request = request.body(SendBody::none())?;

    log::debug!("Built Request with params: {method}-{url}");

    Ok(request)
}

pub(crate) fn build_url<S, SS>(
    base: &str,
    path: &str,
    query: Option<impl IntoIterator<Item = (S, SS)>>,
) -> String
where
    S: AsRef<str>,
    SS: AsRef<str>,
{
    let mut url = base.to_string();
    url.push_str(path);
    if let Some(q) = query {
        let query_string = q
            .into_iter()
            .map(|(k, v)| format!("{}={}", encode(k.as_ref()), encode(v.as_ref())))
            .collect::<Vec<_>>()
            .join("&");
        if !query_string.is_empty() {
            url.push('?');
            url.push_str(&query_string);
        }
    }
    url
}
