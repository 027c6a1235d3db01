use serde::de::DeserializeOwned;
use ureq::{http::Method, Agent};

use crate::{client::build_request, APIError, APIResult, XeroContext};

pub mod reports;

/// Sends a GET to `base` + `path` and decodes the JSON response.
///
/// # Arguments
///
/// * `ctx` - The context holding the bearer token
/// * `client` - The blocking agent that performs the call
/// * `base` - One of the context's endpoint base URLs
/// * `path` - Path appended to `base`
/// * `query` - Optional query parameters
/// * `tenant_id` - Sent as `xero-tenant-id` when present
pub(crate) fn xero_get<U, S, SS>(
    ctx: &XeroContext,
    client: &Agent,
    base: &str,
    path: &str,
    query: Option<impl IntoIterator<Item = (S, SS)>>,
    tenant_id: Option<&str>,
) -> APIResult<U>
where
    U: DeserializeOwned,
    S: AsRef<str>,
    SS: AsRef<str>,
{
    let request = build_request(
        Method::GET,
        base,
        path,
        query,
        &ctx.access_token,
        tenant_id,
    )?;
    let mut response = client.run(request)?;
    let status = response.status();
    let body = response.body_mut().read_to_string()?;

    if !status.is_success() {
        log::error!("Request to {base}{path} failed with {status}");
        return Err(APIError::BadRequest {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
