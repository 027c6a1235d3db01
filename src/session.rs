//! Shared start-up for the report tools: token, context, tenant.
use std::path::Path;

use ureq::Agent;
use xero_oauth::TokenData;

use crate::{connections, tenant, APIResult, Endpoints, XeroContext};

/// Loads the saved token and resolves the tenant to report on.
///
/// Returns `Ok(None)` when there is no token file yet.
pub fn open(
    token_path: &Path,
    tenant_id: Option<&str>,
    tenant_index: Option<usize>,
    client: &Agent,
) -> APIResult<Option<XeroContext>> {
    open_with(
        token_path,
        Endpoints::default(),
        tenant_id,
        tenant_index,
        client,
    )
}

pub fn open_with(
    token_path: &Path,
    endpoints: Endpoints,
    tenant_id: Option<&str>,
    tenant_index: Option<usize>,
    client: &Agent,
) -> APIResult<Option<XeroContext>> {
    let Some(token) = TokenData::load(token_path)? else {
        log::warn!("No token at {}", token_path.display());
        return Ok(None);
    };

    let ctx = XeroContext::from_token(&token)?.with_endpoints(endpoints);
    let connections = connections::list(&ctx, client)?;
    let tenant_id = tenant::resolve(&connections, tenant_id, tenant_index)?;
    Ok(Some(ctx.with_tenant(tenant_id)))
}
