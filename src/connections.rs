use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::{functions::xero_get, APIResult, XeroContext};

/// An organisation the token has been granted access to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tenant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
}

impl Connection {
    #[must_use]
    pub fn new(tenant_id: impl Into<String>, tenant_name: Option<&str>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            tenant_name: tenant_name.map(str::to_string),
            ..Self::default()
        }
    }
}

/// Lists the tenants the current access token can reach.
pub fn list(ctx: &XeroContext, client: &Agent) -> APIResult<Vec<Connection>> {
    let connections: Vec<Connection> = xero_get(
        ctx,
        client,
        &ctx.endpoints.connections,
        "",
        None::<[(&str, &str); 0]>,
        None,
    )?;
    log::info!("Found {} connection(s)", connections.len());
    Ok(connections)
}
