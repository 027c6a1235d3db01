//! Picking the organisation a report is run against.
use std::io::{self, Write};

use thiserror::Error;

use crate::connections::Connection;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TenantError {
    #[error("No connections found.")]
    NoConnections,
    #[error("Tenant ID {0} not found among connections.")]
    NotFound(String),
    #[error("Tenant index {index} is out of range (1-{len}).")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Resolves the tenant to use and announces it on stderr.
///
/// An explicit id takes precedence over the 1-based `index`; with neither the
/// first connection is used.
pub fn resolve(
    connections: &[Connection],
    explicit_id: Option<&str>,
    index: Option<usize>,
) -> Result<String, TenantError> {
    resolve_to(&mut io::stderr().lock(), connections, explicit_id, index)
}

/// Same as [`resolve`], announcing the choice on `diag`.
pub fn resolve_to<W: Write>(
    diag: &mut W,
    connections: &[Connection],
    explicit_id: Option<&str>,
    index: Option<usize>,
) -> Result<String, TenantError> {
    if connections.is_empty() {
        return Err(TenantError::NoConnections);
    }

    if let Some(id) = explicit_id.filter(|id| !id.is_empty()) {
        let chosen = connections
            .iter()
            .find(|c| c.tenant_id == id)
            .ok_or_else(|| TenantError::NotFound(id.to_string()))?;
        announce(diag, chosen.tenant_name.as_deref().unwrap_or(id), id);
        return Ok(id.to_string());
    }

    let chosen = match index {
        Some(index) => index
            .checked_sub(1)
            .and_then(|idx| connections.get(idx))
            .ok_or(TenantError::IndexOutOfRange {
                index,
                len: connections.len(),
            })?,
        None => &connections[0],
    };

    announce(
        diag,
        chosen.tenant_name.as_deref().unwrap_or_default(),
        &chosen.tenant_id,
    );
    Ok(chosen.tenant_id.clone())
}

fn announce<W: Write>(diag: &mut W, name: &str, id: &str) {
    let _ = writeln!(diag, "Using Tenant: {name} ({id})");
}
