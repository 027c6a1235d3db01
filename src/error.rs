use thiserror::Error;

use crate::tenant::TenantError;

pub type APIResult<T> = Result<T, APIError>;

#[derive(Debug, Error)]
pub enum APIError {
    #[error(transparent)]
    Auth(#[from] xero_oauth::AuthError),
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),
    #[error("Could not build request: {0}")]
    RequestBuild(#[from] ureq::http::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Tenant(#[from] TenantError),
    #[error("Bad request ({status}): {body}")]
    BadRequest { status: u16, body: String },
    #[error("Token file has no access_token")]
    MissingAccessToken,
    #[error("No tenant selected for this request")]
    NoTenant,
    #[error("{report} does not accept the `{param}` parameter")]
    InvalidParam {
        report: &'static str,
        param: &'static str,
    },
}
