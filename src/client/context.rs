//! # Xero API Context
//!
//! `XeroContext` carries everything a request needs: the bearer token, the
//! selected tenant and the base URLs.
//!
//! ```no_run
//! use xero_reports::{oauth::TokenData, XeroContext};
//!
//! let token = TokenData::load(".token.json").unwrap().unwrap();
//! let context = XeroContext::from_token(&token)
//!     .unwrap()
//!     .with_tenant("00000000-0000-0000-0000-000000000000");
//! ```
//!
//! The token is used as-is. Access tokens expire after 30 minutes; once they
//! do, run `xero-connect` again.
use xero_oauth::TokenData;

use crate::{APIError, APIResult, Endpoints};

#[derive(Debug, Clone)]
pub struct XeroContext {
    pub(crate) access_token: String,
    pub(crate) tenant_id: Option<String>,
    pub(crate) endpoints: Endpoints,
}

impl XeroContext {
    #[must_use]
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            tenant_id: None,
            endpoints: Endpoints::default(),
        }
    }

    /// Builds a context from a persisted token payload.
    ///
    /// # Errors
    ///
    /// [`APIError::MissingAccessToken`] if the payload has no `access_token`.
    pub fn from_token(token: &TokenData) -> APIResult<Self> {
        token
            .access_token()
            .map(|t| Self::new(t.to_string()))
            .ok_or(APIError::MissingAccessToken)
    }

    /// Selects the organisation subsequent report requests are made for.
    #[must_use]
    pub fn with_tenant(self, tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: Some(tenant_id.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_endpoints(self, endpoints: Endpoints) -> Self {
        Self { endpoints, ..self }
    }

    #[must_use]
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub(crate) fn require_tenant(&self) -> APIResult<&str> {
        self.tenant_id().ok_or(APIError::NoTenant)
    }
}
