//! Application credentials, read from `xero_config.yaml`.
//!
//! ```yaml
//! CLIENT_ID: "..."
//! CLIENT_SECRET: "..."
//! REDIRECT_URI: "http://localhost:8888/callback"
//! SCOPE: "offline_access accounting.transactions accounting.settings"
//! ```
use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use xero_oauth::{AuthClient, DEFAULT_SCOPE};

use crate::APIResult;

pub const DEFAULT_CONFIG_FILE: &str = "xero_config.yaml";
pub const DEFAULT_TOKEN_FILE: &str = ".token.json";
const PLACEHOLDER_CLIENT_ID: &str = "YOUR_CLIENT_ID_HERE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "CLIENT_ID")]
    pub client_id: String,
    #[serde(rename = "CLIENT_SECRET")]
    pub client_secret: String,
    #[serde(rename = "REDIRECT_URI")]
    pub redirect_uri: String,
    #[serde(rename = "SCOPE", default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> APIResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => io::Error::new(
                io::ErrorKind::NotFound,
                format!("Configuration file '{}' not found.", path.display()),
            ),
            _ => e,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> APIResult<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// True while the config still holds the template client id.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.client_id == PLACEHOLDER_CLIENT_ID
    }

    #[must_use]
    pub fn scope(&self) -> &str {
        self.scope
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SCOPE)
    }

    pub fn auth_client(&self) -> APIResult<AuthClient> {
        Ok(AuthClient::new(
            &self.client_id,
            &self.client_secret,
            &self.redirect_uri,
            self.scope(),
        )?)
    }
}
