use std::{fs, io, path::Path};

use serde_json::{Map, Value};

use super::AuthError;

/// Token payload as returned by the token endpoint.
///
/// The JSON text as received is kept untouched so that what the connect flow
/// writes is exactly what the report tools read back. Fields are parsed only
/// for lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenData {
    raw: String,
    fields: Map<String, Value>,
}

impl TokenData {
    /// Wraps a JSON object payload. Anything other than an object is rejected.
    pub fn from_json(raw: impl Into<String>) -> Result<Self, AuthError> {
        let raw = raw.into();
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(fields) => Ok(Self { raw, fields }),
            _ => Err(AuthError::TokenNotAnObject),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.get("access_token").and_then(Value::as_str)
    }

    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.get("scope").and_then(Value::as_str)
    }

    /// Writes the payload to `path` byte for byte.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AuthError> {
        let path = path.as_ref();
        fs::write(path, self.raw.as_bytes())?;
        log::info!("Token saved to {}", path.display());
        Ok(())
    }

    /// Reads a previously saved payload. A missing file is `Ok(None)`.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>, AuthError> {
        let raw = match fs::read_to_string(path.as_ref()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Self::from_json(raw).map(Some)
    }
}
