/*
 * A rust library for pulling financial reports out of the Xero accounting API.
 *
 * For more information, you can check out their documentation at:
 * https://developer.xero.com/documentation/api/accounting/reports
 *
 */
#![warn(clippy::pedantic)]

pub mod client;
pub use client::XeroContext;
pub mod cli;
pub mod config;
pub mod connections;
pub mod error;
pub mod functions;
pub mod render;
pub mod reports;
pub mod session;
pub mod tenant;

#[cfg(test)]
pub(crate) mod test_util;

pub use error::{APIError, APIResult};

pub mod oauth {
    pub use xero_oauth::*;
}

pub const API_ENDPOINT: &str = "https://api.xero.com/api.xro/2.0/";

/// Base URLs the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api: String,
    pub connections: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api: API_ENDPOINT.to_string(),
            connections: xero_oauth::CONNECTIONS_ENDPOINT.to_string(),
        }
    }
}
