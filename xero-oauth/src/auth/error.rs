use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),
    #[error("Could not build request: {0}")]
    RequestBuild(#[from] ureq::http::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("Token payload is not a JSON object")]
    TokenNotAnObject,
    #[error("Token endpoint rejected the request ({status}): {body}")]
    TokenRequest { status: u16, body: String },
    #[error("Authorization denied: {error}")]
    Denied {
        error: String,
        description: Option<String>,
    },
    #[error("No code provided in callback")]
    NoCode,
    #[error("State mismatch in callback")]
    StateMismatch,
    #[error("Redirect URI {0} has no port")]
    NoRedirectPort(String),
}
