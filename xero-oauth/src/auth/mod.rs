mod callback;
mod error;
mod token;

use std::path::Path;

use base64::Engine;
use ureq::{http::Request, Agent};
use url::Url;
use urlencoding::encode;
use uuid::Uuid;

pub use callback::{open_in_browser, Callback, CallbackServer};
pub use error::AuthError;
pub use token::TokenData;

pub const AUTH_ENDPOINT: &str = "https://login.xero.com/identity/connect/authorize";
pub const TOKEN_ENDPOINT: &str = "https://identity.xero.com/connect/token";
pub const CONNECTIONS_ENDPOINT: &str = "https://api.xero.com/connections";
pub const DEFAULT_SCOPE: &str = "offline_access accounting.transactions accounting.settings";

const SUCCESS_PAGE: &str =
    "Authentication successful! You can close this window and return to the terminal.";

/// Blocking HTTP agent shared by the auth flow and the API calls.
///
/// Non-2xx statuses come back as responses rather than errors so callers can
/// report the body.
#[must_use]
pub fn agent() -> Agent {
    let config = Agent::config_builder().http_status_as_error(false).build();
    Agent::new_with_config(config)
}

pub struct AuthClient {
    client_id: String,
    client_secret: String,
    redirect_uri: Url,
    scope: String,
    token_endpoint: String,
}

impl AuthClient {
    pub fn new<X, Q, R, S>(
        client_id: X,
        client_secret: Q,
        redirect_uri: R,
        scope: S,
    ) -> Result<Self, AuthError>
    where
        X: ToString,
        Q: ToString,
        R: AsRef<str>,
        S: ToString,
    {
        Ok(Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: Url::parse(redirect_uri.as_ref())?,
            scope: scope.to_string(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
        })
    }

    #[must_use]
    pub fn with_token_endpoint(self, token_endpoint: impl ToString) -> Self {
        Self {
            token_endpoint: token_endpoint.to_string(),
            ..self
        }
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &Url {
        &self.redirect_uri
    }

    /// Fresh value for the `state` parameter.
    #[must_use]
    pub fn new_state() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Consent URL the user has to open in a browser.
    pub fn authorization_url(&self, state: &str) -> Result<Url, AuthError> {
        Ok(Url::parse_with_params(
            AUTH_ENDPOINT,
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", self.scope.as_str()),
                ("state", state),
            ],
        )?)
    }

    /// Trades an authorization code for a token with one POST to the token
    /// endpoint, authenticating with the client credentials.
    pub fn exchange_code(&self, code: &str, client: &Agent) -> Result<TokenData, AuthError> {
        let credentials = format!("{}:{}", self.client_id, self.client_secret);
        let credentials = base64::engine::general_purpose::STANDARD.encode(credentials);

        let request = Request::post(self.token_endpoint.as_str())
            .header("Authorization", format!("Basic {credentials}"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .body(format!(
                "grant_type=authorization_code&code={}&redirect_uri={}",
                encode(code),
                encode(self.redirect_uri.as_str())
            ))?;

        let mut response = client.run(request)?;
        let status = response.status();
        let body = response.body_mut().read_to_string()?;

        if !status.is_success() {
            return Err(AuthError::TokenRequest {
                status: status.as_u16(),
                body,
            });
        }

        log::info!("Exchanged authorization code for a token");
        TokenData::from_json(body)
    }

    /// Waits for the browser redirect, exchanges the code and persists the
    /// token to `token_path` before answering the browser.
    pub fn authorize(
        &self,
        server: &CallbackServer,
        state: &str,
        token_path: &Path,
        client: &Agent,
    ) -> Result<TokenData, AuthError> {
        let (mut stream, redirect) = server.accept()?;

        let code = match redirect {
            Callback::Code {
                code,
                state: returned,
            } => {
                if returned.as_deref() != Some(state) {
                    callback::respond(&mut stream, "400 Bad Request", "Error: State mismatch")?;
                    return Err(AuthError::StateMismatch);
                }
                code
            }
            Callback::Denied { error, description } => {
                callback::respond(&mut stream, "400 Bad Request", &format!("Error: {error}"))?;
                return Err(AuthError::Denied { error, description });
            }
            Callback::Missing => {
                callback::respond(&mut stream, "400 Bad Request", "Error: No code provided")?;
                return Err(AuthError::NoCode);
            }
        };

        let outcome = self.exchange_code(&code, client).and_then(|token| {
            token.save(token_path)?;
            Ok(token)
        });

        match outcome {
            Ok(token) => {
                callback::respond(&mut stream, "200 OK", SUCCESS_PAGE)?;
                Ok(token)
            }
            Err(e) => {
                callback::respond(
                    &mut stream,
                    "500 Internal Server Error",
                    &format!("Error exchanging token: {e}"),
                )?;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{BufRead, BufReader, Read, Write},
        net::{SocketAddr, TcpListener, TcpStream},
        thread::{self, JoinHandle},
    };

    const TOKEN_BODY: &str = r#"{"id_token":"id","access_token":"at","expires_in":1800,"token_type":"Bearer","refresh_token":"rt","scope":"offline_access"}"#;

    /// Answers exactly one request and hands back what it received.
    fn token_endpoint(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/connect/token", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut head = String::new();
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
                head.push_str(&line);
                if line.trim_end().is_empty() {
                    break;
                }
            }
            let mut received = vec![0; content_length];
            reader.read_exact(&mut received).unwrap();
            head.push_str(&String::from_utf8(received).unwrap());

            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            head
        });
        (url, handle)
    }

    fn local_agent() -> Agent {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .proxy(None)
            .build();
        Agent::new_with_config(config)
    }

    fn client() -> AuthClient {
        AuthClient::new("my-id", "my-secret", "http://localhost:8888/callback", DEFAULT_SCOPE)
            .unwrap()
    }

    fn browser(addr: SocketAddr, target: String) -> JoinHandle<String> {
        thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            write!(stream, "GET {target} HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
            let mut response = String::new();
            stream.read_to_string(&mut response).unwrap();
            response
        })
    }

    #[test]
    fn authorization_url_carries_client_parameters() {
        let url = client().authorization_url("st4te").unwrap();
        assert!(url.as_str().starts_with(AUTH_ENDPOINT));

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("response_type".into(), "code".into()),
                ("client_id".into(), "my-id".into()),
                ("redirect_uri".into(), "http://localhost:8888/callback".into()),
                ("scope".into(), DEFAULT_SCOPE.into()),
                ("state".into(), "st4te".into()),
            ]
        );
    }

    #[test]
    fn states_are_unique() {
        assert_ne!(AuthClient::new_state(), AuthClient::new_state());
    }

    #[test]
    fn exchange_uses_basic_auth_and_form_body() {
        let (url, server) = token_endpoint("200 OK", TOKEN_BODY);
        let token = client()
            .with_token_endpoint(url)
            .exchange_code("the code", &local_agent())
            .unwrap();
        assert_eq!(token.as_str(), TOKEN_BODY);

        let request = server.join().unwrap();
        let expected = base64::engine::general_purpose::STANDARD.encode("my-id:my-secret");
        assert!(request.starts_with("POST /connect/token"));
        assert!(request.lines().any(|l| {
            l.to_ascii_lowercase().starts_with("authorization:")
                && l.trim_end().ends_with(&format!("Basic {expected}"))
        }));
        assert!(request.ends_with(
            "grant_type=authorization_code&code=the%20code&redirect_uri=http%3A%2F%2Flocalhost%3A8888%2Fcallback"
        ));
    }

    #[test]
    fn exchange_reports_rejection() {
        let (url, server) = token_endpoint("400 Bad Request", r#"{"error":"invalid_grant"}"#);
        let err = client()
            .with_token_endpoint(url)
            .exchange_code("stale", &local_agent())
            .unwrap_err();
        server.join().unwrap();
        match err {
            AuthError::TokenRequest { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, r#"{"error":"invalid_grant"}"#);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn authorize_persists_token_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join(".token.json");
        let (url, endpoint) = token_endpoint("200 OK", TOKEN_BODY);
        let server = CallbackServer::bind_addr("127.0.0.1:0", "/callback").unwrap();
        let page = browser(
            server.local_addr().unwrap(),
            "/callback?code=abc&state=s1".into(),
        );

        let token = client()
            .with_token_endpoint(url)
            .authorize(&server, "s1", &token_path, &local_agent())
            .unwrap();
        endpoint.join().unwrap();

        assert_eq!(token.access_token(), Some("at"));
        assert_eq!(std::fs::read_to_string(&token_path).unwrap(), TOKEN_BODY);
        let page = page.join().unwrap();
        assert!(page.starts_with("HTTP/1.1 200 OK"));
        assert!(page.ends_with(SUCCESS_PAGE));
    }

    #[test]
    fn authorize_rejects_state_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join(".token.json");
        let server = CallbackServer::bind_addr("127.0.0.1:0", "/callback").unwrap();
        let page = browser(
            server.local_addr().unwrap(),
            "/callback?code=abc&state=forged".into(),
        );

        let err = client()
            .authorize(&server, "s1", &token_path, &local_agent())
            .unwrap_err();
        assert!(matches!(err, AuthError::StateMismatch));
        assert!(!token_path.exists());
        assert!(page.join().unwrap().starts_with("HTTP/1.1 400 Bad Request"));
    }

    #[test]
    fn authorize_reports_denied_consent() {
        let dir = tempfile::tempdir().unwrap();
        let server = CallbackServer::bind_addr("127.0.0.1:0", "/callback").unwrap();
        let page = browser(
            server.local_addr().unwrap(),
            "/callback?error=access_denied".into(),
        );

        let err = client()
            .authorize(&server, "s1", &dir.path().join("t.json"), &local_agent())
            .unwrap_err();
        assert!(matches!(err, AuthError::Denied { ref error, .. } if error == "access_denied"));
        assert!(page.join().unwrap().contains("Error: access_denied"));
    }
}
