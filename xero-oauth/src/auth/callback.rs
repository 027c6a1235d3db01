use std::{
    io::{BufRead, BufReader, Write},
    net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs},
    process::Command,
    time::Duration,
};

use url::Url;

use super::AuthError;

/// What the authorization server sent back to the redirect URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Code {
        code: String,
        state: Option<String>,
    },
    Denied {
        error: String,
        description: Option<String>,
    },
    Missing,
}

impl Callback {
    fn from_url(url: &Url) -> Self {
        let (mut code, mut state, mut error, mut description) = (None, None, None, None);
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                "error_description" => description = Some(value.into_owned()),
                _ => {}
            }
        }

        match (code.filter(|c| !c.is_empty()), error) {
            (Some(code), _) => Callback::Code { code, state },
            (None, Some(error)) => Callback::Denied { error, description },
            (None, None) => Callback::Missing,
        }
    }
}

/// Single-shot listener for the OAuth redirect.
///
/// Only requests on the redirect URI's path count as the callback, anything
/// else (favicons, preconnects) is answered with a 404 and the server keeps
/// waiting. Waiting for the user has no timeout, but each connection must
/// send its request head within the read timeout.
pub struct CallbackServer {
    listener: TcpListener,
    path: String,
    read_timeout: Duration,
}

const READ_TIMEOUT: Duration = Duration::from_secs(5);

impl CallbackServer {
    /// Binds `127.0.0.1` on the port of `redirect_uri`.
    pub fn bind(redirect_uri: &Url) -> Result<Self, AuthError> {
        let port = redirect_uri
            .port_or_known_default()
            .ok_or_else(|| AuthError::NoRedirectPort(redirect_uri.to_string()))?;
        Self::bind_addr(("127.0.0.1", port), redirect_uri.path())
    }

    pub fn bind_addr(addr: impl ToSocketAddrs, path: &str) -> Result<Self, AuthError> {
        Ok(Self {
            listener: TcpListener::bind(addr)?,
            path: path.to_string(),
            read_timeout: READ_TIMEOUT,
        })
    }

    /// How long a single connection may take to send its request head.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn local_addr(&self) -> Result<SocketAddr, AuthError> {
        Ok(self.listener.local_addr()?)
    }

    /// Blocks until a request hits the callback path. The stream is handed
    /// back so the caller can answer once it knows the outcome.
    pub fn accept(&self) -> Result<(TcpStream, Callback), AuthError> {
        loop {
            let (mut stream, peer) = self.listener.accept()?;
            let read = stream
                .set_read_timeout(Some(self.read_timeout))
                .map_err(AuthError::from)
                .and_then(|()| read_request_target(&stream));
            let target = match read {
                Ok(Some(target)) => target,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("Dropping connection from {peer}: {e}");
                    continue;
                }
            };

            let url = match Url::parse(&format!("http://localhost{target}")) {
                Ok(url) => url,
                Err(e) => {
                    log::warn!("Unparseable request target {target:?} from {peer}: {e}");
                    if let Err(e) = respond(&mut stream, "400 Bad Request", "Bad request") {
                        log::warn!("Could not answer {peer}: {e}");
                    }
                    continue;
                }
            };

            if url.path() != self.path {
                log::warn!("Ignoring request to {} from {peer}", url.path());
                if let Err(e) = respond(&mut stream, "404 Not Found", "Not found") {
                    log::warn!("Could not answer {peer}: {e}");
                }
                continue;
            }

            log::debug!("Received callback from {peer}");
            return Ok((stream, Callback::from_url(&url)));
        }
    }
}

// Reads the whole request head so nothing is left unread when the socket
// closes.
fn read_request_target(stream: &TcpStream) -> Result<Option<String>, AuthError> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line)? == 0 {
        return Ok(None);
    }

    let mut header = String::new();
    loop {
        header.clear();
        if reader.read_line(&mut header)? == 0 || header.trim_end().is_empty() {
            break;
        }
    }

    Ok(request_line.split_whitespace().nth(1).map(str::to_string))
}

pub(crate) fn respond(stream: &mut TcpStream, status: &str, body: &str) -> Result<(), AuthError> {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

/// Hands `url` to the platform's default browser. Returns `false` if no
/// opener could be started.
pub fn open_in_browser(url: &str) -> bool {
    #[cfg(target_os = "macos")]
    let try_cmds = vec![("open", vec![url])];
    #[cfg(target_os = "windows")]
    let try_cmds = vec![("rundll32", vec!["url.dll,FileProtocolHandler", url])];
    #[cfg(all(not(target_os = "macos"), not(target_os = "windows")))]
    let try_cmds = vec![("xdg-open", vec![url]), ("sensible-browser", vec![url])];

    for (program, args) in try_cmds {
        if Command::new(program).args(args).spawn().is_ok() {
            return true;
        }
    }
    log::warn!("Could not open browser automatically for {url}");
    false
}
