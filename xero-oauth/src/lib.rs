mod auth;

pub use auth::{
    agent, open_in_browser, AuthClient, AuthError, Callback, CallbackServer, TokenData,
    AUTH_ENDPOINT, CONNECTIONS_ENDPOINT, DEFAULT_SCOPE, TOKEN_ENDPOINT,
};
