//! Broker credentials.
//!
//! Debug output redacts secrets.

use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;

/// Environment variable holding an API token.
pub const ENV_TOKEN: &str = "RHC_TOKEN";
/// Environment variable holding the login name.
pub const ENV_USERNAME: &str = "RHC_USERNAME";
/// Environment variable holding the password.
pub const ENV_PASSWORD: &str = "RHC_PASSWORD";

/// How requests authenticate against the broker.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic with login and password.
    Basic { username: String, password: String },
    /// Bearer token.
    Token(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Credentials::Token(_) => f.debug_tuple("Token").field(&"[REDACTED]").finish(),
        }
    }
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn token(token: impl Into<String>) -> Self {
        Credentials::Token(token.into())
    }

    /// Load credentials from `RHC_TOKEN`, or `RHC_USERNAME` and `RHC_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(token) = non_empty(ENV_TOKEN) {
            return Ok(Credentials::Token(token));
        }

        match (non_empty(ENV_USERNAME), non_empty(ENV_PASSWORD)) {
            (Some(username), Some(password)) => Ok(Credentials::Basic { username, password }),
            (Some(_), None) => Err(Error::new(ErrorKind::Config(format!(
                "{ENV_PASSWORD} is not set"
            )))),
            _ => Err(Error::new(ErrorKind::Config(format!(
                "set {ENV_TOKEN}, or {ENV_USERNAME} and {ENV_PASSWORD}"
            )))),
        }
    }

    /// The login name, when known.
    pub fn username(&self) -> Option<&str> {
        match self {
            Credentials::Basic { username, .. } => Some(username),
            Credentials::Token(_) => None,
        }
    }

    /// Attach these credentials to a request.
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Basic { username, password } => request.basic_auth(username, password),
            Credentials::Token(token) => request.bearer_auth(token),
        }
    }
}
