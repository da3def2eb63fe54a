//! Error types for rhc-client.

/// Result type alias for rhc-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for broker API operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for a [`ErrorKind::LinkNotFound`] error.
    pub fn link_not_found(resource: impl Into<String>, link: impl Into<String>) -> Self {
        Self::new(ErrorKind::LinkNotFound {
            resource: resource.into(),
            link: link.into(),
        })
    }

    /// Returns true if the server did not advertise the requested capability.
    pub fn is_link_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::LinkNotFound { .. })
    }

    /// Returns true if the broker answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// Returns true if the broker answered with any non-success status.
    pub fn is_api_error(&self) -> bool {
        self.status().is_some()
    }

    /// Returns true if the broker answered with a 5xx status.
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }

    /// Returns true if the request never produced an HTTP response.
    pub fn is_network_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout | ErrorKind::Connection(_))
    }

    /// HTTP status code for errors that came from a broker response.
    pub fn status(&self) -> Option<u16> {
        self.kind.status()
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The resource does not advertise the requested link.
    #[error("Link {link} is not available on {resource}")]
    LinkNotFound { resource: String, link: String },

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials rejected (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Request denied (HTTP 403).
    #[error("Request denied: {0}")]
    RequestDenied(String),

    /// Payload failed server-side validation (HTTP 422).
    #[error("Validation failed{}: {message}", field.as_ref().map(|f| format!(" on {f}")).unwrap_or_default())]
    Validation {
        field: Option<String>,
        message: String,
    },

    /// Any other non-success response from the broker.
    #[error("API error: {status} {message}")]
    Api { status: u16, message: String },

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The broker returned a representation other than the one requested.
    #[error("Unexpected response: expected {expected}, got {actual}")]
    UnexpectedResponse { expected: String, actual: String },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl ErrorKind {
    /// HTTP status code carried by this kind, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ErrorKind::NotFound(_) => Some(404),
            ErrorKind::Unauthorized(_) => Some(401),
            ErrorKind::RequestDenied(_) => Some(403),
            ErrorKind::Validation { .. } => Some(422),
            ErrorKind::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_decode() {
            ErrorKind::Json(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}
