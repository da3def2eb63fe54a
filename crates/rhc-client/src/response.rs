//! HTTP response handling and the broker's JSON envelope.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};

/// Wrapper around an HTTP response from the broker.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Returns true for 204 No Content.
    pub fn is_no_content(&self) -> bool {
        self.status() == 204
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Parse the body as a broker envelope.
    ///
    /// A 204 or an empty body yields an empty envelope.
    pub async fn envelope(self) -> Result<ResponseEnvelope> {
        if self.is_no_content() {
            return Ok(ResponseEnvelope::default());
        }
        let body = self.text().await?;
        if body.trim().is_empty() {
            return Ok(ResponseEnvelope::default());
        }
        serde_json::from_str(&body).map_err(Into::into)
    }
}

/// The JSON document every broker call returns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseEnvelope {
    /// Shape of `data` (`domain`, `applications`, `links`, ...).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub messages: Vec<BrokerMessage>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl ResponseEnvelope {
    /// Fail unless the envelope carries the expected representation type.
    pub fn expect_kind(&self, expected: &str) -> Result<()> {
        match self.kind.as_deref() {
            Some(kind) if kind == expected => Ok(()),
            other => Err(Error::new(ErrorKind::UnexpectedResponse {
                expected: expected.to_string(),
                actual: other.unwrap_or("nothing").to_string(),
            })),
        }
    }

    /// Check the type and deserialize `data`.
    pub fn into_data<T: DeserializeOwned>(self, expected: &str) -> Result<T> {
        self.expect_kind(expected)?;
        serde_json::from_value(self.data).map_err(Into::into)
    }

    /// Message texts joined for display.
    pub fn message_text(&self) -> Option<String> {
        join_messages(&self.messages)
    }
}

/// A message attached to a broker response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BrokerMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    /// Payload field the message refers to, for validation failures.
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub exit_code: Option<i64>,
}

fn join_messages(messages: &[BrokerMessage]) -> Option<String> {
    let texts: Vec<&str> = messages
        .iter()
        .filter_map(|m| m.text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.join("; "))
    }
}

/// Extension trait for turning broker responses into errors.
pub trait ResponseExt {
    /// Convert a non-success response into the matching error kind.
    fn check_broker_error(self) -> impl std::future::Future<Output = Result<Response>> + Send;
}

impl ResponseExt for Response {
    async fn check_broker_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let body = self.text().await.unwrap_or_default();
        Err(parse_error_response(status, &body))
    }
}

/// Map an error status and body to an error kind.
pub(crate) fn parse_error_response(status: u16, body: &str) -> Error {
    let envelope = serde_json::from_str::<ResponseEnvelope>(body).ok();

    let message = envelope
        .as_ref()
        .and_then(ResponseEnvelope::message_text)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.to_string()
            }
        });
    let message = sanitize_error_message(&message);

    let kind = match status {
        401 => ErrorKind::Unauthorized(message),
        403 => ErrorKind::RequestDenied(message),
        404 => ErrorKind::NotFound(message),
        422 => {
            let field = envelope
                .as_ref()
                .and_then(|e| e.messages.iter().find_map(|m| m.field.clone()));
            ErrorKind::Validation { field, message }
        }
        _ => ErrorKind::Api { status, message },
    };

    Error::new(kind)
}

/// Sanitize an error message to prevent exposing credentials.
///
/// - Removes `user:password@` userinfo from URLs
/// - Removes Basic/Bearer authorization values
/// - Truncates messages longer than 500 characters
fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = message.to_string();

    if let Ok(userinfo) = regex_lite::Regex::new(r"://[^/\s:@]+:[^/\s@]+@") {
        sanitized = userinfo
            .replace_all(&sanitized, "://[REDACTED]@")
            .into_owned();
    }

    if let Ok(auth) = regex_lite::Regex::new(r"(?i)\b(basic|bearer)\s+[A-Za-z0-9+/=._\-~]{12,}") {
        sanitized = auth.replace_all(&sanitized, "$1 [REDACTED]").into_owned();
    }

    if sanitized.len() > MAX_LENGTH {
        let cut = sanitized
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|&i| i <= MAX_LENGTH)
            .last()
            .unwrap_or(0);
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
