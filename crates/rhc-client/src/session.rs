//! Authenticated session used by every resource.
//!
//! This module provides `BrokerSession`, which combines the endpoint and
//! credentials with an HTTP client and dispatches requests described by
//! [`Link`]s.
//!
//! ## Security
//!
//! - Credentials are redacted in Debug output
//! - Payloads are not recorded in tracing spans

use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::client::BrokerHttpClient;
use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::{Error, ErrorKind, Result};
use crate::link::{Link, Links};
use crate::request::{Payload, RequestBuilder};
use crate::response::ResponseEnvelope;

/// Endpoint, credentials and HTTP client for one broker account.
///
/// Cloning is cheap; every resource returned by the broker holds a clone so
/// it can follow its own links.
#[derive(Debug, Clone)]
pub struct BrokerSession {
    http: BrokerHttpClient,
    endpoint: String,
    credentials: Credentials,
}

impl BrokerSession {
    /// Create a session with default configuration.
    pub fn new(endpoint: impl Into<String>, credentials: Credentials) -> Result<Self> {
        Self::with_config(endpoint, credentials, ClientConfig::default())
    }

    /// Create a session with custom configuration.
    pub fn with_config(
        endpoint: impl Into<String>,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        url::Url::parse(&endpoint)?;

        let http = BrokerHttpClient::new(config)?;
        Ok(Self {
            http,
            endpoint,
            credentials,
        })
    }

    /// Get the API endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the HTTP client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Timeout for calls that provision new gears.
    pub fn provisioning_timeout(&self) -> Duration {
        self.config().timeout_for(true)
    }

    /// Resolve a link href against the endpoint.
    ///
    /// Relative hrefs are appended to the endpoint. Absolute hrefs must share
    /// the endpoint's scheme, host and port, since credentials are attached
    /// to every request.
    pub fn url(&self, href: &str) -> Result<String> {
        let url = if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else if href.is_empty() {
            self.endpoint.clone()
        } else if href.starts_with('/') {
            format!("{}{}", self.endpoint, href)
        } else {
            format!("{}/{}", self.endpoint, href)
        };

        let parsed = url::Url::parse(&url).map_err(|e| {
            Error::with_source(ErrorKind::InvalidUrl(format!("{url}: {e}")), e)
        })?;
        let endpoint = url::Url::parse(&self.endpoint)?;
        if parsed.origin() != endpoint.origin() {
            warn!(href, "Refusing link outside the broker endpoint");
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "{} is outside the broker endpoint {}",
                parsed.origin().ascii_serialization(),
                endpoint.origin().ascii_serialization()
            ))));
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        self.credentials.apply(request)
    }

    /// Fetch the top-level link map from the endpoint root.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn discover(&self) -> Result<Links> {
        let request = self.authorized(self.http.get(&self.endpoint));
        let envelope = self.http.execute(request).await?.envelope().await?;
        log_messages(&envelope);
        envelope.into_data("links")
    }

    /// Follow a link with an optional payload and timeout.
    #[instrument(skip(self, link, payload), fields(method = %link.method, href = %link.href))]
    pub async fn follow(
        &self,
        link: &Link,
        payload: Option<Payload>,
        timeout: Option<Duration>,
    ) -> Result<ResponseEnvelope> {
        let missing = link.missing_required(payload.as_ref());
        if !missing.is_empty() {
            warn!(?missing, "Payload lacks parameters the link marks as required");
        }

        let url = self.url(&link.href)?;
        let mut request = self.authorized(self.http.request(link.method, url));
        if let Some(payload) = payload {
            request = request.payload(payload);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let envelope = self.http.execute(request).await?.envelope().await?;
        log_messages(&envelope);
        Ok(envelope)
    }
}

fn log_messages(envelope: &ResponseEnvelope) {
    for message in &envelope.messages {
        if let Some(text) = message.text.as_deref() {
            debug!(severity = message.severity.as_deref(), "{}", text);
        }
    }
}
