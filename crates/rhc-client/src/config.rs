//! Timeouts and transport settings shared by every call of a session.

use std::time::Duration;

/// HTTP settings for a [`crate::BrokerSession`].
///
/// Two request timeouts are kept: `timeout` bounds ordinary calls, and
/// `provisioning_timeout` replaces it for the few calls that create gears
/// (scalable applications), which the broker may take minutes to answer.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub provisioning_timeout: Duration,
    /// Bound on TCP/TLS connection setup, independent of the request timeout.
    pub connect_timeout: Duration,
    pub user_agent: String,
    /// Advertise gzip/deflate in `Accept-Encoding`.
    pub accept_compressed: bool,
    /// Emit debug events for each request and response.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            provisioning_timeout: crate::PROVISIONING_TIMEOUT,
            connect_timeout: Duration::from_secs(10),
            user_agent: crate::USER_AGENT.to_string(),
            accept_compressed: true,
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Timeout for a call, given whether it provisions gears.
    pub fn timeout_for(&self, provisioning: bool) -> Duration {
        if provisioning {
            self.provisioning_timeout
        } else {
            self.timeout
        }
    }
}

/// Builder for [`ClientConfig`], starting from the defaults.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_provisioning_timeout(mut self, timeout: Duration) -> Self {
        self.config.provisioning_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn with_compression(mut self, accept: bool) -> Self {
        self.config.accept_compressed = accept;
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
