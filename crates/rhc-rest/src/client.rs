//! Root entry point of the broker API.

use rhc_client::{BrokerSession, ClientConfig, Credentials, Links, Payload, Result};
use tracing::{debug, instrument};

use crate::application::Application;
use crate::cartridge::Cartridge;
use crate::domain::Domain;
use crate::key::Key;
use crate::resource::{decode_list, decode_one};
use crate::user::User;

const ADD_DOMAIN: &str = "ADD_DOMAIN";
const LIST_DOMAINS: &str = "LIST_DOMAINS";
const LIST_CARTRIDGES: &str = "LIST_CARTRIDGES";
const GET_USER: &str = "GET_USER";

/// Broker API client.
///
/// Construction performs one discovery request against the endpoint; every
/// other call follows a link the broker advertised, either in that response
/// or on a resource returned later.
///
/// # Example
///
/// ```rust,ignore
/// use rhc_rest::{BrokerClient, Credentials};
///
/// let client = BrokerClient::connect(
///     "https://openshift.example.com/broker/rest",
///     Credentials::basic("alice", "secret"),
/// )
/// .await?;
///
/// let domain = client.add_domain("d1").await?;
/// let app = domain.add_application("appone", "php-5.3", false).await?;
/// app.restart().await?;
/// domain.delete(true).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BrokerClient {
    session: BrokerSession,
    links: Links,
}

impl BrokerClient {
    /// Connect with default HTTP configuration.
    pub async fn connect(endpoint: impl Into<String>, credentials: Credentials) -> Result<Self> {
        Self::connect_with_config(endpoint, credentials, ClientConfig::default()).await
    }

    /// Connect with custom HTTP configuration.
    pub async fn connect_with_config(
        endpoint: impl Into<String>,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        let session = BrokerSession::with_config(endpoint, credentials, config)?;
        Self::from_session(session).await
    }

    /// Discover the API links using an existing session.
    #[instrument(skip(session), fields(endpoint = %session.endpoint()))]
    pub async fn from_session(session: BrokerSession) -> Result<Self> {
        let links = session.discover().await?;
        debug!(links = links.len(), "Discovered broker API");
        Ok(Self { session, links })
    }

    /// Get the underlying session.
    pub fn session(&self) -> &BrokerSession {
        &self.session
    }

    /// Top-level capabilities advertised by the broker.
    pub fn links(&self) -> &Links {
        &self.links
    }

    /// Create a domain.
    #[instrument(skip(self))]
    pub async fn add_domain(&self, id: &str) -> Result<Domain> {
        let link = self.links.require("api", ADD_DOMAIN)?;
        debug!("Adding domain {}", id);

        let payload = Payload::new().param("id", id);
        let envelope = self.session.follow(link, Some(payload), None).await?;
        decode_one(&self.session, envelope)
    }

    /// List the user's domains.
    #[instrument(skip(self))]
    pub async fn domains(&self) -> Result<Vec<Domain>> {
        let link = self.links.require("api", LIST_DOMAINS)?;
        debug!("Getting all domains");

        let envelope = self.session.follow(link, None, None).await?;
        decode_list(&self.session, envelope)
    }

    /// Find a domain by namespace.
    pub async fn find_domain(&self, id: &str) -> Result<Option<Domain>> {
        Ok(self.domains().await?.into_iter().find(|d| d.id() == id))
    }

    /// List the cartridges the broker offers.
    #[instrument(skip(self))]
    pub async fn cartridges(&self) -> Result<Vec<Cartridge>> {
        let link = self.links.require("api", LIST_CARTRIDGES)?;
        debug!("Getting all cartridges");

        let envelope = self.session.follow(link, None, None).await?;
        decode_list(&self.session, envelope)
    }

    /// Catalogue cartridges with the given name.
    pub async fn find_cartridge(&self, name: &str) -> Result<Vec<Cartridge>> {
        Ok(self
            .cartridges()
            .await?
            .into_iter()
            .filter(|c| c.name() == name)
            .collect())
    }

    /// Applications with the given name, across all domains.
    ///
    /// Returns an empty list when nothing matches.
    pub async fn find_application(&self, name: &str) -> Result<Vec<Application>> {
        let mut found = Vec::new();
        for domain in self.domains().await? {
            found.extend(
                domain
                    .applications()
                    .await?
                    .into_iter()
                    .filter(|a| a.name() == name),
            );
        }
        Ok(found)
    }

    /// The authenticated user.
    #[instrument(skip(self))]
    pub async fn user(&self) -> Result<User> {
        let link = self.links.require("api", GET_USER)?;
        debug!("Getting user info");

        let envelope = self.session.follow(link, None, None).await?;
        decode_one(&self.session, envelope)
    }

    /// Find one of the user's keys by name.
    pub async fn find_key(&self, name: &str) -> Result<Option<Key>> {
        self.user().await?.find_key(name).await
    }
}
