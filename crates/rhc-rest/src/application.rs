//! Applications and their lifecycle events.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use rhc_client::{BrokerSession, Links, Payload, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::cartridge::Cartridge;
use crate::resource::{decode_list, decode_one, Resource};

const ADD_CARTRIDGE: &str = "ADD_CARTRIDGE";
const LIST_CARTRIDGES: &str = "LIST_CARTRIDGES";
const START: &str = "START";
const STOP: &str = "STOP";
const RESTART: &str = "RESTART";
const DELETE: &str = "DELETE";

/// An application as returned by the broker.
#[derive(Debug, Clone)]
pub struct Application {
    session: BrokerSession,
    record: ApplicationRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApplicationRecord {
    name: String,
    #[serde(default)]
    domain_id: Option<String>,
    #[serde(default)]
    framework: Option<String>,
    #[serde(default)]
    creation_time: Option<String>,
    #[serde(default)]
    uuid: Option<String>,
    #[serde(default)]
    app_url: Option<String>,
    #[serde(default)]
    git_url: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    embedded: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    scalable: bool,
    #[serde(default)]
    links: Links,
}

impl Resource for Application {
    type Record = ApplicationRecord;
    const KIND: &'static str = "application";
    const LIST_KIND: &'static str = "applications";

    fn from_record(session: &BrokerSession, record: ApplicationRecord) -> Self {
        Self {
            session: session.clone(),
            record,
        }
    }
}

impl Application {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Namespace of the owning domain, when the broker reports it.
    pub fn domain_id(&self) -> Option<&str> {
        self.record.domain_id.as_deref()
    }

    /// The web cartridge the application was created with.
    pub fn framework(&self) -> Option<&str> {
        self.record.framework.as_deref()
    }

    /// Creation time, if the broker sent a valid RFC 3339 timestamp.
    pub fn creation_time(&self) -> Option<DateTime<FixedOffset>> {
        self.record
            .creation_time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
    }

    pub fn uuid(&self) -> Option<&str> {
        self.record.uuid.as_deref()
    }

    pub fn app_url(&self) -> Option<&str> {
        self.record.app_url.as_deref()
    }

    pub fn git_url(&self) -> Option<&str> {
        self.record.git_url.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.record.aliases
    }

    /// Embedded cartridges keyed by name, as reported in the application record.
    pub fn embedded(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.record.embedded
    }

    pub fn is_scalable(&self) -> bool {
        self.record.scalable
    }

    /// Capabilities the broker advertised for this application.
    pub fn links(&self) -> &Links {
        &self.record.links
    }

    fn label(&self) -> String {
        format!("application {}", self.record.name)
    }

    /// Embed a cartridge into the application.
    #[instrument(skip(self), fields(application = %self.record.name))]
    pub async fn add_cartridge(&self, name: &str) -> Result<Cartridge> {
        let link = self.links().require(&self.label(), ADD_CARTRIDGE)?;
        debug!("Adding cartridge {} to application {}", name, self.record.name);

        let payload = Payload::new().param("name", name);
        let envelope = self.session.follow(link, Some(payload), None).await?;
        decode_one(&self.session, envelope)
    }

    /// List the cartridges embedded in the application.
    #[instrument(skip(self), fields(application = %self.record.name))]
    pub async fn cartridges(&self) -> Result<Vec<Cartridge>> {
        let link = self.links().require(&self.label(), LIST_CARTRIDGES)?;
        debug!("Getting all cartridges for application {}", self.record.name);

        let envelope = self.session.follow(link, None, None).await?;
        decode_list(&self.session, envelope)
    }

    /// Start the application.
    pub async fn start(&self) -> Result<()> {
        self.event(START, "start").await
    }

    /// Stop the application, forcibly if requested.
    pub async fn stop(&self, force: bool) -> Result<()> {
        self.event(STOP, if force { "force-stop" } else { "stop" }).await
    }

    /// Restart the application.
    pub async fn restart(&self) -> Result<()> {
        self.event(RESTART, "restart").await
    }

    #[instrument(skip(self), fields(application = %self.record.name))]
    async fn event(&self, link_name: &str, event: &str) -> Result<()> {
        let link = self.links().require(&self.label(), link_name)?;
        debug!("Sending {} to application {}", event, self.record.name);

        let payload = Payload::new().param("event", event);
        self.session.follow(link, Some(payload), None).await?;
        Ok(())
    }

    /// Delete the application.
    #[instrument(skip(self), fields(application = %self.record.name))]
    pub async fn delete(&self) -> Result<()> {
        let link = self.links().require(&self.label(), DELETE)?;
        debug!("Deleting application {}", self.record.name);

        self.session.follow(link, None, None).await?;
        Ok(())
    }
}
