//! Cartridges: runtimes and services attached to applications.

use rhc_client::{BrokerSession, Links, Payload, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::resource::Resource;

const START: &str = "START";
const STOP: &str = "STOP";
const RESTART: &str = "RESTART";
const RELOAD: &str = "RELOAD";
const DELETE: &str = "DELETE";

/// A cartridge, either from the broker's catalogue or embedded in an
/// application.
#[derive(Debug, Clone)]
pub struct Cartridge {
    session: BrokerSession,
    name: String,
    cartridge_type: String,
    links: Links,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CartridgeRecord {
    name: String,
    #[serde(rename = "type", default)]
    cartridge_type: String,
    #[serde(default)]
    links: Links,
}

impl Resource for Cartridge {
    type Record = CartridgeRecord;
    const KIND: &'static str = "cartridge";
    const LIST_KIND: &'static str = "cartridges";

    fn from_record(session: &BrokerSession, record: CartridgeRecord) -> Self {
        Self {
            session: session.clone(),
            name: record.name,
            cartridge_type: record.cartridge_type,
            links: record.links,
        }
    }
}

impl Cartridge {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `standalone` for web frameworks, `embedded` for add-ons.
    pub fn cartridge_type(&self) -> &str {
        &self.cartridge_type
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    pub async fn start(&self) -> Result<()> {
        self.event(START, "start").await
    }

    pub async fn stop(&self) -> Result<()> {
        self.event(STOP, "stop").await
    }

    pub async fn restart(&self) -> Result<()> {
        self.event(RESTART, "restart").await
    }

    /// Reload the cartridge configuration without a full restart.
    pub async fn reload(&self) -> Result<()> {
        self.event(RELOAD, "reload").await
    }

    #[instrument(skip(self), fields(cartridge = %self.name))]
    async fn event(&self, link_name: &str, event: &str) -> Result<()> {
        let link = self
            .links
            .require(&format!("cartridge {}", self.name), link_name)?;
        debug!("Sending {} to cartridge {}", event, self.name);

        let payload = Payload::new().param("event", event);
        self.session.follow(link, Some(payload), None).await?;
        Ok(())
    }

    /// Remove the cartridge from its application.
    #[instrument(skip(self), fields(cartridge = %self.name))]
    pub async fn delete(&self) -> Result<()> {
        let link = self
            .links
            .require(&format!("cartridge {}", self.name), DELETE)?;
        debug!("Deleting cartridge {}", self.name);

        self.session.follow(link, None, None).await?;
        Ok(())
    }
}
