//! SSH keys registered to a user.

use rhc_client::{BrokerSession, Links, Payload, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::resource::{decode_one, Resource};

const UPDATE: &str = "UPDATE";
const DELETE: &str = "DELETE";

/// An SSH public key as returned by the broker.
#[derive(Debug, Clone)]
pub struct Key {
    session: BrokerSession,
    name: String,
    key_type: String,
    content: String,
    links: Links,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KeyRecord {
    name: String,
    #[serde(rename = "type", default)]
    key_type: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    links: Links,
}

impl Resource for Key {
    type Record = KeyRecord;
    const KIND: &'static str = "key";
    const LIST_KIND: &'static str = "keys";

    fn from_record(session: &BrokerSession, record: KeyRecord) -> Self {
        Self {
            session: session.clone(),
            name: record.name,
            key_type: record.key_type,
            content: record.content,
            links: record.links,
        }
    }
}

impl Key {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key algorithm, e.g. `ssh-rsa`.
    pub fn key_type(&self) -> &str {
        &self.key_type
    }

    /// Base64 body of the public key.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    /// Replace the key material. The name is kept; the returned key reflects
    /// the broker's stored state.
    #[instrument(skip(self, content), fields(key = %self.name))]
    pub async fn update(&self, key_type: &str, content: &str) -> Result<Key> {
        let link = self.links.require(&format!("key {}", self.name), UPDATE)?;
        debug!("Updating key {}", self.name);

        let payload = Payload::new()
            .param("type", key_type)
            .param("content", content);
        let envelope = self.session.follow(link, Some(payload), None).await?;
        decode_one(&self.session, envelope)
    }

    #[instrument(skip(self), fields(key = %self.name))]
    pub async fn delete(&self) -> Result<()> {
        let link = self.links.require(&format!("key {}", self.name), DELETE)?;
        debug!("Deleting key {}", self.name);

        self.session.follow(link, None, None).await?;
        Ok(())
    }
}
