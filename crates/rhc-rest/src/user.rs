//! The authenticated user and their SSH keys.

use rhc_client::{BrokerSession, Links, Payload, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::key::Key;
use crate::resource::{decode_list, decode_one, Resource};

const ADD_KEY: &str = "ADD_KEY";
const LIST_KEYS: &str = "LIST_KEYS";

/// The account behind the session's credentials.
#[derive(Debug, Clone)]
pub struct User {
    session: BrokerSession,
    login: String,
    max_gears: Option<u32>,
    consumed_gears: Option<u32>,
    links: Links,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserRecord {
    login: String,
    #[serde(default)]
    max_gears: Option<u32>,
    #[serde(default)]
    consumed_gears: Option<u32>,
    #[serde(default)]
    links: Links,
}

impl Resource for User {
    type Record = UserRecord;
    const KIND: &'static str = "user";
    const LIST_KIND: &'static str = "users";

    fn from_record(session: &BrokerSession, record: UserRecord) -> Self {
        Self {
            session: session.clone(),
            login: record.login,
            max_gears: record.max_gears,
            consumed_gears: record.consumed_gears,
            links: record.links,
        }
    }
}

impl User {
    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn max_gears(&self) -> Option<u32> {
        self.max_gears
    }

    pub fn consumed_gears(&self) -> Option<u32> {
        self.consumed_gears
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    fn label(&self) -> String {
        format!("user {}", self.login)
    }

    /// List the user's SSH keys.
    #[instrument(skip(self), fields(user = %self.login))]
    pub async fn keys(&self) -> Result<Vec<Key>> {
        let link = self.links.require(&self.label(), LIST_KEYS)?;
        debug!("Getting all keys for user {}", self.login);

        let envelope = self.session.follow(link, None, None).await?;
        decode_list(&self.session, envelope)
    }

    /// Register a new SSH key.
    #[instrument(skip(self, content), fields(user = %self.login))]
    pub async fn add_key(&self, name: &str, content: &str, key_type: &str) -> Result<Key> {
        let link = self.links.require(&self.label(), ADD_KEY)?;
        debug!("Adding key {} for user {}", name, self.login);

        let payload = Payload::new()
            .param("name", name)
            .param("type", key_type)
            .param("content", content);
        let envelope = self.session.follow(link, Some(payload), None).await?;
        decode_one(&self.session, envelope)
    }

    /// Find a key by name.
    pub async fn find_key(&self, name: &str) -> Result<Option<Key>> {
        Ok(self.keys().await?.into_iter().find(|k| k.name() == name))
    }
}
