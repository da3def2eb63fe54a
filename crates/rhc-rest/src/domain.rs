//! Domains (namespaces owning applications).

use rhc_client::{BrokerSession, Links, Payload, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::Application;
use crate::resource::{decode_list, decode_one, Resource};

const ADD_APPLICATION: &str = "ADD_APPLICATION";
const LIST_APPLICATIONS: &str = "LIST_APPLICATIONS";
const UPDATE: &str = "UPDATE";
const DELETE: &str = "DELETE";

/// Rename field used when the UPDATE link does not name one.
const RENAME_PARAM: &str = "domain_id";

/// A domain as returned by the broker.
#[derive(Debug, Clone)]
pub struct Domain {
    session: BrokerSession,
    id: String,
    links: Links,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DomainRecord {
    id: String,
    #[serde(default)]
    links: Links,
}

impl Resource for Domain {
    type Record = DomainRecord;
    const KIND: &'static str = "domain";
    const LIST_KIND: &'static str = "domains";

    fn from_record(session: &BrokerSession, record: DomainRecord) -> Self {
        Self {
            session: session.clone(),
            id: record.id,
            links: record.links,
        }
    }
}

impl Domain {
    /// The domain namespace.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Capabilities the broker advertised for this domain.
    pub fn links(&self) -> &Links {
        &self.links
    }

    fn label(&self) -> String {
        format!("domain {}", self.id)
    }

    /// Create an application in this domain.
    ///
    /// Scalable applications are created with the session's extended
    /// provisioning timeout.
    #[instrument(skip(self), fields(domain = %self.id))]
    pub async fn add_application(
        &self,
        name: &str,
        cartridge: &str,
        scale: bool,
    ) -> Result<Application> {
        let link = self.links.require(&self.label(), ADD_APPLICATION)?;
        debug!("Adding application {} to domain {}", name, self.id);

        let mut payload = Payload::new()
            .param("name", name)
            .param("cartridge", cartridge);
        let mut timeout = None;
        if scale {
            payload = payload.flag("scale", true);
            timeout = Some(self.session.provisioning_timeout());
        }

        let envelope = self.session.follow(link, Some(payload), timeout).await?;
        decode_one(&self.session, envelope)
    }

    /// List the applications in this domain.
    #[instrument(skip(self), fields(domain = %self.id))]
    pub async fn applications(&self) -> Result<Vec<Application>> {
        let link = self.links.require(&self.label(), LIST_APPLICATIONS)?;
        debug!("Getting all applications for domain {}", self.id);

        let envelope = self.session.follow(link, None, None).await?;
        decode_list(&self.session, envelope)
    }

    /// Rename the domain. Returns the domain as it exists after the rename.
    ///
    /// The new namespace is sent under the UPDATE link's first required
    /// parameter, or `domain_id` when the link lists none.
    #[instrument(skip(self), fields(domain = %self.id))]
    pub async fn update(&self, new_id: &str) -> Result<Domain> {
        let link = self.links.require(&self.label(), UPDATE)?;
        debug!("Updating domain {} to {}", self.id, new_id);

        let field = link.required_names().next().unwrap_or(RENAME_PARAM);
        let payload = Payload::new().param(field, new_id);
        let envelope = self.session.follow(link, Some(payload), None).await?;
        decode_one(&self.session, envelope)
    }

    /// Alias for [`Domain::update`].
    pub async fn save(&self, new_id: &str) -> Result<Domain> {
        self.update(new_id).await
    }

    /// Delete the domain.
    ///
    /// Without `force` the broker refuses to delete a domain that still
    /// owns applications.
    #[instrument(skip(self), fields(domain = %self.id))]
    pub async fn delete(&self, force: bool) -> Result<()> {
        let link = self.links.require(&self.label(), DELETE)?;
        debug!("Deleting domain {}", self.id);

        let payload = Payload::new().flag("force", force);
        self.session.follow(link, Some(payload), None).await?;
        Ok(())
    }
}
