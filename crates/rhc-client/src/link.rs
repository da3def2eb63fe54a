//! Hypermedia link descriptors.
//!
//! Every broker representation carries a `links` object mapping a capability
//! name (`ADD_APPLICATION`, `DELETE`, ...) to the request that performs it.
//! Clients navigate exclusively through these descriptors; a capability the
//! server did not advertise cannot be invoked.
//!
//! ```json
//! "DELETE": {
//!   "rel": "Delete domain",
//!   "method": "DELETE",
//!   "href": "/domains/d1",
//!   "required_params": [],
//!   "optional_params": [{"name": "force", "type": "boolean", "default_value": false}]
//! }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::request::{Payload, RequestMethod};

/// A single server-advertised action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    /// Target of the request, usually relative to the API endpoint.
    pub href: String,
    /// HTTP verb to use.
    pub method: RequestMethod,
    /// Human readable label.
    #[serde(default)]
    pub rel: Option<String>,
    /// Parameters the server expects in the payload.
    #[serde(default)]
    pub required_params: Vec<LinkParam>,
    /// Parameters the server accepts but does not require.
    #[serde(default)]
    pub optional_params: Vec<LinkParam>,
}

impl Link {
    /// Create a link with no parameter metadata.
    pub fn new(method: RequestMethod, href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method,
            rel: None,
            required_params: Vec::new(),
            optional_params: Vec::new(),
        }
    }

    /// Names of the required parameters, in server order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.required_params.iter().map(|p| p.name.as_str())
    }

    /// Names of the optional parameters, in server order.
    pub fn optional_names(&self) -> impl Iterator<Item = &str> {
        self.optional_params.iter().map(|p| p.name.as_str())
    }

    /// Required parameters that the payload does not provide.
    pub fn missing_required<'a>(&'a self, payload: Option<&Payload>) -> Vec<&'a str> {
        self.required_names()
            .filter(|name| !payload.is_some_and(|p| p.contains(name)))
            .collect()
    }
}

/// Description of one link parameter.
///
/// The broker describes parameters as objects; older servers send bare names.
/// Both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawLinkParam")]
pub struct LinkParam {
    pub name: String,
    pub param_type: Option<String>,
    pub description: Option<String>,
    pub valid_options: Vec<String>,
    pub default_value: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLinkParam {
    Name(String),
    Described {
        name: String,
        #[serde(rename = "type", default)]
        param_type: Option<String>,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        valid_options: Option<Vec<String>>,
        #[serde(default)]
        default_value: Option<serde_json::Value>,
    },
}

impl From<RawLinkParam> for LinkParam {
    fn from(raw: RawLinkParam) -> Self {
        match raw {
            RawLinkParam::Name(name) => Self {
                name,
                param_type: None,
                description: None,
                valid_options: Vec::new(),
                default_value: None,
            },
            RawLinkParam::Described {
                name,
                param_type,
                description,
                valid_options,
                default_value,
            } => Self {
                name,
                param_type,
                description,
                valid_options: valid_options.unwrap_or_default(),
                default_value: default_value.filter(|v| !v.is_null()),
            },
        }
    }
}

/// The capability map of one resource instance.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Link>);

impl Links {
    /// Look up a link by capability name.
    pub fn get(&self, name: &str) -> Option<&Link> {
        self.0.get(name)
    }

    /// Look up a link, failing closed when the server did not advertise it.
    ///
    /// `resource` only labels the error.
    pub fn require(&self, resource: &str, name: &str) -> Result<&Link> {
        self.0
            .get(name)
            .ok_or_else(|| Error::link_not_found(resource, name))
    }

    /// Returns true if the capability is currently advertised.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Advertised capability names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Link)> for Links {
    fn from_iter<I: IntoIterator<Item = (String, Link)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
