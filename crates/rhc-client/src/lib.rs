//! # rhc-client
//!
//! Core HTTP infrastructure for the application-platform broker REST API.
//!
//! The broker is a hypermedia API: every representation it returns carries
//! a map of links describing the actions currently allowed on it. This crate
//! provides:
//! - Link descriptors and the per-resource link map
//! - The response envelope (`type` / `data` / `messages`)
//! - A request dispatcher that follows a link exactly once (no retries)
//! - Typed errors separating missing links, API failures and network failures
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Resource Layer                           │
//! │  (rhc-rest: BrokerClient, Domain, Application, ...)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    BrokerSession                            │
//! │  - Holds endpoint + credentials + HTTP client               │
//! │  - Resolves link hrefs, attaches auth, parses envelopes     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    BrokerHttpClient                         │
//! │  - One request per call, timeouts, compression              │
//! │  - Maps error statuses to typed errors                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use rhc_client::{BrokerSession, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rhc_client::Error> {
//!     let session = BrokerSession::new(
//!         "https://openshift.example.com/broker/rest",
//!         Credentials::from_env()?,
//!     )?;
//!
//!     let links = session.discover().await?;
//!     let list = links.require("api", "LIST_DOMAINS")?;
//!     let envelope = session.follow(list, None, None).await?;
//!     println!("{:?}", envelope.data);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod credentials;
mod error;
pub mod link;
mod request;
mod response;
mod session;

pub use client::BrokerHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use credentials::Credentials;
pub use error::{Error, ErrorKind, Result};
pub use link::{Link, LinkParam, Links};
pub use request::{Payload, RequestBuilder, RequestMethod};
pub use response::{BrokerMessage, Response, ResponseEnvelope, ResponseExt};
pub use session::BrokerSession;

/// Extended timeout for creating scalable applications.
pub const PROVISIONING_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(180);

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("rhc-rest-api/", env!("CARGO_PKG_VERSION"));
