//! # rhc-rest-api
//!
//! A hypermedia client library for the application-platform broker REST API.
//!
//! The broker describes what a caller may do next through links embedded in
//! each response. This library follows those links rather than building
//! URLs, so an action the broker does not currently allow (deleting a domain
//! that still owns applications, say) surfaces as a typed error before any
//! request is made.
//!
//! ## Security
//!
//! - Passwords and tokens are redacted in Debug output
//! - Tracing spans skip credentials and key material
//! - Error messages from the broker are sanitized of credentials
//!
//! ## Crates
//!
//! - **rhc-client** - Link descriptors, request dispatch, response envelope, errors
//! - **rhc-rest** - Resources: client, domains, applications, cartridges, users, keys
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rhc_rest_api::{BrokerClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BrokerClient::connect(
//!         "https://openshift.example.com/broker/rest",
//!         Credentials::from_env()?,
//!     )
//!     .await?;
//!
//!     let domain = client.add_domain("d1").await?;
//!     let app = domain.add_application("appone", "php-5.3", false).await?;
//!     for cart in app.cartridges().await? {
//!         println!("{} ({})", cart.name(), cart.cartridge_type());
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use rhc_client as client;
pub use rhc_rest as rest;

// Re-export commonly used types at the top level
pub use rhc_client::{BrokerSession, ClientConfig, Credentials, Error, ErrorKind, Result};
pub use rhc_rest::{Application, BrokerClient, Cartridge, Domain, Key, User};
