//! # rhc-rest
//!
//! Resource layer for the application-platform broker REST API.
//!
//! Every resource holds the links the broker advertised for it and can only
//! perform those actions. Operations that change server state return a fresh
//! snapshot of the resource; commands with no representation (restart,
//! delete) return `()`.
//!
//! ## Resources
//!
//! - **BrokerClient** - entry point: domains, cartridge catalogue, user
//! - **Domain** - applications, rename, delete
//! - **Application** - cartridges, start/stop/restart, delete
//! - **Cartridge** - start/stop/restart/reload, delete
//! - **User** - SSH keys
//! - **Key** - update, delete
//!
//! ## Example
//!
//! ```rust,ignore
//! use rhc_rest::{BrokerClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rhc_rest::Error> {
//!     let client = BrokerClient::connect(
//!         "https://openshift.example.com/broker/rest",
//!         Credentials::from_env()?,
//!     )
//!     .await?;
//!
//!     for domain in client.domains().await? {
//!         for app in domain.applications().await? {
//!             println!("{}/{}", domain.id(), app.name());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

mod application;
mod cartridge;
mod client;
mod domain;
mod key;
mod resource;
mod user;

pub use application::Application;
pub use cartridge::Cartridge;
pub use client::BrokerClient;
pub use domain::Domain;
pub use key::Key;
pub use user::User;

// Re-export the pieces callers need alongside resources
pub use rhc_client::{ClientConfig, Credentials, Error, ErrorKind, Links, Result};
