//! Omnichannel platform HTTP client.
//!
//! This crate provides a typed client for the chat platform's admin API:
//! listing agents, assigning an agent to a room, resolving rooms, and
//! managing the platform-side webhook registration.
//!
//! # Example
//!
//! ```no_run
//! use omni_client::{OmniClient, OmniConfig, Upstream};
//!
//! # async fn example() -> Result<(), omni_client::OmniError> {
//! let config = OmniConfig::new("https://omnichannel.example.com")
//!     .with_app_credentials("my-app", "s3cret");
//! let client = OmniClient::new(config)?;
//!
//! let agents = client.list_all_agents().await?;
//! for agent in agents {
//!     println!("{}: available={}", agent.id, agent.is_available);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;
pub mod upstream;

pub use client::OmniClient;
pub use config::OmniConfig;
pub use error::OmniError;
pub use types::*;
pub use upstream::Upstream;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
