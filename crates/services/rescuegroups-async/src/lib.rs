#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

//! # `rescuegroups-async`
//!
//! Async client for the RescueGroups adoptable-pet search API.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rescuegroups_async::{Client, types::AnimalSearchParams};
//!
//! # async fn example() -> Result<(), rescuegroups_async::ApiError> {
//! let client = Client::new();
//!
//! let params = AnimalSearchParams::new()
//!     .with_species("Dog")
//!     .with_location("94110")
//!     .with_limit(25);
//!
//! let page = client.animals().search(&params).await?;
//! println!("{} of {} dogs", page.data.len(), page.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## Failures
//!
//! Every call returns [`ApiError`]; render it for people with
//! [`describe_error`]. Nothing is retried automatically.
//!
//! ## Service status
//!
//! [`StatusMonitor`] answers "is the service usable?" with a probe whose
//! result is cached for 60 seconds.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// Response envelope parsing
pub mod parse;
/// Request envelope construction
pub mod query;
/// API resource implementations
pub mod resources;
/// Cached service status
pub mod status;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::{RescueGroupsConfig, SearchDefaults};
pub use crate::error::{ApiError, describe_error};
pub use crate::status::{ServiceStatus, StatusMonitor, StatusSnapshot};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{ApiError, Client, RescueGroupsConfig, ServiceStatus, StatusMonitor};
}
