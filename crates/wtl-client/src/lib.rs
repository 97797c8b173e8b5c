//! Client for the WTL HLR/HSS provisioning API.
//!
//! Sends [`UnifiedSyncRequest`]s to the configured WTL endpoint under a
//! bounded timeout and classifies every response or transport fault into a
//! typed [`WtlError`]. The client performs no retries of its own — upstream
//! owns redelivery — with one deliberate exception: an expired OAuth2 token
//! is refreshed transparently and the call re-attempted once.
//!
//! # Modules
//!
//! - [`models`] - Wire models (`UnifiedSyncRequest`, `WtlResponse`, enums)
//! - [`auth`] - Credential handling and OAuth2 token caching
//! - [`config`] - Client configuration
//! - [`client`] - The HTTP client itself
//! - [`error`] - Typed failure classification

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use auth::{WtlAuth, WtlCredentials};
pub use client::WtlClient;
pub use config::WtlConfig;
pub use error::{WtlError, WtlResult};
pub use models::{SubscriberStatus, UnifiedSyncRequest, WtlAction, WtlResponse};
