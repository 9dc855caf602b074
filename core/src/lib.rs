//! Synchronous API client core for the TerraTowns home service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. A `Transport` executes the round-trip, and
//! `HomeResource` ties build, execute and parse together for the four
//! operations a provider host calls: create, read, update, delete.
//!
//! # Design
//! - `HomeClient` is stateless; it holds values copied from `ProviderConfig`.
//! - Every operation takes the `ProviderConfig` explicitly. There is no
//!   global state, so calls for independent homes may run concurrently.
//! - Status dispatch: 200 is success, 404 is absence on read only, anything
//!   else is fatal. Delete treats every status as success.
//! - The library only emits `tracing` events; installing a subscriber is up
//!   to the binary that links it.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resource;
pub mod transport;
pub mod types;

pub use client::HomeClient;
pub use config::{validate_uuid, ProviderConfig};
pub use error::{ApiError, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::HomeResource;
pub use transport::{Transport, UreqTransport};
pub use types::{Home, HomeId, HomeRecord, UpdateHome, UpdatedHome};
