//! Domain DTOs for the home API.
//!
//! # Design
//! The request and response shapes are fixed by the service. Each wire
//! shape gets its own type so the JSON that goes out contains exactly the
//! documented fields, and responses are checked at the deserialization
//! boundary instead of being read as untyped maps.

use serde::{Deserialize, Serialize};

/// Desired state of a home. Serializes to the create payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Home {
    pub name: String,
    pub description: String,
    pub domain_name: String,
    pub town: String,
    pub content_version: i64,
}

/// Request payload for updating a home. `domain_name` and `town` cannot be
/// changed by an update and are never sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateHome {
    pub name: String,
    pub description: String,
    pub content_version: i64,
}

impl From<&Home> for UpdateHome {
    fn from(home: &Home) -> Self {
        Self {
            name: home.name.clone(),
            description: home.description.clone(),
            content_version: home.content_version,
        }
    }
}

/// `{"uuid": ...}` body returned by create and update.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HomeId {
    pub uuid: String,
}

/// Fields refreshed from a read response. The service also returns `uuid`
/// and `town`; those are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HomeRecord {
    pub name: String,
    pub description: String,
    pub domain_name: String,
    pub content_version: i64,
}

/// Outcome of a successful update: the identifier returned by the service
/// and the values that were sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedHome {
    pub id: String,
    pub name: String,
    pub description: String,
    pub content_version: i64,
}
