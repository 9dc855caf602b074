//! Stateless HTTP request builder and response parser for the home API.
//!
//! # Design
//! `HomeClient` holds only values copied from a `ProviderConfig` and carries
//! no mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The transport runs the round-trip in between.

use url::Url;

use crate::config::ProviderConfig;
use crate::error::{ApiError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Home, HomeId, HomeRecord, UpdateHome, UpdatedHome};

/// Synchronous, stateless client for the home API.
#[derive(Clone)]
pub struct HomeClient {
    base_url: String,
    user_uuid: String,
    token: String,
}

impl HomeClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            user_uuid: config.user_uuid.clone(),
            token: config.token.clone(),
        }
    }

    fn collection_url(&self) -> Result<Url, ApiError> {
        let raw = format!("{}/u/{}/homes/", self.base_url, self.user_uuid);
        Url::parse(&raw).map_err(|e| ApiError::InvalidRequest(format!("{raw}: {e}")))
    }

    /// The id is pushed as one percent-encoded path segment.
    fn home_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = self.collection_url()?;
        let base = url.to_string();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidRequest(format!("{base}: cannot be a base URL")))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn request(&self, method: HttpMethod, url: Url, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: url.into(),
            headers: vec![
                ("authorization".to_string(), format!("Bearer {}", self.token)),
                ("content-type".to_string(), "application/json".to_string()),
                ("accept".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }

    pub fn build_create_home(&self, input: &Home) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, self.collection_url()?, Some(body)))
    }

    pub fn build_read_home(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Get, self.home_url(id)?, None))
    }

    pub fn build_update_home(&self, id: &str, input: &UpdateHome) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Put, self.home_url(id)?, Some(body)))
    }

    pub fn build_delete_home(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Delete, self.home_url(id)?, None))
    }

    /// Returns the identifier assigned by the service.
    pub fn parse_create_home(&self, response: HttpResponse) -> Result<String, ApiError> {
        let response = expect_ok(Operation::Create, response)?;
        decode::<HomeId>(&response.body).map(|id| id.uuid)
    }

    /// `None` means the service no longer knows the home.
    pub fn parse_read_home(&self, response: HttpResponse) -> Result<Option<HomeRecord>, ApiError> {
        if response.status == 404 {
            return Ok(None);
        }
        let response = expect_ok(Operation::Read, response)?;
        decode(&response.body).map(Some)
    }

    /// Adopts the `uuid` from the response and reports the fields as sent.
    pub fn parse_update_home(&self, response: HttpResponse, sent: UpdateHome) -> Result<UpdatedHome, ApiError> {
        let response = expect_ok(Operation::Update, response)?;
        let HomeId { uuid } = decode(&response.body)?;
        Ok(UpdatedHome {
            id: uuid,
            name: sent.name,
            description: sent.description,
            content_version: sent.content_version,
        })
    }

    /// Delete is best-effort: any status the service returns counts as removed.
    pub fn parse_delete_home(&self, response: HttpResponse) -> Result<(), ApiError> {
        if !response.is_success() {
            tracing::warn!(
                status = response.status,
                body = %response.body,
                "delete returned non-success status, treating home as removed"
            );
        }
        Ok(())
    }
}

impl std::fmt::Debug for HomeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeClient")
            .field("base_url", &self.base_url)
            .field("user_uuid", &self.user_uuid)
            .finish_non_exhaustive()
    }
}

/// Only 200 counts as success for create, read and update.
fn expect_ok(operation: Operation, response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.status == 200 {
        return Ok(response);
    }
    Err(ApiError::UnexpectedStatus {
        operation,
        status: response.status,
        status_text: response.status_text,
        body: response.body,
    })
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
