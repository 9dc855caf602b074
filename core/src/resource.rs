//! The four home operations: build, execute, parse.
//!
//! Each call issues exactly one request and takes the `ProviderConfig`
//! explicitly, so a single `HomeResource` can serve any number of provider
//! instances from any number of threads.

use tracing::{debug, info, instrument};

use crate::client::HomeClient;
use crate::config::ProviderConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Home, HomeRecord, UpdateHome, UpdatedHome};

#[derive(Debug, Clone, Default)]
pub struct HomeResource<T = UreqTransport> {
    transport: T,
}

impl<T: Transport> HomeResource<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, request: HttpRequest) -> Result<crate::http::HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    /// Create a home and return the identifier the service assigned.
    #[instrument(name = "home.create", skip_all, fields(name = %desired.name))]
    pub fn create(&self, config: &ProviderConfig, desired: &Home) -> Result<String, ApiError> {
        let client = HomeClient::new(config);
        let response = self.send(client.build_create_home(desired)?)?;
        let id = client.parse_create_home(response)?;
        info!(home_id = %id, "home created");
        Ok(id)
    }

    /// Fetch the current state of a home. `Ok(None)` means it no longer exists.
    #[instrument(name = "home.read", skip(self, config))]
    pub fn read(&self, config: &ProviderConfig, id: &str) -> Result<Option<HomeRecord>, ApiError> {
        let client = HomeClient::new(config);
        let response = self.send(client.build_read_home(id)?)?;
        let record = client.parse_read_home(response)?;
        if record.is_none() {
            info!("home not found, treating as deleted");
        }
        Ok(record)
    }

    /// Push name, description and content version. The returned identifier
    /// comes from the response, not from `id`.
    #[instrument(name = "home.update", skip(self, config, desired))]
    pub fn update(&self, config: &ProviderConfig, id: &str, desired: &Home) -> Result<UpdatedHome, ApiError> {
        let client = HomeClient::new(config);
        let payload = UpdateHome::from(desired);
        let response = self.send(client.build_update_home(id, &payload)?)?;
        let updated = client.parse_update_home(response, payload)?;
        if updated.id != id {
            // TODO: drop once the service documents whether update may reassign ids.
            tracing::warn!(new_id = %updated.id, "service returned a different identifier on update");
        }
        info!(home_id = %updated.id, "home updated");
        Ok(updated)
    }

    /// Delete a home. Only a failure to execute the request is an error.
    #[instrument(name = "home.delete", skip(self, config))]
    pub fn delete(&self, config: &ProviderConfig, id: &str) -> Result<(), ApiError> {
        let client = HomeClient::new(config);
        let response = self.send(client.build_delete_home(id)?)?;
        client.parse_delete_home(response)?;
        info!("home deleted");
        Ok(())
    }
}

impl HomeResource<UreqTransport> {
    /// Resource backed by a `ureq` transport using the config's timeout.
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(UreqTransport::from_config(config))
    }
}
