//! The provider entry points a host calls.
//!
//! `TerratownsProvider` answers schema and validation questions without any
//! configuration. `configure` turns the provider block into a
//! `ProviderMeta`, which carries the validated config and the
//! `HomeResource` used by the four resource callbacks.

use serde_json::Value;
use terratowns_core::{ApiError, HomeResource, ProviderConfig, Transport, UreqTransport};
use tracing::{info, instrument};

use crate::error::ProviderError;
use crate::schema::{provider_schema, Diagnostic, ProviderSchema, HOME_RESOURCE_TYPE};
use crate::state::HomeState;
use crate::validation::validate;

#[derive(Debug, Clone, Copy, Default)]
pub struct TerratownsProvider;

impl TerratownsProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn schema(&self) -> ProviderSchema {
        provider_schema()
    }

    pub fn validate_provider_config(&self, config: &Value) -> Vec<Diagnostic> {
        let mut diagnostics = validate(&provider_schema().provider, config);
        if config.get("timeout_secs").and_then(Value::as_i64).is_some_and(|t| t <= 0) {
            diagnostics.push(
                Diagnostic::error("Invalid timeout")
                    .with_detail("timeout_secs must be greater than zero")
                    .with_attribute("timeout_secs"),
            );
        }
        diagnostics
    }

    pub fn validate_resource_config(&self, resource_type: &str, config: &Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let schema = provider_schema();
        let resource = schema
            .resource(resource_type)
            .ok_or_else(|| ProviderError::UnknownResource(resource_type.to_string()))?;
        Ok(validate(resource, config))
    }

    /// Validate the provider block and build a `ureq`-backed resource.
    pub fn configure(&self, config: Value) -> Result<ProviderMeta, ProviderError> {
        let config = self.parse_config(config)?;
        let resource = HomeResource::from_config(&config);
        Ok(ProviderMeta { config, resource })
    }

    pub fn configure_with_transport<T: Transport>(&self, config: Value, transport: T) -> Result<ProviderMeta<T>, ProviderError> {
        let config = self.parse_config(config)?;
        Ok(ProviderMeta {
            config,
            resource: HomeResource::new(transport),
        })
    }

    fn parse_config(&self, config: Value) -> Result<ProviderConfig, ProviderError> {
        let diagnostics = self.validate_provider_config(&config);
        if diagnostics.iter().any(Diagnostic::is_error) {
            return Err(ProviderError::Validation(diagnostics));
        }
        let config = decode_config(config)?;
        config.validate()?;
        info!(endpoint = %config.endpoint, user_uuid = %config.user_uuid, "provider configured");
        Ok(config)
    }
}

fn decode_config(config: Value) -> Result<ProviderConfig, ProviderError> {
    serde_json::from_value(config).map_err(|e| ApiError::InvalidConfig(e.to_string()).into())
}

/// Configured provider instance handed to every resource callback.
#[derive(Debug, Clone)]
pub struct ProviderMeta<T = UreqTransport> {
    config: ProviderConfig,
    resource: HomeResource<T>,
}

impl<T: Transport> ProviderMeta<T> {
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn resource(&self) -> &HomeResource<T> {
        &self.resource
    }

    fn check_type(resource_type: &str) -> Result<(), ProviderError> {
        if resource_type == HOME_RESOURCE_TYPE {
            Ok(())
        } else {
            Err(ProviderError::UnknownResource(resource_type.to_string()))
        }
    }

    /// Create the home and return the planned state with `id` filled in.
    #[instrument(skip(self, planned))]
    pub fn create(&self, resource_type: &str, planned: Value) -> Result<Value, ProviderError> {
        Self::check_type(resource_type)?;
        let mut state = HomeState::from_value(planned)?;
        state.id = self.resource.create(&self.config, &state.desired())?;
        state.to_value()
    }

    /// Refresh state. `None` tells the host to drop the resource from state.
    #[instrument(skip(self, current))]
    pub fn read(&self, resource_type: &str, current: Value) -> Result<Option<Value>, ProviderError> {
        Self::check_type(resource_type)?;
        let mut state = HomeState::from_value(current)?;
        let Some(record) = self.resource.read(&self.config, state.id()?)? else {
            return Ok(None);
        };
        state.refresh(record);
        Ok(Some(state.to_value()?))
    }

    /// Push changes for the home identified by `prior`.
    #[instrument(skip(self, prior, planned))]
    pub fn update(&self, resource_type: &str, prior: Value, planned: Value) -> Result<Value, ProviderError> {
        Self::check_type(resource_type)?;
        let prior = HomeState::from_value(prior)?;
        let mut state = HomeState::from_value(planned)?;
        let updated = self.resource.update(&self.config, prior.id()?, &state.desired())?;
        state.apply_update(updated);
        state.to_value()
    }

    #[instrument(skip(self, current))]
    pub fn delete(&self, resource_type: &str, current: Value) -> Result<(), ProviderError> {
        Self::check_type(resource_type)?;
        let state = HomeState::from_value(current)?;
        self.resource.delete(&self.config, state.id()?)?;
        Ok(())
    }
}
