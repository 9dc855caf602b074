//! Host-facing adapter for the `terratowns_home` resource.
//!
//! The host hands over JSON: a provider block, planned state and prior
//! state. This crate validates it against the declared schemas, converts
//! it into `terratowns_core` types and turns API results back into state.
//! Errors come back as [`Diagnostic`]s through
//! [`ProviderError::into_diagnostics`].

pub mod error;
pub mod logging;
pub mod provider;
pub mod schema;
pub mod state;
pub mod validation;

pub use error::ProviderError;
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use provider::{ProviderMeta, TerratownsProvider};
pub use schema::{
    home_resource_schema, provider_config_schema, provider_schema, Attribute, AttributeFlags, AttributeType,
    Diagnostic, DiagnosticSeverity, ProviderSchema, Schema, HOME_RESOURCE_TYPE,
};
pub use state::HomeState;
pub use validation::{validate, validate_result};
