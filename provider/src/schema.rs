//! Schema types and the declarations for the provider and its one resource.
//!
//! Schemas describe the shape of provider configuration and resource state.
//! The host reads them to render documentation, hide sensitive values and
//! plan changes; [`validation`](crate::validation) checks JSON against them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resource type name the host uses for homes.
pub const HOME_RESOURCE_TYPE: &str = "terratowns_home";

/// The type of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// A string value.
    String,
    /// A 64-bit integer.
    Int64,
}

impl AttributeType {
    pub fn name(self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Int64 => "int64",
        }
    }
}

/// Describes how an attribute can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttributeFlags {
    /// The attribute is required in configuration.
    pub required: bool,
    /// The attribute is optional in configuration.
    pub optional: bool,
    /// The attribute is set by the provider.
    pub computed: bool,
    /// The attribute is hidden in logs and plan output.
    pub sensitive: bool,
}

/// Describes a single attribute in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    #[serde(flatten)]
    pub flags: AttributeFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Checked with [`validate_uuid`](terratowns_core::validate_uuid).
    #[serde(default)]
    pub uuid_format: bool,
}

impl Attribute {
    pub fn new(attr_type: AttributeType, flags: AttributeFlags) -> Self {
        Self {
            attr_type,
            flags,
            description: None,
            uuid_format: false,
        }
    }

    pub fn required_string() -> Self {
        Self::new(
            AttributeType::String,
            AttributeFlags {
                required: true,
                ..Default::default()
            },
        )
    }

    pub fn computed_string() -> Self {
        Self::new(
            AttributeType::String,
            AttributeFlags {
                computed: true,
                ..Default::default()
            },
        )
    }

    pub fn required_int64() -> Self {
        Self::new(
            AttributeType::Int64,
            AttributeFlags {
                required: true,
                ..Default::default()
            },
        )
    }

    pub fn optional_int64() -> Self {
        Self::new(
            AttributeType::Int64,
            AttributeFlags {
                optional: true,
                ..Default::default()
            },
        )
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.flags.sensitive = true;
        self
    }

    pub fn uuid(mut self) -> Self {
        self.uuid_format = true;
        self
    }
}

/// Schema for provider configuration or a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Schema {
    /// Bumped when the state layout changes.
    #[serde(default)]
    pub version: u64,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn v0() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }
}

/// Everything the host needs to know about this provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderSchema {
    pub provider: Schema,
    pub resources: BTreeMap<String, Schema>,
}

impl ProviderSchema {
    pub fn resource(&self, resource_type: &str) -> Option<&Schema> {
        self.resources.get(resource_type)
    }
}

/// Provider block: where the service lives and who is calling it.
pub fn provider_config_schema() -> Schema {
    Schema::v0()
        .with_attribute(
            "endpoint",
            Attribute::required_string().with_description("The endpoint for the external service"),
        )
        .with_attribute(
            "token",
            Attribute::required_string()
                .sensitive()
                .with_description("Bearer token for authorization"),
        )
        .with_attribute(
            "user_uuid",
            Attribute::required_string()
                .uuid()
                .with_description("UUID for configuration"),
        )
        .with_attribute(
            "timeout_secs",
            Attribute::optional_int64().with_description("Per-request timeout in seconds, unset waits indefinitely"),
        )
}

pub fn home_resource_schema() -> Schema {
    Schema::v0()
        .with_attribute("id", Attribute::computed_string().with_description("UUID assigned by the service"))
        .with_attribute("name", Attribute::required_string().with_description("Name of home"))
        .with_attribute(
            "description",
            Attribute::required_string().with_description("Description of home"),
        )
        .with_attribute(
            "domain_name",
            Attribute::required_string().with_description("CloudFront Distribution url"),
        )
        .with_attribute(
            "town",
            Attribute::required_string().with_description("The town that the home is associated with"),
        )
        .with_attribute(
            "content_version",
            Attribute::required_int64().with_description("The content version"),
        )
}

pub fn provider_schema() -> ProviderSchema {
    ProviderSchema {
        provider: provider_config_schema(),
        resources: BTreeMap::from([(HOME_RESOURCE_TYPE.to_string(), home_resource_schema())]),
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    /// Prevents the operation from completing.
    Error,
    /// Worth surfacing, does not block.
    Warning,
}

/// A message for the host to display to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Attribute the diagnostic points at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}
