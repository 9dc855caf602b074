//! Check host-supplied JSON against a [`Schema`].
//!
//! An empty diagnostic list means the value is valid. Rules:
//!
//! - required attributes must be present and non-null
//! - optional attributes may be absent or null
//! - computed-only attributes are skipped
//! - values must match the declared type
//! - attributes flagged as UUIDs must parse as one

use serde_json::Value;

use crate::schema::{Attribute, AttributeType, Diagnostic, Schema};

pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let obj = match value {
        Value::Object(map) => map,
        _ => {
            diagnostics.push(
                Diagnostic::error("Expected object").with_detail(format!("Got {}", value_type_name(value))),
            );
            return diagnostics;
        },
    };

    for (name, attr) in &schema.attributes {
        validate_attribute(attr, obj.get(name), name, &mut diagnostics);
    }
    diagnostics
}

/// [`validate`], as a `Result`.
pub fn validate_result(schema: &Schema, value: &Value) -> Result<(), Vec<Diagnostic>> {
    let diagnostics = validate(schema, value);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}

fn validate_attribute(attr: &Attribute, value: Option<&Value>, name: &str, diagnostics: &mut Vec<Diagnostic>) {
    if attr.flags.computed && !attr.flags.optional && !attr.flags.required {
        return;
    }

    match value {
        None | Some(Value::Null) => {
            if attr.flags.required {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required attribute '{name}'"))
                        .with_detail("This attribute is required and must be provided")
                        .with_attribute(name),
                );
            }
        },
        Some(v) => {
            if !matches_type(attr.attr_type, v) {
                diagnostics.push(type_error(name, attr.attr_type, v));
                return;
            }
            if attr.uuid_format {
                if let Some(Err(err)) = v.as_str().map(terratowns_core::validate_uuid) {
                    diagnostics.push(
                        Diagnostic::error(uuid_message(&err))
                            .with_detail(format!("'{name}' must be a UUID"))
                            .with_attribute(name),
                    );
                }
            }
        },
    }
}

// Strips the "invalid provider configuration: " prefix ApiError adds.
fn uuid_message(err: &terratowns_core::ApiError) -> String {
    match err {
        terratowns_core::ApiError::InvalidConfig(msg) => msg.clone(),
        other => other.to_string(),
    }
}

fn matches_type(attr_type: AttributeType, value: &Value) -> bool {
    match attr_type {
        AttributeType::String => value.is_string(),
        AttributeType::Int64 => is_int64(value),
    }
}

fn is_int64(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.as_u64().is_some_and(|u| i64::try_from(u).is_ok()),
        _ => false,
    }
}

fn type_error(name: &str, expected: AttributeType, value: &Value) -> Diagnostic {
    Diagnostic::error(format!("Invalid type for '{name}'"))
        .with_detail(format!("Expected {}, got {}", expected.name(), value_type_name(value)))
        .with_attribute(name)
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
