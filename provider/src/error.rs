use terratowns_core::ApiError;
use thiserror::Error;

use crate::schema::Diagnostic;

/// Errors surfaced to the host by provider callbacks.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("validation failed with {} diagnostic(s)", .0.len())]
    Validation(Vec<Diagnostic>),

    #[error("unknown resource type: {0}")]
    UnknownResource(String),

    #[error("invalid resource state: {0}")]
    InvalidState(#[from] serde_json::Error),

    /// A read, update or delete was asked for a home that was never created.
    #[error("resource state has no id")]
    MissingId,
}

impl ProviderError {
    /// Diagnostics for the host. Validation errors keep their own list.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        match self {
            ProviderError::Validation(diagnostics) => diagnostics,
            ProviderError::Api(ApiError::InvalidConfig(msg)) => {
                vec![Diagnostic::error("Invalid provider configuration").with_detail(msg)]
            },
            other => vec![Diagnostic::error(other.to_string())],
        }
    }
}

#[cfg(test)]
mod tests {
    use terratowns_core::Operation;

    use super::*;

    #[test]
    fn api_errors_keep_their_message() {
        let err = ProviderError::from(ApiError::UnexpectedStatus {
            operation: Operation::Create,
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "boom".to_string(),
        });
        let diags = err.into_diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].summary,
            "failed to create home resource, status_code: 500, status: Internal Server Error, body: boom"
        );
    }

    #[test]
    fn validation_diagnostics_pass_through() {
        let diags = vec![
            Diagnostic::error("a").with_attribute("name"),
            Diagnostic::error("b").with_attribute("town"),
        ];
        let err = ProviderError::Validation(diags.clone());
        assert_eq!(err.to_string(), "validation failed with 2 diagnostic(s)");
        assert_eq!(err.into_diagnostics(), diags);
    }

    #[test]
    fn invalid_config_gets_a_summary() {
        let diags = ProviderError::from(ApiError::InvalidConfig("token must not be empty".to_string()))
            .into_diagnostics();
        assert_eq!(diags[0].summary, "Invalid provider configuration");
        assert_eq!(diags[0].detail.as_deref(), Some("token must not be empty"));
    }
}
