use serde::{Deserialize, Serialize};

use super::ProviderKind;
use crate::domain::DomainError;

/// Identifies a callable LLM endpoint.
///
/// Fields default to empty strings when absent from the payload so that
/// completeness is checked by [`ModelDescriptor::validate`] and reported as a
/// configuration error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model_id: String,
    #[serde(default)]
    pub api_url: String,
}

impl ModelDescriptor {
    pub fn new(
        provider: impl Into<String>,
        model_id: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model_id: model_id.into(),
            api_url: api_url.into(),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        ProviderKind::from_tag(&self.provider)
    }

    /// Check that every field needed to issue a request is present
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.api_url.trim().is_empty() {
            return Err(DomainError::configuration("LLM API URL is missing"));
        }

        if self.model_id.trim().is_empty() {
            return Err(DomainError::configuration("LLM model ID is missing"));
        }

        if self.provider.trim().is_empty() {
            return Err(DomainError::configuration("LLM provider is missing"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let descriptor: ModelDescriptor = serde_json::from_value(serde_json::json!({
            "provider": "openai",
            "modelId": "gpt-4",
            "apiUrl": "https://api.openai.com/v1/chat/completions"
        }))
        .unwrap();

        assert_eq!(descriptor.kind(), ProviderKind::OpenAi);
        assert_eq!(descriptor.model_id, "gpt-4");
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_configuration_errors() {
        let descriptor: ModelDescriptor =
            serde_json::from_value(serde_json::json!({"provider": "openai"})).unwrap();

        let err = descriptor.validate().unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
        assert!(err.to_string().contains("API URL"));
    }

    #[test]
    fn test_missing_model_id() {
        let descriptor = ModelDescriptor::new("anthropic", " ", "https://api.anthropic.com");
        let err = descriptor.validate().unwrap_err();
        assert!(err.to_string().contains("model ID"));
    }

    #[test]
    fn test_missing_provider() {
        let descriptor = ModelDescriptor::new("", "m", "https://example.com");
        let err = descriptor.validate().unwrap_err();
        assert!(err.to_string().contains("provider"));
    }
}
