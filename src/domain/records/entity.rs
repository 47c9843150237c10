use serde::{Deserialize, Serialize};

use crate::domain::{Credential, ModelDescriptor};

/// Model configuration record owned by the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provider: String,
    /// Free-text intent of the model entry; used as refinement context
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub model_id: String,
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub is_public: bool,
}

impl LlmRecord {
    pub fn descriptor(&self) -> ModelDescriptor {
        ModelDescriptor::new(&self.provider, &self.model_id, &self.api_url)
    }
}

/// API key record owned by the document store
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provider: String,
    pub key_value: String,
    /// Keys without the flag are treated as active, like a bare [`Credential`]
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ApiKeyRecord {
    pub fn credential(&self) -> Credential {
        if self.is_active {
            Credential::new(&self.key_value)
        } else {
            Credential::inactive(&self.key_value)
        }
    }
}

impl std::fmt::Debug for ApiKeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyRecord")
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("key_value", &self.credential().masked())
            .field("is_active", &self.is_active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProviderKind;

    #[test]
    fn test_llm_record_descriptor() {
        let record: LlmRecord = serde_json::from_value(serde_json::json!({
            "name": "Gemini Flash",
            "provider": "google",
            "description": "Fast general model",
            "modelId": "gemini-2.0-flash",
            "apiUrl": "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent",
            "capabilities": ["text"],
            "isPublic": true
        }))
        .unwrap();

        let descriptor = record.descriptor();
        assert_eq!(descriptor.kind(), ProviderKind::Google);
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_api_key_record_credential() {
        let record = ApiKeyRecord {
            name: "prod".to_string(),
            provider: "openai".to_string(),
            key_value: "sk-live".to_string(),
            is_active: false,
        };

        let credential = record.credential();
        assert!(!credential.is_active());
        assert!(!format!("{:?}", record).contains("sk-live"));
    }

    #[test]
    fn test_api_key_record_without_flag_is_active() {
        let record: ApiKeyRecord =
            serde_json::from_value(serde_json::json!({"keyValue": "sk-live"})).unwrap();

        assert!(record.is_active);
        assert!(record.credential().ensure_active().is_ok());

        let credential: Credential =
            serde_json::from_value(serde_json::json!({"keyValue": "sk-live"})).unwrap();
        assert_eq!(credential.is_active(), record.is_active);
    }
}
