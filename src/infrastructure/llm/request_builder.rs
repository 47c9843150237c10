//! Per-vendor HTTP request shapes for a single completion call

use serde_json::{Value, json};
use tracing::debug;

use crate::domain::{CompletionRequest, Credential, DomainError, ModelDescriptor, ProviderKind};

const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 2000;
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Fully assembled HTTP request, ready to POST
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl ProviderRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Maps a normalized [`CompletionRequest`] onto the request shape of the
/// endpoint a [`ModelDescriptor`] points at. Pure: no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderRequestBuilder;

impl ProviderRequestBuilder {
    pub fn build(
        descriptor: &ModelDescriptor,
        credential: Option<&Credential>,
        request: &CompletionRequest,
    ) -> Result<ProviderRequest, DomainError> {
        descriptor.validate()?;

        if let Some(credential) = credential {
            credential.ensure_active()?;
        }

        let kind = descriptor.kind();

        if let Some(schema) = &request.response_schema {
            if !kind.supports_response_schema() {
                debug!(
                    provider = %kind,
                    schema = %schema.name,
                    "Provider does not support response schemas, ignoring"
                );
            }
        }

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];

        match credential.filter(|c| c.has_key()) {
            Some(credential) => {
                debug!(provider = %kind, key = %credential.masked(), "Attaching credential");
                headers.push((
                    kind.credential_header().to_string(),
                    Self::credential_value(kind, credential),
                ));
            }
            None => debug!(provider = %kind, "No credential supplied"),
        }

        let body = match kind {
            ProviderKind::OpenAi => Self::openai_body(descriptor, request),
            ProviderKind::Anthropic => {
                headers.push(("anthropic-version".to_string(), ANTHROPIC_VERSION.to_string()));
                Self::anthropic_body(descriptor, request)
            }
            ProviderKind::Google => Self::google_body(request),
            ProviderKind::Generic => Self::generic_body(request),
        };

        Ok(ProviderRequest {
            url: descriptor.api_url.clone(),
            headers,
            body,
        })
    }

    fn credential_value(kind: ProviderKind, credential: &Credential) -> String {
        match kind {
            ProviderKind::OpenAi | ProviderKind::Generic => {
                format!("Bearer {}", credential.key_value())
            }
            ProviderKind::Anthropic | ProviderKind::Google => credential.key_value().to_string(),
        }
    }

    fn openai_body(descriptor: &ModelDescriptor, request: &CompletionRequest) -> Value {
        let mut messages = Vec::with_capacity(2);

        if request.has_system_prompt() {
            messages.push(json!({"role": "system", "content": request.system_prompt}));
        }
        messages.push(json!({"role": "user", "content": request.user_message}));

        json!({
            "model": descriptor.model_id,
            "messages": messages,
            "temperature": DEFAULT_TEMPERATURE,
            "max_tokens": DEFAULT_MAX_TOKENS,
        })
    }

    // System prompt is folded into the single user turn.
    fn anthropic_body(descriptor: &ModelDescriptor, request: &CompletionRequest) -> Value {
        json!({
            "model": descriptor.model_id,
            "max_tokens": DEFAULT_MAX_TOKENS,
            "messages": [{"role": "user", "content": request.folded()}],
        })
    }

    fn google_body(request: &CompletionRequest) -> Value {
        let generation_config = match &request.response_schema {
            Some(schema) => json!({
                "responseMimeType": "application/json",
                "responseSchema": schema.schema,
            }),
            None => json!({"responseMimeType": "text/plain"}),
        };

        let mut body = json!({
            "contents": [{"parts": [{"text": request.user_message}]}],
            "generationConfig": generation_config,
        });

        if request.has_system_prompt() {
            body["system_instruction"] = json!({"parts": [{"text": request.system_prompt}]});
        }

        body
    }

    fn generic_body(request: &CompletionRequest) -> Value {
        json!({
            "prompt": request.folded(),
            "max_tokens": DEFAULT_MAX_TOKENS,
            "temperature": DEFAULT_TEMPERATURE,
        })
    }
}
