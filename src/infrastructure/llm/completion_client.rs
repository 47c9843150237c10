//! Single completion round trip against one endpoint

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::http_client::HttpClientTrait;
use super::request_builder::ProviderRequestBuilder;
use super::response_extractor::extract_content;
use crate::domain::{
    CompletionRequest, CompletionResult, Credential, DomainError, ModelDescriptor, ResponseSchema,
};
use crate::infrastructure::observability::{LlmRequestMetricParams, record_llm_request};

/// Builds the vendor request, POSTs it and extracts the generated text.
///
/// No retries. Any non-2xx status is a [`DomainError::Transport`] carrying the
/// status and body.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Arc<dyn HttpClientTrait>,
}

impl CompletionClient {
    pub fn new(http: Arc<dyn HttpClientTrait>) -> Self {
        Self { http }
    }

    pub async fn complete(
        &self,
        descriptor: &ModelDescriptor,
        credential: Option<&Credential>,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<CompletionResult, DomainError> {
        let request = CompletionRequest::new(system_prompt, user_message);
        self.complete_request(descriptor, credential, &request).await
    }

    /// Completion asking for JSON matching `schema`, where the provider supports it
    pub async fn complete_structured(
        &self,
        descriptor: &ModelDescriptor,
        credential: Option<&Credential>,
        system_prompt: &str,
        user_message: &str,
        schema: ResponseSchema,
    ) -> Result<CompletionResult, DomainError> {
        let request = CompletionRequest::new(system_prompt, user_message).with_schema(schema);
        self.complete_request(descriptor, credential, &request).await
    }

    pub async fn complete_request(
        &self,
        descriptor: &ModelDescriptor,
        credential: Option<&Credential>,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, DomainError> {
        let kind = descriptor.kind();
        let provider_request = ProviderRequestBuilder::build(descriptor, credential, request)?;

        info!(
            provider = %kind,
            model = %descriptor.model_id,
            structured = request.response_schema.is_some(),
            "Sending completion request"
        );

        let start = Instant::now();
        let result = self
            .http
            .post_json(
                &provider_request.url,
                &provider_request.headers,
                &provider_request.body,
            )
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(provider = %kind, error = %e, "Completion request failed");
                self.record(descriptor, start, None);
                return Err(e);
            }
        };

        self.record(descriptor, start, Some(response.status));

        if !response.is_success() {
            warn!(
                provider = %kind,
                status = response.status,
                "Provider returned non-success status"
            );
            return Err(DomainError::http_status(
                kind.as_str(),
                response.status,
                &response.body,
            ));
        }

        let body = response.json().map_err(|e| {
            DomainError::transport(kind.as_str(), format!("Failed to parse response: {}", e))
        })?;

        let content = extract_content(kind, &body);

        if content.is_empty() {
            debug!(provider = %kind, "Provider response contained no text");
        }

        Ok(CompletionResult::new(content))
    }

    fn record(&self, descriptor: &ModelDescriptor, start: Instant, status: Option<u16>) {
        record_llm_request(LlmRequestMetricParams {
            provider: descriptor.kind().as_str(),
            model: &descriptor.model_id,
            duration: start.elapsed(),
            status,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::HttpClient;
    use crate::infrastructure::llm::http_client::HttpResponse;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const URL: &str = "https://api.openai.com/v1/chat/completions";

    fn openai() -> ModelDescriptor {
        ModelDescriptor::new("openai", "gpt-4", URL)
    }

    #[tokio::test]
    async fn test_complete_extracts_content() {
        let http = Arc::new(MockHttpClient::new().with_json(
            URL,
            json!({"choices": [{"message": {"content": "A fox."}}]}),
        ));
        let client = CompletionClient::new(http.clone());

        let result = client
            .complete(&openai(), Some(&Credential::new("sk-test")), "", "Describe")
            .await
            .unwrap();

        assert_eq!(result.content, "A fox.");
        assert_eq!(http.call_count(), 1);
        assert_eq!(
            http.requests()[0].header("Authorization"),
            Some("Bearer sk-test")
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let http = Arc::new(
            MockHttpClient::new().with_response(URL, HttpResponse::new(401, "bad key")),
        );
        let client = CompletionClient::new(http);

        let err = client
            .complete(&openai(), None, "", "Describe")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("bad key"));
    }

    #[tokio::test]
    async fn test_success_with_non_json_body_is_transport_error() {
        let http =
            Arc::new(MockHttpClient::new().with_response(URL, HttpResponse::new(200, "<html>")));
        let client = CompletionClient::new(http);

        let err = client
            .complete(&openai(), None, "", "Describe")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Transport { status: None, .. }));
    }

    #[tokio::test]
    async fn test_connection_error_is_propagated() {
        let http = Arc::new(MockHttpClient::new().with_error(URL, "connection refused"));
        let client = CompletionClient::new(http);

        let err = client
            .complete(&openai(), None, "", "Describe")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_missing_text_yields_empty_content() {
        let http = Arc::new(MockHttpClient::new().with_json(URL, json!({"choices": []})));
        let client = CompletionClient::new(http);

        let result = client
            .complete(&openai(), None, "", "Describe")
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_inactive_credential_makes_no_call() {
        let http = Arc::new(MockHttpClient::new());
        let client = CompletionClient::new(http.clone());

        let err = client
            .complete(&openai(), Some(&Credential::inactive("sk-test")), "", "Hi")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Configuration { .. }));
        assert_eq!(http.call_count(), 0);
    }

    #[tokio::test]
    async fn test_structured_completion_against_real_http() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("x-goog-api-key", "goog-key"))
            .and(body_partial_json(json!({
                "generationConfig": {"responseMimeType": "application/json"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "{\"score\": 90}"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CompletionClient::new(Arc::new(HttpClient::new()));
        let descriptor = ModelDescriptor::new("google", "gemini-2.0-flash", server.uri());

        let result = client
            .complete_structured(
                &descriptor,
                Some(&Credential::new("goog-key")),
                "Judge",
                "Compare",
                ResponseSchema::new("verdict", json!({"type": "OBJECT"})),
            )
            .await
            .unwrap();

        assert_eq!(result.content, "{\"score\": 90}");
    }
}
