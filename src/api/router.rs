use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;
use super::workbench;

/// Create a minimal router without state
/// Note: /ready endpoint is not available without state
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .merge(workbench::create_workbench_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::build_app_state;
    use crate::domain::{ApiKeyRecord, LlmRecord};
    use crate::infrastructure::evaluation::JudgeConfig;
    use crate::infrastructure::llm::HttpResponse;
    use crate::infrastructure::llm::mock::MockHttpClient;
    use crate::infrastructure::records::InMemoryRecordStore;

    const CANDIDATE_URL: &str = "https://api.openai.com/v1/chat/completions";
    const JUDGE_URL: &str = "https://judge.example.com/generate";

    fn gemini_reply(text: &str) -> Value {
        json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
    }

    fn app(http: MockHttpClient, store: InMemoryRecordStore) -> (Router, Arc<MockHttpClient>) {
        let http = Arc::new(http);
        let state = build_app_state(
            JudgeConfig::new(JUDGE_URL, "judge-key"),
            http.clone(),
            Arc::new(store),
        );
        (create_router_with_state(state), http)
    }

    fn scripted_http() -> MockHttpClient {
        MockHttpClient::new()
            .with_json(
                CANDIDATE_URL,
                json!({"choices": [{"message": {"content": "A fox."}}]}),
            )
            .with_json(
                JUDGE_URL,
                gemini_reply(r#"{"score":80,"justification":"Close match"}"#),
            )
    }

    fn run_test_body() -> Value {
        json!({
            "prompt": {"content": "Describe {input}", "is_system_prompt": false},
            "input": "fox",
            "goldenAnswer": "A fox.",
            "llm": {"provider": "openai", "modelId": "gpt-4", "apiUrl": CANDIDATE_URL},
            "apiKey": {"keyValue": "sk-test", "isActive": true}
        })
    }

    async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        send(router, request).await
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn refine_store() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        store
            .insert_public_llm(
                "gpt",
                LlmRecord {
                    name: "GPT-4".to_string(),
                    provider: "openai".to_string(),
                    description: "Support replies".to_string(),
                    model_id: "gpt-4".to_string(),
                    api_url: CANDIDATE_URL.to_string(),
                    is_public: true,
                },
            )
            .await;
        store
            .insert_api_key(
                "u1",
                "off",
                ApiKeyRecord {
                    name: "old".to_string(),
                    provider: "openai".to_string(),
                    key_value: "sk-old".to_string(),
                    is_active: false,
                },
            )
            .await;
        store
    }

    #[tokio::test]
    async fn test_health_without_state() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(create_router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_run_test_success() {
        let (router, http) = app(scripted_http(), InMemoryRecordStore::new());
        let (status, body) = post(router, "/run-test", run_test_body()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"output": "A fox.", "score": 80.0, "justification": "Close match"})
        );
        assert_eq!(http.requests()[0].header("Authorization"), Some("Bearer sk-test"));
    }

    #[tokio::test]
    async fn test_run_test_missing_field() {
        let mut body = run_test_body();
        body.as_object_mut().unwrap().remove("goldenAnswer");

        let (router, http) = app(MockHttpClient::new(), InMemoryRecordStore::new());
        let (status, body) = post(router, "/run-test", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing required parameters"}));
        assert_eq!(http.call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_test_inactive_key() {
        let mut body = run_test_body();
        body["apiKey"]["isActive"] = json!(false);

        let (router, http) = app(MockHttpClient::new(), InMemoryRecordStore::new());
        let (status, body) = post(router, "/run-test", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "API key is not active");
        assert_eq!(http.call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_test_provider_failure_is_redacted() {
        let http = MockHttpClient::new()
            .with_response(CANDIDATE_URL, HttpResponse::new(401, "bad key sk-test"));
        let (router, _) = app(http, InMemoryRecordStore::new());
        let (status, body) = post(router, "/run-test", run_test_body()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["error"].as_str().unwrap();
        assert!(!message.contains("sk-test"));
    }

    #[tokio::test]
    async fn test_run_test_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/run-test")
            .header("content-type", "application/json")
            .body(Body::from("{oops"))
            .unwrap();

        let (router, _) = app(MockHttpClient::new(), InMemoryRecordStore::new());
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_run_test_detailed() {
        let http = MockHttpClient::new()
            .with_json(
                CANDIDATE_URL,
                json!({"choices": [{"message": {"content": "A fox."}}]}),
            )
            .with_json(
                JUDGE_URL,
                gemini_reply(
                    r#"{"score": 75, "output": {"strengths": ["concise"], "issues": [], "suggestions": ["add colour"]}}"#,
                ),
            );
        let (router, _) = app(http, InMemoryRecordStore::new());
        let (status, body) = post(router, "/run-test/detailed", run_test_body()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 75.0);
        assert_eq!(body["output_analysis"]["strengths"], json!(["concise"]));
    }

    #[tokio::test]
    async fn test_refine_prompt_missing_fields() {
        let (router, _) = app(MockHttpClient::new(), InMemoryRecordStore::new());
        let (status, body) = post(router, "/refine-prompt", json!({"userId": "u1"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Missing required fields: userId, llmId, and prompt are required"
        );
    }

    #[tokio::test]
    async fn test_refine_prompt_unknown_llm() {
        let (router, _) = app(MockHttpClient::new(), refine_store().await);
        let (status, body) = post(
            router,
            "/refine-prompt",
            json!({"userId": "u1", "llmId": "nope", "prompt": "Greet"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "LLM not found"}));
    }

    #[tokio::test]
    async fn test_refine_prompt_inactive_key() {
        let (router, _) = app(MockHttpClient::new(), refine_store().await);
        let (status, body) = post(
            router,
            "/refine-prompt",
            json!({"userId": "u1", "llmId": "gpt", "apiKeyId": "off", "prompt": "Greet"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "API key is not active"}));
    }

    #[tokio::test]
    async fn test_refine_prompt_fallback_result() {
        let http = MockHttpClient::new().with_json(
            CANDIDATE_URL,
            json!({"choices": [{"message": {"content": "Greet the user warmly by name."}}]}),
        );
        let (router, _) = app(http, refine_store().await);
        let (status, body) = post(
            router,
            "/refine-prompt",
            json!({"userId": "u1", "llmId": "gpt", "prompt": "Greet"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 75.0);
        assert_eq!(body["refinedPrompt"], "Greet the user warmly by name.");
        assert_eq!(body["suggestions"][0]["type"], "effectiveness");
        assert_eq!(body["degraded"], true);
    }

    #[tokio::test]
    async fn test_refine_prompt_provider_failure() {
        let http = MockHttpClient::new()
            .with_response(CANDIDATE_URL, HttpResponse::new(502, "upstream down"));
        let (router, _) = app(http, refine_store().await);
        let (status, body) = post(
            router,
            "/refine-prompt",
            json!({"userId": "u1", "llmId": "gpt", "prompt": "Greet"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_ready_reports_judge_configuration() {
        let state = build_app_state(
            JudgeConfig::default(),
            Arc::new(MockHttpClient::new()),
            Arc::new(InMemoryRecordStore::new()),
        );
        let request = Request::builder().uri("/ready").body(Body::empty()).unwrap();
        let (status, body) = send(create_router_with_state(state), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"][0]["name"], "judge");
    }
}
