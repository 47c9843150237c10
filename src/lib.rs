//! Prompt Workbench
//!
//! Backend for testing prompts against multiple LLM providers:
//! - One request/response shape per vendor (OpenAI, Anthropic, Gemini, generic)
//! - Candidate generation scored by a fixed LLM judge against a golden answer
//! - Prompt refinement through stored model records

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::RecordStore;
use infrastructure::{
    evaluation::{JudgeConfig, JudgeEvaluator},
    llm::{CompletionClient, HttpClient, HttpClientTrait},
    records::InMemoryRecordStore,
    services::{RefinementService, TestPipeline},
};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let http: Arc<dyn HttpClientTrait> = match config.http.timeout_secs {
        Some(secs) => {
            info!("HTTP client timeout: {}s", secs);
            Arc::new(HttpClient::with_timeout(Duration::from_secs(secs))?)
        }
        None => Arc::new(HttpClient::new()),
    };

    let store: Arc<dyn RecordStore> = match &config.store.seed_file {
        Some(path) => Arc::new(InMemoryRecordStore::from_seed_file(path).await?),
        None => {
            info!("No record seed file configured, starting with an empty store");
            Arc::new(InMemoryRecordStore::new())
        }
    };

    Ok(build_app_state(config.judge.clone(), http, store))
}

/// Wire services over the given HTTP client and record store
pub fn build_app_state(
    judge: JudgeConfig,
    http: Arc<dyn HttpClientTrait>,
    store: Arc<dyn RecordStore>,
) -> AppState {
    let client = CompletionClient::new(http);
    let evaluator = JudgeEvaluator::new(client.clone(), judge);
    let pipeline = TestPipeline::new(client.clone(), evaluator);
    let refiner = RefinementService::new(store, client);

    AppState::new(Arc::new(pipeline), Arc::new(refiner))
}
