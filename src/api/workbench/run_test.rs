//! Prompt test endpoints

use axum::extract::State;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::services::{DetailedTestRunResult, TestRunInput, TestRunResult};

/// POST /run-test
pub async fn run_test(
    State(state): State<AppState>,
    Json(input): Json<TestRunInput>,
) -> Result<Json<TestRunResult>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        provider = input.llm.as_ref().map(|l| l.provider.as_str()).unwrap_or_default(),
        "Processing test run"
    );

    let result = state.pipeline.run(&input).await?;

    info!(request_id = %request_id, score = result.score, "Test run finished");

    Ok(Json(result))
}

/// POST /run-test/detailed
pub async fn run_test_detailed(
    State(state): State<AppState>,
    Json(input): Json<TestRunInput>,
) -> Result<Json<DetailedTestRunResult>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    info!(request_id = %request_id, "Processing detailed test run");

    let result = state.pipeline.run_detailed(&input).await?;

    info!(request_id = %request_id, score = result.score, "Detailed test run finished");

    Ok(Json(result))
}
