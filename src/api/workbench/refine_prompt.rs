//! Prompt refinement endpoint

use axum::extract::State;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::RefinementResult;
use crate::infrastructure::services::RefinePromptRequest;

/// POST /refine-prompt
///
/// Provider and store failures are reported as a bare "Internal server error".
pub async fn refine_prompt(
    State(state): State<AppState>,
    Json(request): Json<RefinePromptRequest>,
) -> Result<Json<RefinementResult>, ApiError> {
    info!(
        user_id = request.user_id.as_deref().unwrap_or_default(),
        llm_id = request.llm_id.as_deref().unwrap_or_default(),
        "Processing prompt refinement"
    );

    let result = state
        .refiner
        .refine(&request)
        .await
        .map_err(ApiError::redacted)?;

    Ok(Json(result))
}
