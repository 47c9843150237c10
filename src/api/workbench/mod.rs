//! Prompt workbench endpoints

mod refine_prompt;
mod run_test;

use axum::{Router, routing::post};

use super::state::AppState;

pub use refine_prompt::refine_prompt;
pub use run_test::{run_test, run_test_detailed};

/// Create the workbench router
pub fn create_workbench_router() -> Router<AppState> {
    Router::new()
        .route("/run-test", post(run_test))
        .route("/run-test/detailed", post(run_test_detailed))
        .route("/refine-prompt", post(refine_prompt))
}
