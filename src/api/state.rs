//! Application state shared across handlers

use std::sync::Arc;

use crate::infrastructure::services::{RefinementService, TestPipeline};

/// Application state shared across all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub pipeline: Arc<TestPipeline>,
    pub refiner: Arc<RefinementService>,
}

impl AppState {
    pub fn new(pipeline: Arc<TestPipeline>, refiner: Arc<RefinementService>) -> Self {
        Self { pipeline, refiner }
    }

    /// Whether the judge endpoint and key are configured
    pub fn judge_configured(&self) -> bool {
        self.pipeline.judge().config().is_configured()
    }
}
