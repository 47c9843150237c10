//! Infrastructure services

mod refinement_service;
mod test_pipeline;

pub use refinement_service::{RefinePromptRequest, RefinementService};
pub use test_pipeline::{DetailedTestRunResult, TestPipeline, TestRunInput, TestRunResult};
