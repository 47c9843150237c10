//! Output evaluation

mod judge;

pub use judge::{JudgeConfig, JudgeEvaluator};
