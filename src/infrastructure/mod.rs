//! Infrastructure layer - External service implementations

pub mod evaluation;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod records;
pub mod services;
