//! LLM endpoint domain models

mod descriptor;
mod provider;
mod request;
mod response;

pub use descriptor::ModelDescriptor;
pub use provider::ProviderKind;
pub use request::{CompletionRequest, ResponseSchema};
pub use response::CompletionResult;
