//! Domain layer - Core types and pure logic

pub mod credentials;
pub mod error;
pub mod evaluation;
pub mod llm;
pub mod prompt;
pub mod records;

pub use credentials::Credential;
pub use error::DomainError;
pub use evaluation::{
    DetailedVerdict, JudgeVerdict, RefinementResult, RefinementSuggestion, VerdictAnalysis,
};
pub use llm::{CompletionRequest, CompletionResult, ModelDescriptor, ProviderKind, ResponseSchema};
pub use prompt::{PromptParameter, PromptTemplate, RenderedPrompt};
pub use records::{ApiKeyRecord, LlmRecord, RecordStore};

#[cfg(test)]
pub use records::MockRecordStore;
