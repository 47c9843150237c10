use async_trait::async_trait;

use super::{ApiKeyRecord, LlmRecord};
use crate::domain::DomainError;

/// Read access to the model and API key records of the document store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Model record owned by a user
    async fn get_llm(&self, user_id: &str, llm_id: &str) -> Result<Option<LlmRecord>, DomainError>;

    /// Model record shared with all users
    async fn get_public_llm(&self, llm_id: &str) -> Result<Option<LlmRecord>, DomainError>;

    async fn get_api_key(
        &self,
        user_id: &str,
        key_id: &str,
    ) -> Result<Option<ApiKeyRecord>, DomainError>;
}
