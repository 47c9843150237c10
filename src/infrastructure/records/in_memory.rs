//! In-memory record store, optionally seeded from a JSON file

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{ApiKeyRecord, DomainError, LlmRecord, RecordStore};

/// Records owned by one user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecords {
    #[serde(default)]
    pub llms: HashMap<String, LlmRecord>,
    #[serde(default)]
    pub api_keys: HashMap<String, ApiKeyRecord>,
}

/// Seed file layout: per-user records keyed by user id, plus public models
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSeed {
    #[serde(default)]
    pub users: HashMap<String, UserRecords>,
    #[serde(default)]
    pub public_llms: HashMap<String, LlmRecord>,
}

#[derive(Debug, Default)]
struct Records {
    users: HashMap<String, UserRecords>,
    public_llms: HashMap<String, LlmRecord>,
}

/// In-memory implementation of RecordStore
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<Records>>,
}

impl InMemoryRecordStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: RecordSeed) -> Self {
        Self {
            records: Arc::new(RwLock::new(Records {
                users: seed.users,
                public_llms: seed.public_llms,
            })),
        }
    }

    /// Load a [`RecordSeed`] from a JSON file
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read seed file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let seed: RecordSeed = serde_json::from_str(&content).map_err(|e| {
            DomainError::configuration(format!(
                "Invalid seed file '{}': {}",
                path.display(),
                e
            ))
        })?;

        info!(
            path = %path.display(),
            users = seed.users.len(),
            public_llms = seed.public_llms.len(),
            "Loaded record seed"
        );

        Ok(Self::from_seed(seed))
    }

    pub async fn insert_llm(&self, user_id: &str, llm_id: &str, record: LlmRecord) {
        let mut records = self.records.write().await;
        records
            .users
            .entry(user_id.to_string())
            .or_default()
            .llms
            .insert(llm_id.to_string(), record);
    }

    pub async fn insert_public_llm(&self, llm_id: &str, record: LlmRecord) {
        let mut records = self.records.write().await;
        records.public_llms.insert(llm_id.to_string(), record);
    }

    pub async fn insert_api_key(&self, user_id: &str, key_id: &str, record: ApiKeyRecord) {
        let mut records = self.records.write().await;
        records
            .users
            .entry(user_id.to_string())
            .or_default()
            .api_keys
            .insert(key_id.to_string(), record);
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get_llm(&self, user_id: &str, llm_id: &str) -> Result<Option<LlmRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .users
            .get(user_id)
            .and_then(|user| user.llms.get(llm_id))
            .cloned())
    }

    async fn get_public_llm(&self, llm_id: &str) -> Result<Option<LlmRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.public_llms.get(llm_id).cloned())
    }

    async fn get_api_key(
        &self,
        user_id: &str,
        key_id: &str,
    ) -> Result<Option<ApiKeyRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .users
            .get(user_id)
            .and_then(|user| user.api_keys.get(key_id))
            .cloned())
    }
}
