use serde::{Deserialize, Serialize};

/// Structured-output schema in the generateContent dialect
/// (`OBJECT`, `STRING`, `NUMBER`, `ARRAY` type names).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSchema {
    /// Schema name, used for logging
    pub name: String,
    pub schema: serde_json::Value,
}

impl ResponseSchema {
    pub fn new(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// Normalized request crossing the provider boundary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Empty when there is no system prompt
    pub system_prompt: String,
    pub user_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<ResponseSchema>,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
            response_schema: None,
        }
    }

    pub fn with_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn has_system_prompt(&self) -> bool {
        !self.system_prompt.is_empty()
    }

    /// System prompt and user message folded into one text block, for
    /// providers without a separate system slot
    pub fn folded(&self) -> String {
        if self.has_system_prompt() {
            format!("{}\n\n{}", self.system_prompt, self.user_message)
        } else {
            self.user_message.clone()
        }
    }
}
