use serde::{Deserialize, Serialize};

/// Text produced by one completion round trip.
///
/// Empty content means the provider answered but no text was found at the
/// expected path (e.g. a safety-filtered response). It is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    pub content: String,
}

impl CompletionResult {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn into_content(self) -> String {
        self.content
    }
}
