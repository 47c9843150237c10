use std::fmt;

use serde::Deserialize;

use crate::domain::DomainError;

/// API key material supplied per call.
///
/// The key is never printed: `Debug` shows a masked preview only.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    #[serde(default)]
    key_value: String,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Credential {
    pub fn new(key_value: impl Into<String>) -> Self {
        Self {
            key_value: key_value.into(),
            is_active: true,
        }
    }

    pub fn inactive(key_value: impl Into<String>) -> Self {
        Self {
            key_value: key_value.into(),
            is_active: false,
        }
    }

    pub fn key_value(&self) -> &str {
        &self.key_value
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn has_key(&self) -> bool {
        !self.key_value.is_empty()
    }

    /// Fail when the credential is switched off. An inactive credential is a
    /// hard error, never a silent skip.
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_active {
            Ok(())
        } else {
            Err(DomainError::configuration("API key is not active"))
        }
    }

    /// First four characters followed by an ellipsis, safe for logs
    pub fn masked(&self) -> String {
        if self.key_value.is_empty() {
            return "<empty>".to_string();
        }

        let preview: String = self.key_value.chars().take(4).collect();
        format!("{}…", preview)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key_value", &self.masked())
            .field("is_active", &self.is_active)
            .finish()
    }
}
