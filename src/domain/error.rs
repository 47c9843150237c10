use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Upstream call failed: connection error or non-success status
    #[error("Transport error: {provider} - {message}")]
    Transport {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Upstream answered with a non-success status; the body is kept for diagnostics.
    pub fn http_status(provider: impl Into<String>, status: u16, body: impl AsRef<str>) -> Self {
        Self::Transport {
            provider: provider.into(),
            status: Some(status),
            message: format!("HTTP {}: {}", status, body.as_ref()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Upstream status code when this is a transport failure with a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Errors the caller can fix by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Configuration { .. } | Self::NotFound { .. }
        )
    }
}
