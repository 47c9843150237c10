use std::fmt;

/// Wire shape family of an LLM endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Google,
    /// Unrecognized tag: plain `{prompt}` body with optional bearer auth
    Generic,
}

impl ProviderKind {
    /// Resolve a provider tag. Matching is case-insensitive and never fails;
    /// unknown tags fall back to [`ProviderKind::Generic`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "anthropic" => Self::Anthropic,
            "google" | "gemini" => Self::Google,
            _ => Self::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Generic => "generic",
        }
    }

    /// Header the credential travels in, if this provider defines one
    pub fn credential_header(&self) -> &'static str {
        match self {
            Self::OpenAi | Self::Generic => "Authorization",
            Self::Anthropic => "x-api-key",
            Self::Google => "x-goog-api-key",
        }
    }

    /// Whether the provider honours a response schema in the request body
    pub fn supports_response_schema(&self) -> bool {
        matches!(self, Self::Google)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
