//! Provider response extraction

use crate::domain::ProviderKind;

/// Pull the generated text out of a provider response body.
///
/// Never fails: a missing path, a non-string value or a malformed body all
/// yield an empty string.
pub fn extract_content(kind: ProviderKind, body: &serde_json::Value) -> String {
    let text = match kind {
        ProviderKind::OpenAi => body.pointer("/choices/0/message/content"),
        ProviderKind::Anthropic => body.pointer("/content/0/text"),
        ProviderKind::Google => body.pointer("/candidates/0/content/parts/0/text"),
        ProviderKind::Generic => ["content", "text", "response"]
            .iter()
            .filter_map(|key| body.get(key))
            .find(|value| value.as_str().is_some_and(|s| !s.is_empty())),
    };

    text.and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string()
}
