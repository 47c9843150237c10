use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Parse structured model output.
///
/// Tries the whole text first, then the outermost `{...}` span, which covers
/// answers wrapped in markdown fences or prose.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    match serde_json::from_str(text.trim()) {
        Ok(value) => Ok(value),
        Err(err) => match extract_json(text) {
            Some(candidate) => serde_json::from_str(candidate),
            None => Err(err),
        },
    }
}

/// Treat an explicit `null` the same as a missing field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Extract JSON object from a string (handles markdown code blocks)
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}
