//! Prompt templates with `{name}` placeholders
//!
//! Parameters are substituted with their default values; the generic
//! `{input}` placeholder always receives the raw test input.

use serde::{Deserialize, Deserializer, Serialize};

/// A named placeholder and the value it expands to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptParameter {
    pub name: String,
    #[serde(default)]
    pub default_value: String,
}

impl PromptParameter {
    pub fn new(name: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_value: default_value.into(),
        }
    }

    /// Literal token this parameter replaces, e.g. `{genre}`
    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.name)
    }
}

/// Prompt text plus the parameters used to expand it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    #[serde(default)]
    pub content: String,
    /// Intent of the prompt; shown to the judge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_parameters")]
    pub parameters: Vec<PromptParameter>,
    /// When set, `content` is the system message and the test input is sent
    /// verbatim as the user message
    #[serde(default, alias = "is_system_prompt")]
    pub is_system_prompt: bool,
}

impl PromptTemplate {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_system_prompt: true,
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, default_value: impl Into<String>) -> Self {
        self.parameters.push(PromptParameter::new(name, default_value));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Parameters arrive either as an ordered list of `{name, defaultValue}`
/// objects or as a plain `{name: value}` map.
fn deserialize_parameters<'de, D>(deserializer: D) -> Result<Vec<PromptParameter>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Parameters {
        List(Vec<PromptParameter>),
        Map(serde_json::Map<String, serde_json::Value>),
        Null(()),
    }

    Ok(match Parameters::deserialize(deserializer)? {
        Parameters::List(list) => list,
        Parameters::Map(map) => map
            .into_iter()
            .map(|(name, value)| {
                let default_value = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                };
                PromptParameter::new(name, default_value)
            })
            .collect(),
        Parameters::Null(()) => Vec::new(),
    })
}
