//! Placeholder expansion for prompt templates

use once_cell::sync::Lazy;
use regex::Regex;

use super::PromptTemplate;

/// Generic placeholder that always receives the raw test input
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Matches any `{name}` token left in a rendered prompt
static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_\-]*)\}").expect("placeholder pattern is valid")
});

/// A template expanded into the two slots sent to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// Empty unless the template is a system prompt
    pub system_prompt: String,
    pub user_message: String,
}

/// Expand a template for the given test input.
///
/// System-prompt templates are not processed: the input is returned
/// unchanged. Otherwise every `{name}` token of each parameter is replaced by
/// its default value, then every `{input}` token by `input`. Tokens without a
/// matching parameter are left as literal text.
pub fn inject(template: &PromptTemplate, input: &str) -> String {
    if template.is_system_prompt {
        return input.to_string();
    }

    let mut content = template.content.clone();

    for parameter in &template.parameters {
        content = content.replace(&parameter.placeholder(), &parameter.default_value);
    }

    content.replace(INPUT_PLACEHOLDER, input)
}

/// Split a template and input into system prompt and user message
pub fn render(template: &PromptTemplate, input: &str) -> RenderedPrompt {
    if template.is_system_prompt {
        RenderedPrompt {
            system_prompt: template.content.clone(),
            user_message: input.to_string(),
        }
    } else {
        RenderedPrompt {
            system_prompt: String::new(),
            user_message: inject(template, input),
        }
    }
}

/// Names of `{name}` tokens still present in `text`, in order of first use
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for name in PLACEHOLDER_PATTERN
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
    {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    names
}
