use serde::{Deserialize, Serialize};

use super::parse::{null_as_default, parse_structured};

/// Score substituted when the refinement answer cannot be parsed
pub const FALLBACK_REFINEMENT_SCORE: f64 = 75.0;

/// Area a refinement suggestion addresses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Clarity,
    Specificity,
    Effectiveness,
    Structure,
    Completeness,
    Scalability,
    #[default]
    #[serde(other)]
    Other,
}

/// Expected improvement from applying a suggestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionImpact {
    High,
    #[default]
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementSuggestion {
    #[serde(
        rename = "type",
        alias = "category",
        default,
        deserialize_with = "null_as_default"
    )]
    pub kind: SuggestionKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub before: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub after: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub impact: SuggestionImpact,
}

/// Critique and rewrite of a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementResult {
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub refined_prompt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<RefinementSuggestion>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(
        default,
        alias = "areas_for_improvement",
        deserialize_with = "null_as_default"
    )]
    pub weaknesses: Vec<String>,
    #[serde(default, skip_deserializing)]
    pub degraded: bool,
}

impl RefinementResult {
    /// Placeholder result echoing the raw model text as the refined prompt
    pub fn fallback(raw: &str) -> Self {
        Self {
            score: FALLBACK_REFINEMENT_SCORE,
            refined_prompt: raw.to_string(),
            suggestions: vec![RefinementSuggestion {
                kind: SuggestionKind::Effectiveness,
                title: "AI-generated refinement".to_string(),
                description: "The AI has provided a refined version of your prompt.".to_string(),
                before: "Original prompt".to_string(),
                after: "Refined prompt".to_string(),
                impact: SuggestionImpact::Medium,
            }],
            strengths: vec!["Original prompt provided good foundation".to_string()],
            weaknesses: vec!["Could benefit from more specific guidelines".to_string()],
            degraded: true,
        }
    }

    pub fn parse_or_fallback(raw: &str) -> Self {
        match parse_structured::<RefinementResult>(raw) {
            Ok(mut result) => {
                result.score = result.score.clamp(0.0, 100.0);
                result
            }
            Err(_) => Self::fallback(raw),
        }
    }
}
