use serde::{Deserialize, Serialize};

use super::parse::{null_as_default, parse_structured};

/// Score substituted when the judge answer cannot be parsed
pub const FALLBACK_JUDGE_SCORE: f64 = 70.0;

/// Justification used when the judge answer is unparsable and empty
pub const UNPARSABLE_JUDGE_MESSAGE: &str = "Could not parse judge response.";

/// Judge result: similarity score (0-100) and the reasoning behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeVerdict {
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub justification: String,
    /// Set when the verdict is a placeholder for unparsable judge output
    #[serde(default, skip_deserializing)]
    pub degraded: bool,
}

impl JudgeVerdict {
    pub fn new(score: f64, justification: impl Into<String>) -> Self {
        Self {
            score: clamp_score(score),
            justification: justification.into(),
            degraded: false,
        }
    }

    /// Placeholder verdict carrying the raw judge text
    pub fn fallback(raw: &str) -> Self {
        let justification = if raw.trim().is_empty() {
            UNPARSABLE_JUDGE_MESSAGE.to_string()
        } else {
            raw.to_string()
        };

        Self {
            score: FALLBACK_JUDGE_SCORE,
            justification,
            degraded: true,
        }
    }

    /// Parse judge output, substituting a degraded verdict on failure
    pub fn parse_or_fallback(raw: &str) -> Self {
        match parse_structured::<JudgeVerdict>(raw) {
            Ok(verdict) => Self::new(verdict.score, verdict.justification),
            Err(_) => Self::fallback(raw),
        }
    }
}

/// Qualitative breakdown returned by the detailed judge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
}

/// Judge result in the extended form: score plus strengths, issues and
/// suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedVerdict {
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: VerdictAnalysis,
    #[serde(default, skip_deserializing)]
    pub degraded: bool,
}

impl DetailedVerdict {
    pub fn new(score: f64, output: VerdictAnalysis) -> Self {
        Self {
            score: clamp_score(score),
            output,
            degraded: false,
        }
    }

    /// Placeholder verdict; the raw judge text is reported as the single issue
    pub fn fallback(raw: &str) -> Self {
        let issue = if raw.trim().is_empty() {
            UNPARSABLE_JUDGE_MESSAGE.to_string()
        } else {
            raw.to_string()
        };

        Self {
            score: FALLBACK_JUDGE_SCORE,
            output: VerdictAnalysis {
                strengths: Vec::new(),
                issues: vec![issue],
                suggestions: Vec::new(),
            },
            degraded: true,
        }
    }

    pub fn parse_or_fallback(raw: &str) -> Self {
        match parse_structured::<DetailedVerdict>(raw) {
            Ok(verdict) => Self::new(verdict.score, verdict.output),
            Err(_) => Self::fallback(raw),
        }
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        FALLBACK_JUDGE_SCORE
    } else {
        score.clamp(0.0, 100.0)
    }
}
