//! LLM judge comparing candidate output against a golden answer

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::evaluation::{detailed_verdict_schema, judge_verdict_schema};
use crate::domain::{
    Credential, DetailedVerdict, DomainError, JudgeVerdict, ModelDescriptor, PromptTemplate,
};
use crate::infrastructure::llm::CompletionClient;
use crate::infrastructure::observability::record_judge_verdict;

const JUDGE_PROVIDER: &str = "google";

const NO_DESCRIPTION: &str = "No description provided";

const JUDGE_INSTRUCTION: &str = "You are an expert AI evaluator specializing in assessing AI-generated responses against golden standards.
You will be provided with:

The original prompt used to generate the AI response
A description of that prompt's intent and purpose
The AI-generated output to be evaluated
The golden answer representing the ideal response

Your evaluation process follows these steps:

Assign a score from 0-100 based on how similar the AI output is to the golden answer
Assess if the user's intention in the prompt description has been met
Provide a comprehensive justification for the score, referencing both similarity and intent fulfillment

Your justification should clearly explain:

Why the score was assigned
What aspects matched or did not match between the AI output and golden answer
Whether the output fulfills the user's intent described in the prompt
Specific examples from both outputs to support your assessment

Be objective, thorough, and constructive in your evaluation.";

const DETAILED_JUDGE_INSTRUCTION: &str = "You are an expert AI evaluator specializing in assessing AI-generated responses against golden standards.
You will be provided with the original prompt, a description of its intent, the AI-generated output and the golden answer.

Assign a score from 0-100 based on how similar the AI output is to the golden answer and whether the intent described for the prompt has been met.

Then break your assessment down into:

strengths: concrete points where the AI output matches the golden answer or fulfils the intent
issues: concrete mismatches, omissions or errors compared to the golden answer
suggestions: specific changes to the prompt that would bring the output closer to the golden answer

Be objective, thorough, and constructive in your evaluation.";

/// Fixed judge endpoint, independent of the candidate model
#[derive(Clone, Deserialize)]
pub struct JudgeConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_judge_model")]
    pub model_id: String,
}

fn default_judge_model() -> String {
    "gemini-2.0-flash".to_string()
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            model_id: default_judge_model(),
        }
    }
}

impl std::fmt::Debug for JudgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudgeConfig")
            .field("api_url", &self.api_url)
            .field(
                "api_key",
                &self.api_key.as_deref().map(|key| Credential::new(key).masked()),
            )
            .field("model_id", &self.model_id)
            .finish()
    }
}

impl JudgeConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: Some(api_url.into()),
            api_key: Some(api_key.into()),
            model_id: default_judge_model(),
        }
    }

    /// Whether both endpoint and key are present
    pub fn is_configured(&self) -> bool {
        self.endpoint().is_ok()
    }

    fn endpoint(&self) -> Result<(ModelDescriptor, Credential), DomainError> {
        let url = self.api_url.as_deref().filter(|u| !u.trim().is_empty());
        let key = self.api_key.as_deref().filter(|k| !k.trim().is_empty());

        match (url, key) {
            (Some(url), Some(key)) => Ok((
                ModelDescriptor::new(JUDGE_PROVIDER, &self.model_id, url),
                Credential::new(key),
            )),
            _ => Err(DomainError::configuration("Judge API configuration missing")),
        }
    }
}

/// Scores candidate outputs with a structured-output judge model
#[derive(Debug, Clone)]
pub struct JudgeEvaluator {
    client: CompletionClient,
    config: JudgeConfig,
}

impl JudgeEvaluator {
    pub fn new(client: CompletionClient, config: JudgeConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    /// Score `candidate_output` against `golden_answer` in the context of the
    /// prompt that produced it.
    ///
    /// Unparsable judge output yields a degraded verdict; missing
    /// configuration and transport failures are errors.
    pub async fn evaluate(
        &self,
        golden_answer: &str,
        candidate_output: &str,
        prompt: &PromptTemplate,
    ) -> Result<JudgeVerdict, DomainError> {
        let (descriptor, credential) = self.config.endpoint()?;
        let message = judge_message(golden_answer, candidate_output, prompt);

        info!(model = %descriptor.model_id, "Requesting judge verdict");

        let result = self
            .client
            .complete_structured(
                &descriptor,
                Some(&credential),
                JUDGE_INSTRUCTION,
                &message,
                judge_verdict_schema(),
            )
            .await?;

        let verdict = JudgeVerdict::parse_or_fallback(&result.content);
        self.observe(verdict.degraded, verdict.score, &result.content);

        Ok(verdict)
    }

    /// Extended variant returning strengths, issues and suggestions
    pub async fn evaluate_detailed(
        &self,
        golden_answer: &str,
        candidate_output: &str,
        prompt: &PromptTemplate,
    ) -> Result<DetailedVerdict, DomainError> {
        let (descriptor, credential) = self.config.endpoint()?;
        let message = judge_message(golden_answer, candidate_output, prompt);

        info!(model = %descriptor.model_id, "Requesting detailed judge verdict");

        let result = self
            .client
            .complete_structured(
                &descriptor,
                Some(&credential),
                DETAILED_JUDGE_INSTRUCTION,
                &message,
                detailed_verdict_schema(),
            )
            .await?;

        let verdict = DetailedVerdict::parse_or_fallback(&result.content);
        self.observe(verdict.degraded, verdict.score, &result.content);

        Ok(verdict)
    }

    fn observe(&self, degraded: bool, score: f64, raw: &str) {
        record_judge_verdict(degraded);

        if degraded {
            warn!(
                score,
                raw_len = raw.len(),
                "Judge response could not be parsed, using fallback verdict"
            );
        } else {
            debug!(score, "Judge verdict parsed");
        }
    }
}

fn judge_message(golden_answer: &str, candidate_output: &str, prompt: &PromptTemplate) -> String {
    let description = prompt
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(NO_DESCRIPTION);

    format!(
        "Compare the following AI output to the golden answer.\n\
         Original Prompt: {}\n\
         Prompt Description: {}\n\
         AI Output: {}\n\
         Golden Answer: {}\n\
         Please provide your evaluation with a score (0-100) and detailed justification.",
        prompt.content, description, candidate_output, golden_answer
    )
}
