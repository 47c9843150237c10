//! Prompt critique and rewrite through a stored model record

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::evaluation::refinement_schema;
use crate::domain::{Credential, DomainError, LlmRecord, RecordStore, RefinementResult};
use crate::infrastructure::llm::CompletionClient;

const MISSING_FIELDS: &str = "Missing required fields: userId, llmId, and prompt are required";

const REFINER_INSTRUCTION: &str = r#"You are an expert prompt engineer with deep knowledge of AI interaction patterns, cognitive psychology, and effective communication strategies. Your task is to analyze and refine user-provided prompts to maximize their effectiveness, clarity, and reliability.

## Analysis Framework
Evaluate each prompt across these dimensions:
- **Clarity**: How clear and unambiguous are the instructions?
- **Specificity**: Are the requirements and desired outputs well-defined?
- **Structure**: Is the prompt logically organized and easy to follow?
- **Completeness**: Does it include all necessary context and constraints?
- **Effectiveness**: Will it reliably produce the intended outcomes?
- **Scalability**: How well will it work across different scenarios?

## Your Response Requirements
Provide a comprehensive analysis in valid JSON format with the following structure:

{
  "score": number, // 1-100 based on overall prompt quality
  "refinedPrompt": "string", // Your improved version
  "suggestions": [
    {
      "type": "clarity" | "specificity" | "structure" | "completeness" | "effectiveness" | "scalability",
      "title": "string", // Brief, actionable title
      "description": "string", // Detailed explanation of the issue and solution
      "before": "string", // Specific problematic text from original
      "after": "string", // Your improved version
      "impact": "high" | "medium" | "low" // Expected improvement impact
    }
  ],
  "strengths": ["string"], // What the original prompt does well
  "weaknesses": ["string"] // Key weaknesses identified
}

## Scoring Criteria
- 90-100: Exceptional - Clear, specific, well-structured, comprehensive
- 80-89: Strong - Minor improvements needed
- 70-79: Good - Several areas for enhancement
- 60-69: Fair - Significant improvements required
- 50-59: Poor - Major restructuring needed
- Below 50: Very poor - Fundamental issues present

## Guidelines
- Focus on actionable, specific improvements
- Explain the reasoning behind each suggestion
- Maintain the original intent while enhancing effectiveness
- Consider edge cases and potential failure modes
- Prioritize changes by impact potential"#;

const REFINER_REQUEST: &str = "Please analyze and refine the following prompt to enhance its clarity, specificity, structure, completeness, effectiveness, and scalability. Provide a detailed critique along with a refined version of the prompt.";

/// Body of a refinement request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinePromptRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub llm_id: Option<String>,
    #[serde(default)]
    pub api_key_id: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub extra_instructions: Option<String>,
}

impl RefinePromptRequest {
    pub fn new(
        user_id: impl Into<String>,
        llm_id: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            user_id: Some(user_id.into()),
            llm_id: Some(llm_id.into()),
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    pub fn with_api_key_id(mut self, api_key_id: impl Into<String>) -> Self {
        self.api_key_id = Some(api_key_id.into());
        self
    }

    pub fn with_extra_instructions(mut self, extra: impl Into<String>) -> Self {
        self.extra_instructions = Some(extra.into());
        self
    }
}

/// Asks a stored model to critique and rewrite a prompt
#[derive(Clone)]
pub struct RefinementService {
    store: Arc<dyn RecordStore>,
    client: CompletionClient,
}

impl std::fmt::Debug for RefinementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefinementService")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl RefinementService {
    pub fn new(store: Arc<dyn RecordStore>, client: CompletionClient) -> Self {
        Self { store, client }
    }

    pub async fn refine(&self, request: &RefinePromptRequest) -> Result<RefinementResult, DomainError> {
        let (user_id, llm_id, prompt) = required_fields(request)?;

        let llm = self.find_llm(user_id, llm_id).await?;
        let credential = self.find_credential(user_id, request.api_key_id.as_deref()).await?;
        let descriptor = llm.descriptor();

        info!(
            user_id = %user_id,
            llm_id = %llm_id,
            provider = %descriptor.kind(),
            "Refining prompt"
        );

        let system_prompt = refiner_instruction(request.extra_instructions.as_deref());
        let user_message = refiner_message(&llm.description, prompt);

        let result = self
            .client
            .complete_structured(
                &descriptor,
                credential.as_ref(),
                &system_prompt,
                &user_message,
                refinement_schema(),
            )
            .await?;

        let refinement = RefinementResult::parse_or_fallback(&result.content);

        if refinement.degraded {
            warn!(llm_id = %llm_id, "Refinement response could not be parsed, using fallback");
        } else {
            debug!(score = refinement.score, suggestions = refinement.suggestions.len(), "Refinement parsed");
        }

        Ok(refinement)
    }

    /// The user's own record wins over a public one with the same id
    async fn find_llm(&self, user_id: &str, llm_id: &str) -> Result<LlmRecord, DomainError> {
        if let Some(record) = self.store.get_llm(user_id, llm_id).await? {
            return Ok(record);
        }

        self.store
            .get_public_llm(llm_id)
            .await?
            .ok_or_else(|| DomainError::not_found("LLM not found"))
    }

    /// An unknown key id is ignored; an inactive key is an error
    async fn find_credential(
        &self,
        user_id: &str,
        api_key_id: Option<&str>,
    ) -> Result<Option<Credential>, DomainError> {
        let Some(key_id) = api_key_id.filter(|id| !id.is_empty()) else {
            return Ok(None);
        };

        match self.store.get_api_key(user_id, key_id).await? {
            Some(record) => {
                let credential = record.credential();
                credential.ensure_active()?;
                Ok(Some(credential))
            }
            None => {
                debug!(key_id = %key_id, "API key not found, continuing without credential");
                Ok(None)
            }
        }
    }
}

fn required_fields(request: &RefinePromptRequest) -> Result<(&str, &str, &str), DomainError> {
    fn present(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|s| !s.is_empty())
    }

    match (
        present(&request.user_id),
        present(&request.llm_id),
        present(&request.prompt),
    ) {
        (Some(user_id), Some(llm_id), Some(prompt)) => Ok((user_id, llm_id, prompt)),
        _ => Err(DomainError::validation(MISSING_FIELDS)),
    }
}

fn refiner_instruction(extra_instructions: Option<&str>) -> String {
    match extra_instructions.filter(|s| !s.trim().is_empty()) {
        Some(extra) => format!("{}\n\n## Additional Context\n{}", REFINER_INSTRUCTION, extra),
        None => REFINER_INSTRUCTION.to_string(),
    }
}

fn refiner_message(intent: &str, prompt: &str) -> String {
    format!(
        "{}\n{}",
        REFINER_REQUEST,
        json!({"intent": intent, "prompt": prompt})
    )
}
