//! Two-stage prompt test: candidate generation followed by judge scoring

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::prompt::{render, unresolved_placeholders};
use crate::domain::{
    Credential, DomainError, ModelDescriptor, PromptTemplate, VerdictAnalysis,
};
use crate::infrastructure::evaluation::JudgeEvaluator;
use crate::infrastructure::llm::CompletionClient;
use crate::infrastructure::observability::record_pipeline_run;

const MISSING_PARAMETERS: &str = "Missing required parameters";

/// Everything a test run needs. All fields are optional on the wire so that
/// absence is reported as a validation error rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunInput {
    #[serde(default)]
    pub prompt: Option<PromptTemplate>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub golden_answer: Option<String>,
    #[serde(default)]
    pub llm: Option<ModelDescriptor>,
    #[serde(default)]
    pub api_key: Option<Credential>,
}

impl TestRunInput {
    pub fn new(
        prompt: PromptTemplate,
        input: impl Into<String>,
        golden_answer: impl Into<String>,
        llm: ModelDescriptor,
    ) -> Self {
        Self {
            prompt: Some(prompt),
            input: Some(input.into()),
            golden_answer: Some(golden_answer.into()),
            llm: Some(llm),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Credential) -> Self {
        self.api_key = Some(api_key);
        self
    }

    fn validate(&self) -> Result<ValidatedRun<'_>, DomainError> {
        let prompt = self.prompt.as_ref().filter(|p| !p.is_empty());
        let input = self.input.as_deref().filter(|s| !s.is_empty());
        let golden_answer = self.golden_answer.as_deref().filter(|s| !s.is_empty());

        match (prompt, input, golden_answer, self.llm.as_ref()) {
            (Some(prompt), Some(input), Some(golden_answer), Some(llm)) => Ok(ValidatedRun {
                prompt,
                input,
                golden_answer,
                llm,
                api_key: self.api_key.as_ref(),
            }),
            _ => Err(DomainError::validation(MISSING_PARAMETERS)),
        }
    }
}

struct ValidatedRun<'a> {
    prompt: &'a PromptTemplate,
    input: &'a str,
    golden_answer: &'a str,
    llm: &'a ModelDescriptor,
    api_key: Option<&'a Credential>,
}

/// Result of a test run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestRunResult {
    pub output: String,
    pub score: f64,
    pub justification: String,
}

/// Result of a test run scored by the detailed judge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedTestRunResult {
    pub output: String,
    pub score: f64,
    pub output_analysis: VerdictAnalysis,
}

/// Render, generate, judge. Steps run strictly in order and the first
/// failure ends the run.
#[derive(Debug, Clone)]
pub struct TestPipeline {
    client: CompletionClient,
    judge: JudgeEvaluator,
}

impl TestPipeline {
    pub fn new(client: CompletionClient, judge: JudgeEvaluator) -> Self {
        Self { client, judge }
    }

    pub fn judge(&self) -> &JudgeEvaluator {
        &self.judge
    }

    pub async fn run(&self, input: &TestRunInput) -> Result<TestRunResult, DomainError> {
        let result = self.execute(input).await;
        record_outcome(&result);
        result
    }

    pub async fn run_detailed(
        &self,
        input: &TestRunInput,
    ) -> Result<DetailedTestRunResult, DomainError> {
        let result = self.execute_detailed(input).await;
        record_outcome(&result);
        result
    }

    /// Like [`TestPipeline::run`], but abandons the in-flight call and fails
    /// with [`DomainError::Cancelled`] once `cancel` resolves
    pub async fn run_cancellable<F>(
        &self,
        input: &TestRunInput,
        cancel: F,
    ) -> Result<TestRunResult, DomainError>
    where
        F: Future<Output = ()>,
    {
        let result = until_cancelled(self.execute(input), cancel).await;
        record_outcome(&result);
        result
    }

    /// Cancellable variant of [`TestPipeline::run_detailed`]
    pub async fn run_detailed_cancellable<F>(
        &self,
        input: &TestRunInput,
        cancel: F,
    ) -> Result<DetailedTestRunResult, DomainError>
    where
        F: Future<Output = ()>,
    {
        let result = until_cancelled(self.execute_detailed(input), cancel).await;
        record_outcome(&result);
        result
    }

    async fn execute(&self, input: &TestRunInput) -> Result<TestRunResult, DomainError> {
        let run = self.prepare(input)?;
        let output = self.generate(&run).await?;

        let verdict = self
            .judge
            .evaluate(run.golden_answer, &output, run.prompt)
            .await?;

        info!(score = verdict.score, degraded = verdict.degraded, "Test run completed");

        Ok(TestRunResult {
            output,
            score: verdict.score,
            justification: verdict.justification,
        })
    }

    async fn execute_detailed(
        &self,
        input: &TestRunInput,
    ) -> Result<DetailedTestRunResult, DomainError> {
        let run = self.prepare(input)?;
        let output = self.generate(&run).await?;

        let verdict = self
            .judge
            .evaluate_detailed(run.golden_answer, &output, run.prompt)
            .await?;

        info!(score = verdict.score, degraded = verdict.degraded, "Detailed test run completed");

        Ok(DetailedTestRunResult {
            output,
            score: verdict.score,
            output_analysis: verdict.output,
        })
    }

    /// Validation and credential gate; no network access
    fn prepare<'a>(&self, input: &'a TestRunInput) -> Result<ValidatedRun<'a>, DomainError> {
        let run = input.validate()?;

        if let Some(credential) = run.api_key {
            credential.ensure_active()?;
        }
        run.llm.validate()?;

        Ok(run)
    }

    async fn generate(&self, run: &ValidatedRun<'_>) -> Result<String, DomainError> {
        let rendered = render(run.prompt, run.input);

        debug!(
            provider = %run.llm.kind(),
            model = %run.llm.model_id,
            system_prompt = !rendered.system_prompt.is_empty(),
            "Generating candidate output"
        );

        let unresolved = unresolved_placeholders(&rendered.user_message);
        if !unresolved.is_empty() {
            debug!(placeholders = ?unresolved, "Prompt has unresolved placeholders");
        }

        let result = self
            .client
            .complete(
                run.llm,
                run.api_key,
                &rendered.system_prompt,
                &rendered.user_message,
            )
            .await?;

        Ok(result.into_content())
    }
}

async fn until_cancelled<T, W, C>(work: W, cancel: C) -> Result<T, DomainError>
where
    W: Future<Output = Result<T, DomainError>>,
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = cancel => {
            warn!("Test run cancelled");
            Err(DomainError::Cancelled)
        }
        result = work => result,
    }
}

fn record_outcome<T>(result: &Result<T, DomainError>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(DomainError::Validation { .. }) => "validation_error",
        Err(DomainError::Configuration { .. }) => "configuration_error",
        Err(DomainError::Transport { .. }) => "transport_error",
        Err(DomainError::Cancelled) => "cancelled",
        Err(_) => "error",
    };

    record_pipeline_run(outcome);
}
