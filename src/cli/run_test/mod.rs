//! Run-test command - executes one prompt test from a JSON request file

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tokio::signal;
use tracing::info;

use crate::infrastructure::services::TestRunInput;

#[derive(Args, Debug)]
pub struct RunTestArgs {
    /// JSON file with `{prompt, input, goldenAnswer, llm, apiKey}`
    #[arg(long, short)]
    pub file: PathBuf,

    /// Use the detailed judge (strengths, issues, suggestions)
    #[arg(long)]
    pub detailed: bool,
}

/// Run the pipeline once; Ctrl+C cancels the in-flight call
pub async fn run(args: RunTestArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let input = read_input(&args.file).await?;
    let state = crate::create_app_state_with_config(&config).await?;

    info!(file = %args.file.display(), detailed = args.detailed, "Running prompt test");

    let cancel = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let output = if args.detailed {
        let result = state.pipeline.run_detailed_cancellable(&input, cancel).await?;
        serde_json::to_string_pretty(&result)?
    } else {
        let result = state.pipeline.run_cancellable(&input, cancel).await?;
        serde_json::to_string_pretty(&result)?
    };

    println!("{}", output);

    Ok(())
}

async fn read_input(path: &Path) -> anyhow::Result<TestRunInput> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("Invalid request in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_read_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"prompt": {{"content": "Describe {{input}}"}}, "input": "fox", "goldenAnswer": "A fox.",
               "llm": {{"provider": "openai", "modelId": "gpt-4", "apiUrl": "https://api.openai.com/v1/chat/completions"}}}}"#
        )
        .unwrap();

        let input = read_input(file.path()).await.unwrap();

        assert_eq!(input.input.as_deref(), Some("fox"));
        assert_eq!(input.prompt.unwrap().content, "Describe {input}");
        assert!(input.api_key.is_none());
    }

    #[tokio::test]
    async fn test_read_input_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = read_input(file.path()).await.unwrap_err();
        assert!(err.to_string().starts_with("Invalid request"));
    }
}
