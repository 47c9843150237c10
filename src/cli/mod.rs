//! CLI module for the prompt workbench
//!
//! - `serve`: HTTP API server
//! - `run-test`: one pipeline run from a JSON request file

pub mod run_test;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Prompt Workbench - multi-provider prompt testing with LLM-judged scoring
#[derive(Parser)]
#[command(name = "prompt-workbench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),

    /// Run a single prompt test and print the result as JSON
    RunTest(run_test::RunTestArgs),
}

/// Load `.env` and layered configuration, then install logging.
/// A configuration error falls back to defaults and is logged once logging is up.
fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => {
            let mut config = AppConfig::default();
            config.apply_judge_fallbacks(|name| std::env::var(name).ok());
            (config, Some(e))
        }
    };

    logging::init_logging(&config.logging);

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["prompt-workbench", "serve", "--port", "9000"]).unwrap();

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_run_test() {
        let cli = Cli::try_parse_from([
            "prompt-workbench",
            "run-test",
            "--file",
            "request.json",
            "--detailed",
        ])
        .unwrap();

        match cli.command {
            Command::RunTest(args) => {
                assert_eq!(args.file.to_str(), Some("request.json"));
                assert!(args.detailed);
            }
            _ => panic!("expected run-test"),
        }
    }

    #[test]
    fn test_run_test_requires_file() {
        assert!(Cli::try_parse_from(["prompt-workbench", "run-test"]).is_err());
    }
}
