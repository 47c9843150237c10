use clap::Parser;
use prompt_workbench::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => cli::serve::run(args).await,
        Command::RunTest(args) => cli::run_test::run(args).await,
    }
}
