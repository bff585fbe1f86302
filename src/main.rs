//! commitgen - CLI entry point.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::time::Instant;

use commitgen::config::{Overrides, Settings, parse_duration};
use commitgen::error::PipelineError;
use commitgen::pipeline::{Delivery, Pipeline};
use commitgen::review::Review;
use commitgen::{LocalRepository, OllamaClient};

/// Generate a commit message for the staged changes using a local model.
#[derive(Parser, Debug)]
#[command(name = "commitgen")]
#[command(about = "Generate commit messages for staged changes using a local model")]
#[command(version)]
struct Cli {
    /// Model used to generate the commit message [env: OLLAMA_MODEL]
    #[arg(long)]
    model: Option<String>,

    /// Model used for the review pass; defaults to --model [env: OLLAMA_REVIEW_MODEL]
    #[arg(long)]
    review_model: Option<String>,

    /// Base URL of the model endpoint [env: OLLAMA_ENDPOINT]
    #[arg(long)]
    endpoint: Option<String>,

    /// Maximum diff bytes sent to the model, 0 for no limit [env: COMMITGEN_MAX_BYTES]
    #[arg(long)]
    max_bytes: Option<usize>,

    /// Overall deadline for model calls, e.g. 40s, 500ms, 2m [env: COMMITGEN_TIMEOUT]
    #[arg(long, value_parser = parse_duration)]
    timeout: Option<Duration>,

    /// Review the staged diff before generating the message
    #[arg(long)]
    review: bool,

    /// Print the message without committing
    #[arg(long)]
    no_commit: bool,

    /// Write the message to this file instead of committing (commit-msg hook mode)
    #[arg(long, value_name = "PATH")]
    hook: Option<PathBuf>,
}

impl From<Cli> for Overrides {
    fn from(cli: Cli) -> Self {
        Self {
            model: cli.model,
            review_model: cli.review_model,
            endpoint: cli.endpoint,
            max_bytes: cli.max_bytes,
            timeout: cli.timeout,
            review: cli.review,
            no_commit: cli.no_commit,
            hook_path: cli.hook,
        }
    }
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout carries only the message
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        for cause in e.chain().skip(1) {
            eprintln!("  Caused by: {cause}");
        }

        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(cli.into());

    let repo = LocalRepository::discover(std::path::Path::new("."))
        .context("Not a git repository. Run commitgen from within a git repository.")?;
    let client =
        OllamaClient::new(&settings.endpoint).context("Failed to set up the model client")?;
    let pipeline = Pipeline::new(&repo, &client, &settings);

    // One deadline covers the review and the generation call
    let deadline = Instant::now() + settings.timeout;
    let draft = match pipeline.draft(deadline).await {
        Ok(draft) => draft,
        Err(PipelineError::Generation(e)) if e.is_unreachable() => {
            return Err(anyhow::Error::new(e).context(format!(
                "No answer from the model at {}. Is Ollama running?",
                client.endpoint()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    match &draft.review {
        Some(Ok(review)) => print_review(review),
        Some(Err(e)) => eprintln!("Warning: review failed: {e}"),
        None => {}
    }

    println!("{}", draft.message.format());

    match pipeline.deliver(&draft.message).context("Failed to record the commit message")? {
        Delivery::Hook(path) => eprintln!("Wrote commit message to {}", path.display()),
        Delivery::Committed => eprintln!("Committed on {}", draft.branch),
        Delivery::Printed => {}
    }

    Ok(())
}

fn print_review(review: &Review) {
    if let Some(report) = review.report() {
        println!("{report}\n");
    }
}
