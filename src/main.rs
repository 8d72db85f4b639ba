use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ai_checkmate::transport::{ChatTransport, FileEvent, OutboundMessage};
use ai_checkmate::types::{AppError, AppResult};
use ai_checkmate::{Config, IngestionPipeline, PipelineOutcome};

#[derive(Parser)]
#[command(
    name = "ai-checkmate",
    about = "Contract risk analysis pipeline",
    // The greeting owns the "help" name, like the original /help command;
    // usage is still available via --help.
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the ingestion pipeline on a local file and print the findings
    Analyze { path: PathBuf },
    /// Print the greeting shown for /start and /help
    #[command(visible_alias = "help")]
    Start,
}

/// Local-filesystem stand-in for the chat transport: the file identifier is
/// a path on disk and replies go to stdout.
struct LocalTransport;

#[async_trait]
impl ChatTransport for LocalTransport {
    async fn download(&self, file_id: &str, destination: &Path) -> AppResult<()> {
        tokio::fs::copy(file_id, destination)
            .await
            .map_err(|e| AppError::Transport(format!("cannot read {file_id}: {e}")))?;
        Ok(())
    }

    async fn send_message(&self, message: OutboundMessage) -> AppResult<()> {
        println!("{}", message.text);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ai_checkmate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Start => {
            println!("{}", ai_checkmate::messages::GREETING);
        }
        Command::Analyze { path } => {
            let config = Config::from_env()?;
            info!(model = %config.llm.model, "Configuration loaded");

            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            let event = FileEvent::Document {
                file_id: path.display().to_string(),
                filename,
            };

            let pipeline = IngestionPipeline::new(config, Arc::new(LocalTransport));
            if let PipelineOutcome::Failed(reason) = pipeline.handle_event(event).await {
                anyhow::bail!("analysis did not complete: {reason:?}");
            }
        }
    }

    Ok(())
}
