//! LocalAgent CLI — the main entry point.
//!
//! Commands:
//! - `chat`     — Interactive chat or single-message mode
//! - `tools`    — List the built-in tools
//! - `onboard`  — Write a default config file
//! - `doctor`   — Check config and model endpoint health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "localagent",
    about = "LocalAgent — a tool-using chat agent for local Ollama models",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the configured model
    #[arg(long, global = true)]
    model: Option<String>,

    /// Override the configured endpoint base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the agent
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List available tools
    Tools,

    /// Write a default configuration file
    Onboard {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Diagnose configuration and endpoint health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so chat output on stdout stays clean
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let overrides = commands::Overrides {
        model: cli.model,
        base_url: cli.base_url,
    };

    match cli.command {
        Commands::Chat { message } => commands::chat::run(&overrides, message).await?,
        Commands::Tools => commands::tools::run(),
        Commands::Onboard { force } => commands::onboard::run(force)?,
        Commands::Doctor => commands::doctor::run(&overrides).await?,
    }

    Ok(())
}
