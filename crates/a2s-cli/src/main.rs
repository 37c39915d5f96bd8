use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "a2s")]
#[command(about = "A2S CLI - Aesthetics to Spaces design flow", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a JSON script of navigation steps and print every outcome
    Replay {
        /// Script file: a JSON array of {"screen", "payload"} steps
        file: PathBuf,
        /// Print events and the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which screens a fresh session can enter
    Screens,
    /// Manage the TOML configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let repository = commands::repository(cli.config)?;

    match cli.command {
        Commands::Replay { file, json } => commands::replay::run(&repository, &file, json).await?,
        Commands::Screens => commands::screens::run(&repository).await?,
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => commands::config::init(&repository, force).await?,
            ConfigAction::Show => commands::config::show(&repository).await?,
            ConfigAction::Path => println!("{}", repository.path().display()),
        },
    }

    Ok(())
}
