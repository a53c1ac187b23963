//! kelime CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::Overrides;

#[derive(Parser)]
#[command(name = "kelime", version, about = "English-Turkish flashcard trainer")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON path (overrides the config file)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Run as a guest: progress stays in local storage
    #[arg(long, global = true)]
    guest: bool,

    /// User id for remote-backed progress (overrides the config file)
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive flashcard session
    Study,

    /// Mark a word as learned
    Learn {
        /// The English word
        word: String,
    },

    /// Remove a word from the learned set
    Unlearn {
        /// The English word
        word: String,
    },

    /// Show progress through the word groups
    Progress,

    /// Show recently learned words
    Recent,

    /// Validate the catalog file
    Validate,

    /// Create a starter config and sample catalog
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kelime_core=info".parse().unwrap())
                .add_directive("kelime_store=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let overrides = Overrides {
        config: cli.config,
        catalog: cli.catalog,
        guest: cli.guest,
        user: cli.user,
    };

    let result = match cli.command {
        Commands::Study => commands::study::execute(&overrides).await,
        Commands::Learn { word } => commands::learn::execute(&overrides, &word).await,
        Commands::Unlearn { word } => commands::unlearn::execute(&overrides, &word).await,
        Commands::Progress => commands::progress::execute(&overrides).await,
        Commands::Recent => commands::recent::execute(&overrides).await,
        Commands::Validate => commands::validate::execute(&overrides),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
