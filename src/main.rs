use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use fitness_booking::catalog::Catalog;
use fitness_booking::config;
use fitness_booking::models::Config;
use fitness_booking::session::Session;
use fitness_booking::transcript::Transcript;

/// Fitness class booking: book and cancel class slots from an interactive menu.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to a class catalog (TOML). Defaults to Yoga and Zumba.
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive booking menu (default)
    Session {
        /// Transcript file; overrides the config (default "output.txt")
        #[arg(short = 't', long)]
        transcript: Option<PathBuf>,
    },

    /// List the configured classes and exit
    Classes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };

    match cli.command.unwrap_or(Command::Session { transcript: None }) {
        Command::Classes => {
            for (i, class) in cfg.classes.iter().enumerate() {
                println!(
                    "{}. {} ({} places, {} slots)",
                    i + 1,
                    class.name,
                    class.max_capacity,
                    class.num_slots
                );
            }
        }
        Command::Session { transcript } => {
            let timezone = config::timezone(&cfg)?;
            let path = transcript.unwrap_or_else(|| cfg.transcript.clone());
            let out = Transcript::open(&path)?;
            info!("Writing transcript to {}", path.display());

            let catalog = Catalog::from_config(&cfg.classes);
            let stdin = io::stdin();
            let mut session = Session::new(catalog, timezone, stdin.lock(), out);
            session.run()?;
        }
    }

    Ok(())
}
