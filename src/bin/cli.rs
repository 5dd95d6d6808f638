//! hackdash CLI
//!
//! Fetches Devpost hackathon galleries through the staleness-aware cache
//! and prints the result as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hackdash::{
    cache::ProjectCache,
    config::Config,
    devpost::DevpostClient,
    error::Result,
};

/// hackdash - Devpost hackathon gallery fetcher
#[derive(Parser, Debug)]
#[command(name = "hackdash", version, about = "Devpost hackathon gallery fetcher")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "hackdash.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all projects of a hackathon gallery
    Fetch {
        /// Event id, the subdomain of the hackathon on devpost.com
        event_id: String,

        /// Also fetch every project's detail page
        #[arg(long)]
        details: bool,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Fetch { event_id, details } => {
            config.validate()?;

            let client = DevpostClient::new(&config.client).await?;
            let cache = ProjectCache::new(Box::new(client), &config.cache).await?;

            let outcome = cache.fetch_projects(&event_id).await?;
            if let Some(err) = &outcome.refresh_error {
                log::warn!("serving stale data, refresh failed: {err}");
            }
            let mut projects = outcome.projects;

            if details {
                for project in &mut projects {
                    cache.fetch_project(project).await?;
                }
            }

            println!("{}", serde_json::to_string_pretty(&projects)?);
            cache.close().await?;
        }

        Command::Validate => {
            log::info!("Validating configuration at {}...", cli.config.display());

            let config = Config::load(&cli.config)?;
            config.validate()?;

            log::info!("Config OK");
        }
    }

    Ok(())
}
