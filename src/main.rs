//! Prefix Search - command-line entrypoint.
//!
//! Loads a JSON dataset, indexes it and prints the matches for each term.
//! Also validates and generates configuration files.

use clap::{Parser, Subcommand};
use prefix_search_lib::config::{self, ConfigLoader, LogConfig, PrefixSearchConfig};
use prefix_search_lib::dataset::load_dataset;
use prefix_search_lib::error::{PrefixSearchError, PrefixSearchResult};
use prefix_search_lib::index::PrefixIndex;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(name = "prefix_search", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Index a dataset and print the items matching each term
    Search {
        /// JSON file holding an array of strings or objects
        #[clap(short, long, value_parser)]
        dataset: PathBuf,

        /// Property to index objects on
        #[clap(short, long)]
        field: Option<String>,

        /// Prefixes to look up
        #[clap(required = true)]
        terms: Vec<String>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(log: &LogConfig) -> PrefixSearchResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| {
        PrefixSearchError::Custom(format!("Failed to set global tracing subscriber: {e}"))
    })
}

fn load_config(loader: &ConfigLoader) -> PrefixSearchConfig {
    match loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    }
}

/// Main entry point for the application.
#[tokio::main]
async fn main() -> PrefixSearchResult<()> {
    let args = Args::parse();
    let config_loader = ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX);

    match args.command {
        Command::Search {
            dataset,
            field,
            terms,
        } => {
            let config = load_config(&config_loader);
            init_logging(&config.log)?;

            let items = load_dataset(&dataset)?;
            info!(items = items.len(), path = ?dataset, "indexing dataset");

            let index = PrefixIndex::with_config(items, field.as_deref(), config.index)?;
            index.build()?.wait().await?;

            for term in &terms {
                let results = index.search(term.as_str())?;
                let line = serde_json::json!({ "term": term, "results": results });
                println!("{}", serde_json::to_string(&line)?);
            }

            info!(size = index.size(), "search finished");
            Ok(())
        }
        Command::Validate => {
            let config = load_config(&config_loader);
            init_logging(&config.log)?;
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            init_logging(&LogConfig::default())?;
            info!("Generating default configuration");
            let default_config = PrefixSearchConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| PrefixSearchError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
