mod config;
mod error;
mod importer;
mod input;
mod models;
mod normalize;
mod store;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::config::{Config, ConfigOverrides};
use crate::error::ImportError;
use crate::importer::ImportOptions;
use crate::models::EntryKind;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Load blacklisted words from a .json or .txt file into MongoDB"
)]
struct Cli {
    /// Word list to import (.json or .txt)
    #[arg(name = "FILE")]
    file: Option<PathBuf>,

    /// Optional path to a configuration TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the MongoDB connection string
    #[arg(long = "mongodb-uri")]
    mongodb_uri: Option<String>,

    /// Entry type stored with each imported keyword
    #[arg(long, value_enum, default_value_t = EntryKind::Word)]
    kind: EntryKind,

    /// Print the words that would be imported without connecting to MongoDB
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    let Some(path) = cli.file else {
        print_usage();
        return Ok(());
    };

    let options = ImportOptions {
        kind: cli.kind,
        dry_run: cli.dry_run,
    };

    if options.dry_run {
        match importer::preview(&path) {
            Ok(words) => {
                for word in &words {
                    println!("[DRY RUN] {word}");
                }
                println!("{} words would be processed.", words.len());
            }
            Err(err) => report_failure(&err),
        }
        return Ok(());
    }

    config::load_env_files();
    let overrides = ConfigOverrides {
        mongodb_uri: cli.mongodb_uri,
    };
    let config = Config::load(cli.config, overrides)?;

    match importer::run(&config, &path, options).await {
        Ok(report) => println!("\n{report}"),
        Err(err) => report_failure(&err),
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| anyhow::anyhow!("Failed to set tracing subscriber: {err}"))
}

fn print_usage() {
    let bin = Cli::command().get_name().to_string();
    println!("Usage: {bin} <path_to_json_or_txt_file>");
    println!("Example: {bin} bad_words.json");
}

fn report_failure(err: &ImportError) {
    tracing::error!("{}", err);
}
