use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use linescout::{
    config::SearchConfig, event_log::EventLog, search, workspace::resolve_search_root, SearchError,
};
use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_EVENT_LOG: &str = "logs/search.log";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// String to search for; prompted for interactively when omitted
    pattern: Option<String>,

    /// Directory to search in
    #[arg(short = 'd', long)]
    dir: Option<PathBuf>,

    /// Logical directory name, resolved against the current directory;
    /// prompted for when neither this nor --dir is given
    #[arg(long, conflicts_with = "dir")]
    dir_name: Option<String>,

    /// Number of scan threads
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Path of the append-only event log
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Custom configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let file_config = SearchConfig::load_from(cli.config.as_deref())
        .map_err(|err| SearchError::config_error(err.to_string()))?;

    let mut cli_config = SearchConfig::new(
        cli.pattern.clone().unwrap_or_default(),
        cli.dir.clone().unwrap_or_else(|| PathBuf::from(".")),
    );
    if let Some(threads) = cli.threads {
        cli_config.thread_count = threads;
    }
    cli_config.log_level = cli.log_level.clone();
    cli_config.log_file = cli.log_file.clone();

    let mut config = file_config.merge_with_cli(cli_config);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let event_log = EventLog::new(
        config
            .log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EVENT_LOG)),
    );
    event_log.log("Application started.");
    println!("--- Concurrent File Searcher ---");

    let pattern = if config.pattern.is_empty() {
        prompt("Enter the string to search for: ")?
    } else {
        config.pattern.clone()
    };
    if pattern.is_empty() {
        let message = "The search string cannot be empty.";
        event_log.log(&format!("ERROR: {message} Application shutting down."));
        bail!(message);
    }

    config.pattern = pattern;
    config.root_path = match resolve_root(&cli, &config) {
        Ok(root) => root,
        Err(err) => {
            event_log.log(&format!("ERROR: {err}"));
            return Err(err);
        }
    };

    info!(
        "Searching for '{}' in {}",
        config.pattern,
        config.root_path.display()
    );
    event_log.log(&format!(
        "Starting search for '{}' in '{}'.",
        config.pattern,
        config.root_path.display()
    ));
    println!("\nSearching for '{}'...\n", config.pattern);

    let mut stream = search(&config)?;
    info!("Scanning on {} worker threads", stream.worker_count());
    let mut count: u64 = 0;
    for occurrence in stream.by_ref() {
        count += 1;
        println!(
            "{} -> {}",
            format!("Match {count}:").green().bold(),
            occurrence
        );
    }

    println!("\nSearch finished. Found a total of {count} occurrences.");
    let stats = stream.metrics().snapshot();
    if stats.files_failed > 0 {
        eprintln!(
            "{}",
            format!("Note: {} file(s) could not be read.", stats.files_failed).yellow()
        );
    }
    stream.metrics().log_stats();

    event_log.log(&format!(
        "Search finished. Found a total of {count} occurrences."
    ));
    event_log.log("Application shutting down.");
    Ok(())
}

/// Picks the search root: an explicit path wins, then a logical directory
/// name, then the configured root, and finally an interactive prompt.
fn resolve_root(cli: &Cli, config: &SearchConfig) -> Result<PathBuf> {
    if let Some(dir) = &cli.dir {
        return Ok(dir.clone());
    }

    let base = std::env::current_dir().context("Could not determine the current directory")?;

    if let Some(name) = &cli.dir_name {
        return Ok(resolve_search_root(&base, name)?);
    }

    if config.root_path != PathBuf::from(".") {
        return Ok(config.root_path.clone());
    }

    let name = prompt("Enter the name of the directory to search in (e.g. search_demo_files): ")?;
    if name.is_empty() {
        bail!("The directory name cannot be empty.");
    }
    Ok(resolve_search_root(&base, &name)?)
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
