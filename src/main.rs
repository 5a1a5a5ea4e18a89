//! asset-browser CLI application entry point
//!
//! Drives a [`BrowseEngine`] from the command line: runs a search, waits for
//! the catalog to answer, and prints each page of results.
//!
//! # Usage
//!
//! ```bash
//! # Staff picks, newest first (default)
//! asset-browser
//!
//! # Search with filters, three pages, with per-model details
//! asset-browser search dragon --animated --sort likes --pages 3 --details
//!
//! # Restrict to a category by display name
//! asset-browser categories
//! asset-browser search car -c "Cars & Vehicles"
//!
//! # Quiet mode (only print uids)
//! asset-browser -q search tree
//! ```
//!
//! # Configuration
//!
//! Settings are read from `~/.config/asset-browser/config.toml` (Linux) and
//! `ASSET_BROWSER_*` environment variables. Log verbosity follows `RUST_LOG`.

use asset_browser::{
    BrowseEngine, BrowserConfig, BrowserError, HttpTransport,
    cli::{Cli, Commands, ConfigCommands},
    output,
};
use colored::Colorize;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, BrowserError>;

/// Upper bound on a single wait between refreshes
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Block until `done` holds or `timeout` elapses
///
/// Wakes on every refresh notification and at least every [`POLL_INTERVAL`],
/// since failed requests leave state unchanged without notifying.
fn wait_until(refreshes: &Receiver<()>, timeout: Duration, done: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;

    loop {
        if done() {
            return true;
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return false;
        }

        match refreshes.recv_timeout(remaining.min(POLL_INTERVAL)) {
            Ok(()) | Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return done(),
        }
    }
}

/// Create an engine whose refresh notifications land on a channel
fn connect(config: &BrowserConfig) -> Result<(BrowseEngine, Receiver<()>)> {
    let transport = Arc::new(HttpTransport::new(config)?);
    let (tx, rx) = crossbeam_channel::unbounded();

    let engine = BrowseEngine::new(transport, config).with_refresh(move || {
        let _ = tx.send(());
    });

    Ok((engine, rx))
}

/// Handle the search command
///
/// # Arguments
/// * `config` - Effective configuration
/// * `command` - Parsed `search` command
/// * `quiet` - If true, print only model uids
fn handle_search_command(config: &BrowserConfig, command: &Commands, quiet: bool) -> Result<()> {
    let Commands::Search { pages, details, .. } = command else {
        return Err(BrowserError::InvalidInput("Not a search command".into()));
    };
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let (engine, refreshes) = connect(config)?;

    if let Some(params) = command.get_search_params() {
        if !params.category.is_empty() {
            engine.reload_categories();
            wait_until(&refreshes, timeout, || engine.categories().len() > 1);
        }
        if !quiet {
            println!("Searching for '{}'...", params.term);
        }
        engine.search(&params);
    } else {
        if !quiet {
            println!("Loading staff picks...");
        }
        engine.initial_search();
    }

    for page in 1..=*pages {
        if !wait_until(&refreshes, timeout, || !engine.is_fetching()) {
            return Err(BrowserError::Timeout("search results".into()));
        }

        let results = engine.results();
        if results.is_empty() {
            if !quiet {
                println!("{}", "No results".yellow());
            }
            break;
        }

        if *details {
            for record in &results {
                engine.fetch_detail(record.uid())?;
            }
            let loaded = wait_until(&refreshes, timeout, || {
                results
                    .iter()
                    .filter_map(|r| engine.model(r.uid()))
                    .all(|r| r.detail_fetched)
            });
            if !loaded && !quiet {
                println!("{}", "Some details did not arrive in time".yellow());
            }
        }

        for record in &results {
            let record = engine.model(record.uid()).unwrap_or_else(|| record.clone());
            println!("{}", output::record_line(&record, quiet));
            if *details && !quiet && let Some(line) = output::detail_line(&record) {
                println!("{line}");
            }
        }

        let has_next = engine.has_next_results();
        if !quiet {
            println!(
                "{}",
                output::paging_hint(page, engine.has_previous_results(), has_next)
            );
        }

        if page == *pages || !has_next {
            break;
        }
        engine.request_next_page()?;
    }

    Ok(())
}

/// Handle the categories command
///
/// # Arguments
/// * `config` - Effective configuration
/// * `quiet` - If true, suppress informational output
fn handle_categories_command(config: &BrowserConfig, quiet: bool) -> Result<()> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let (engine, refreshes) = connect(config)?;

    engine.reload_categories();
    if !wait_until(&refreshes, timeout, || engine.categories().len() > 1) {
        return Err(BrowserError::Timeout("the category list".into()));
    }

    if !quiet {
        println!("Categories:");
    }
    for name in engine.categories() {
        if quiet {
            println!("{name}");
        } else {
            println!("  {}", name.cyan());
        }
    }

    Ok(())
}

/// Handle config subcommands
///
/// # Arguments
/// * `config` - Effective configuration
/// * `command` - The config subcommand to execute
fn handle_config_command(config: &BrowserConfig, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            println!("{}", BrowserConfig::config_path()?.display());
        }
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    let config = BrowserConfig::load()?;
    let command = cli.get_command();

    match &command {
        Commands::Search { .. } => handle_search_command(&config, &command, cli.quiet)?,
        Commands::Categories => handle_categories_command(&config, cli.quiet)?,
        Commands::Config { command } => handle_config_command(&config, *command)?,
    }

    Ok(())
}
