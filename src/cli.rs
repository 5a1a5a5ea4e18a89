//! Command-line interface definitions and parsing
//!
//! Defines the CLI for the asset-browser binary using `clap`.
//!
//! # Commands
//!
//! - **search**: Run a catalog search and print one or more result pages (default)
//! - **categories**: List category names usable with `search --category`
//! - **config**: Show the configuration file path or the effective configuration
//!
//! Running with no subcommand performs the default staff-picks search.
//!
//! # Examples
//!
//! ```no_run
//! use asset_browser::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_args();
//! if let Commands::Search { term, .. } = cli.get_command() {
//!     println!("searching for {term:?}");
//! }
//! ```

use crate::query::{SearchParams, SortBy};
use clap::{Parser, Subcommand};

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "asset-browser")]
#[command(about = "Browse a remote 3D model catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Search the catalog (default)
    #[command(visible_alias = "s")]
    Search {
        /// Free-text search term
        #[arg(value_name = "TERM")]
        term: Option<String>,

        /// Only staff-picked models
        #[arg(short = 's', long = "staff-picked")]
        staff_picked: bool,

        /// Only animated models
        #[arg(short = 'a', long = "animated")]
        animated: bool,

        /// Result ordering
        #[arg(long = "sort", value_enum, default_value_t = SortBy::Relevance)]
        sort: SortBy,

        /// Category display name (see `categories`)
        #[arg(short = 'c', long = "category", value_name = "NAME")]
        category: Option<String>,

        /// Maximum face count; non-numeric values are ignored
        #[arg(long = "max-faces", value_name = "COUNT")]
        max_faces: Option<String>,

        /// Number of pages to print
        #[arg(short = 'p', long = "pages", default_value_t = 1)]
        pages: u32,

        /// Fetch and print animation, rigging and license details
        #[arg(short = 'd', long = "details")]
        details: bool,
    },

    /// List catalog categories
    #[command(visible_alias = "cat")]
    Categories,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration as TOML
    Show,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to the initial search if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Search {
            term: None,
            staff_picked: false,
            animated: false,
            sort: SortBy::Relevance,
            category: None,
            max_faces: None,
            pages: 1,
            details: false,
        })
    }
}

impl Commands {
    /// Search parameters for a `search` command
    ///
    /// Returns `None` for other commands, and for a `search` without any
    /// term or filter, which means "run the initial search".
    #[must_use]
    pub fn get_search_params(&self) -> Option<SearchParams> {
        let Self::Search {
            term,
            staff_picked,
            animated,
            sort,
            category,
            max_faces,
            ..
        } = self
        else {
            return None;
        };

        let params = SearchParams {
            term: term.clone().unwrap_or_default(),
            staff_picked: *staff_picked,
            animated: *animated,
            category: category.clone().unwrap_or_default(),
            sort_by: *sort,
            max_face_count: max_faces.clone().unwrap_or_default(),
        };

        if params == SearchParams::default() {
            None
        } else {
            Some(params)
        }
    }
}
