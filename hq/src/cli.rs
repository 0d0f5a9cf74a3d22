//! CLI argument parsing for historyquery

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::query::EntityKind;

#[derive(Parser, Debug)]
#[command(name = "hq")]
#[command(author, version, about = "Layered regex search over recorded conversations", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Corpus directory (overrides the configured path)
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show context metadata and the ordered session list
    Context,

    /// Search one corpus level with a regex
    Search {
        /// Search pattern (regex; use alternation a|b|c for keyword sets)
        #[arg(required = true)]
        pattern: String,

        /// Corpus level to search
        #[arg(short = 't', long = "type", value_enum, default_value = "turn")]
        kind: EntityKind,

        /// Print only the total match count
        #[arg(long)]
        count: bool,

        /// Window start offset into the ordered match list
        #[arg(long, default_value = "0")]
        from: usize,

        /// Maximum matches per page
        #[arg(short, long)]
        limit: Option<usize>,

        /// Turn ids (or unambiguous prefixes) to scope the search to
        #[arg(long, value_delimiter = ',')]
        turns: Vec<String>,

        /// Characters of context on each side of a content match
        #[arg(long)]
        snippet_context: Option<usize>,

        /// Report one match per entity instead of every occurrence
        #[arg(long)]
        per_entity: bool,

        /// Abort the scan after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Resolve an id prefix to a full session or turn id
    Resolve {
        /// Leading substring of an id (8-12 characters is usually enough)
        #[arg(required = true)]
        prefix: String,
    },

    /// Print one turn's full content
    Show {
        /// Turn id or unambiguous prefix
        #[arg(required = true)]
        turn_id: String,
    },

    /// Show corpus statistics
    Stats,
}
