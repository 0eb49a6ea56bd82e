//! CLI argument definitions using clap
//!
//! Commands:
//! - docindex search --config <path> --docs <path> [--query <text>] ...
//! - docindex validate --config <path>

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::query::JoinMode;

/// docindex - multi-field document search over JSON records
#[derive(Parser, Debug)]
#[command(name = "docindex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Index a JSON-lines file and run one search
    Search(SearchArgs),

    /// Check a store configuration and print its capabilities
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./docindex.json")]
        config: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Path to configuration file
    #[arg(long, default_value = "./docindex.json")]
    pub config: PathBuf,

    /// Records to index, one JSON object per line
    #[arg(long)]
    pub docs: PathBuf,

    /// Query text; omit for a tag-only search
    #[arg(long, default_value = "")]
    pub query: String,

    /// Field to search (repeatable)
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// Tag filter (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Join mode across fields and tags
    #[arg(long = "bool", value_enum, default_value_t = JoinArg::Or)]
    pub join: JoinArg,

    /// Maximum results per field or tag
    #[arg(long)]
    pub limit: Option<usize>,

    /// Attach stored records to hits
    #[arg(long)]
    pub enrich: bool,

    /// Return the bare result of one field
    #[arg(long)]
    pub pluck: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinArg {
    And,
    Or,
}

impl From<JoinArg> for JoinMode {
    fn from(arg: JoinArg) -> Self {
        match arg {
            JoinArg::And => JoinMode::And,
            JoinArg::Or => JoinMode::Or,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
