//! CLI module for docindex
//!
//! Provides command-line interface for:
//! - search: Index a JSON-lines file and run one search
//! - validate: Check a store configuration

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, JoinArg, SearchArgs};
pub use commands::{run, run_command, search, validate};
pub use errors::{CliError, CliResult};
pub use io::{read_config, read_records, write_response};
