//! CLI command implementations
//!
//! Commands write their JSON response to the given writer so they can run
//! against stdout or a buffer.

use std::io::{self, Write};
use std::path::Path;

use serde_json::json;

use crate::document::DocumentStore;
use crate::query::{SearchOptions, SearchResponse};

use super::args::{Command, SearchArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_config, read_records, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command. Responses go
/// to stdout; errors are returned for the caller to report on stderr.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command, &mut io::stdout())
}

/// Run the appropriate command based on CLI args
pub fn run_command<W: Write>(cmd: Command, out: &mut W) -> CliResult<()> {
    match cmd {
        Command::Search(args) => search(&args, out),
        Command::Validate { config } => validate(&config, out),
    }
}

/// Check a configuration and print its fields and capabilities
pub fn validate<W: Write>(config_path: &Path, out: &mut W) -> CliResult<()> {
    let config = read_config(config_path)?;
    config
        .validate()
        .map_err(|e| CliError::config_error(e.message().to_string()))?;

    let fields: Vec<String> = config
        .fields
        .resolve(config.index)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    write_response(
        out,
        json!({
            "fields": fields,
            "capabilities": config.capabilities(),
        }),
    )
}

/// Index every record of the docs file, run one search and print the response
pub fn search<W: Write>(args: &SearchArgs, out: &mut W) -> CliResult<()> {
    let config = read_config(&args.config)?;
    let mut store = DocumentStore::new(config)
        .map_err(|e| CliError::config_error(e.message().to_string()))?;

    for record in read_records(&args.docs)? {
        store
            .add_record(&record)
            .map_err(CliError::search_failed)?;
    }

    let options = search_options(args);
    let response: SearchResponse = store
        .search(&args.query, &options)
        .map_err(CliError::search_failed)?;

    write_response(out, serde_json::to_value(&response)?)
}

fn search_options(args: &SearchArgs) -> SearchOptions {
    let mut options = SearchOptions::new().with_join(args.join.into());

    if !args.fields.is_empty() {
        options = options.with_fields(args.fields.iter().cloned());
    }
    if !args.tags.is_empty() {
        options = options.with_tags(args.tags.iter().cloned());
    }
    if let Some(limit) = args.limit {
        options = options.with_limit(limit);
    }
    if let Some(pluck) = &args.pluck {
        options = options.with_pluck(pluck.clone());
    }
    if args.enrich {
        options = options.with_enrich();
    }

    options
}
