//! File and stdout handling for the CLI
//!
//! - Configuration: one JSON object
//! - Records: JSON lines, blank lines ignored
//! - Output: one JSON object per line, UTF-8

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde_json::Value;

use crate::document::DocumentConfig;

use super::errors::{CliError, CliResult};

/// Load a store configuration from a JSON file
pub fn read_config(path: &Path) -> CliResult<DocumentConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

    DocumentConfig::from_json_str(&content)
        .map_err(|e| CliError::config_error(format!("Invalid config: {}", e.message())))
}

/// Read records from a JSON-lines file
pub fn read_records(path: &Path) -> CliResult<Vec<Value>> {
    let file = fs::File::open(path)
        .map_err(|e| CliError::io_error(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut records = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = serde_json::from_str(&line).map_err(|e| {
            CliError::io_error(format!("Invalid JSON on line {}: {}", number + 1, e))
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
