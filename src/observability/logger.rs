//! Structured JSON logger
//!
//! - One log line = one event
//! - Event name first, then severity, then fields sorted by key
//! - Synchronous, no buffering
//! - Lines below the minimum severity are dropped

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

use chrono::{SecondsFormat, Utc};

/// Environment variable holding the minimum severity (`trace` .. `fatal`, `off`)
pub const LOG_ENV_VAR: &str = "DOCINDEX_LOG";

const UNSET: u8 = u8::MAX;
const OFF: u8 = u8::MAX - 1;

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(UNSET);

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-operation detail
    Trace = 0,
    /// Lifecycle of a store
    Info = 1,
    /// Rejected input or configuration
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Parse a severity name, case-insensitive
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Severity::Trace),
            "info" => Some(Severity::Info),
            "warn" | "warning" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            "fatal" => Some(Severity::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Set the minimum severity that is written. `None` silences the logger.
    pub fn set_min_severity(severity: Option<Severity>) {
        let level = severity.map(|s| s as u8).unwrap_or(OFF);
        MIN_SEVERITY.store(level, Ordering::Relaxed);
    }

    /// True if lines of `severity` are written
    pub fn enabled(severity: Severity) -> bool {
        let mut level = MIN_SEVERITY.load(Ordering::Relaxed);

        if level == UNSET {
            level = match std::env::var(LOG_ENV_VAR) {
                Ok(value) if value.trim().eq_ignore_ascii_case("off") => OFF,
                Ok(value) => Severity::parse(&value).unwrap_or(Severity::Warn) as u8,
                Err(_) => Severity::Warn as u8,
            };
            MIN_SEVERITY.store(level, Ordering::Relaxed);
        }

        level != OFF && (severity as u8) >= level
    }

    /// Log an event with the given severity and fields.
    ///
    /// TRACE to WARN go to stdout, ERROR and FATAL to stderr.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let line = Self::format_line(severity, event, fields, Some(&timestamp));

        if severity >= Severity::Error {
            Self::write_line(&line, &mut io::stderr());
        } else {
            Self::write_line(&line, &mut io::stdout());
        }
    }

    fn write_line<W: Write>(line: &str, writer: &mut W) {
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    /// Render one log line.
    ///
    /// Key order: `event`, `severity`, `ts` (when given), then fields sorted
    /// alphabetically.
    pub fn format_line(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        timestamp: Option<&str>,
    ) -> String {
        let mut output = String::with_capacity(256);

        output.push_str("{\"event\":");
        Self::push_json_string(&mut output, event);

        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        if let Some(ts) = timestamp {
            output.push_str(",\"ts\":");
            Self::push_json_string(&mut output, ts);
        }

        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted {
            output.push(',');
            Self::push_json_string(&mut output, key);
            output.push(':');
            Self::push_json_string(&mut output, value);
        }

        output.push_str("}\n");
        output
    }

    fn push_json_string(output: &mut String, s: &str) {
        // serde_json escaping of a str cannot fail
        match serde_json::to_string(s) {
            Ok(quoted) => output.push_str(&quoted),
            Err(_) => output.push_str("\"\""),
        }
    }

    /// Log at TRACE level
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}
