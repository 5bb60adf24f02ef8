//! Configuration for the `auditfmt` command.
//!
//! Every option can also be set through the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AUDITFMT_INPUT` | `-` | JSON input file (`-` for stdin) |
//! | `AUDITFMT_OUTPUT` | `-` | JSONx output file (`-` for stdout) |
//! | `AUDITFMT_SUBTYPE` | `request` | Audit subtype recorded on the event |
//! | `AUDITFMT_ID` | random UUID | Audit event ID |
//! | `AUDITFMT_LOG_LEVEL` | `info` | Log level |

use std::path::PathBuf;

use audit_event::AuditSubtype;
use clap::Parser;

/// Reads a JSON document, wraps it in an audit event and writes its JSONx
/// rendering.
#[derive(Debug, Clone, Parser)]
#[command(name = "auditfmt")]
#[command(about = "Render a JSON audit document as JSONx")]
pub struct Config {
    /// JSON input file, or `-` for stdin.
    #[arg(short, long, env = "AUDITFMT_INPUT", default_value = "-")]
    pub input: PathBuf,

    /// JSONx output file, or `-` for stdout.
    #[arg(short, long, env = "AUDITFMT_OUTPUT", default_value = "-")]
    pub output: PathBuf,

    /// Audit subtype (request, response).
    #[arg(long, env = "AUDITFMT_SUBTYPE", default_value = "request")]
    pub subtype: String,

    /// Audit event ID. A random UUID is used when unset.
    #[arg(long, env = "AUDITFMT_ID")]
    pub id: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "AUDITFMT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            output: PathBuf::from("-"),
            subtype: "request".to_string(),
            id: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Returns true when input is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    /// Returns true when output is written to stdout.
    pub fn writes_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }

    /// Parses the configured subtype.
    pub fn audit_subtype(&self) -> Result<AuditSubtype, audit_event::EventError> {
        self.subtype.parse()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = self.audit_subtype() {
            errors.push(e.to_string());
        }

        if matches!(&self.id, Some(id) if id.trim().is_empty()) {
            errors.push("ID cannot be empty".to_string());
        }

        if !["error", "warn", "info", "debug", "trace"].contains(&self.log_level.as_str()) {
            errors.push(format!("Unknown log level: {}", self.log_level));
        }

        if !self.reads_stdin() && self.input == self.output {
            errors.push("Input and output cannot be the same file".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
