//! auditfmt
//!
//! Runs the audit formatting pipeline (JSON, then JSONx) over one JSON
//! document and writes the JSONx rendering.

mod config;

use std::io::{Read, Write};
use std::sync::Arc;

use anyhow::Context;
use audit_event::{AuditEvent, AuditFormat, Event};
use audit_pipeline::{JsonFormatter, JsonxFormatter, Pipeline};
use clap::Parser;
use serde_json::value::RawValue;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;

/// Initializes the tracing subscriber, logging to stderr.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "auditfmt={level},audit_pipeline={level},audit_jsonx={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_input(config: &Config) -> anyhow::Result<Vec<u8>> {
    let mut input = Vec::new();
    if config.reads_stdin() {
        std::io::stdin()
            .read_to_end(&mut input)
            .context("failed to read JSON from stdin")?;
    } else {
        input = std::fs::read(&config.input)
            .with_context(|| format!("failed to read {}", config.input.display()))?;
    }
    Ok(input)
}

fn write_output(config: &Config, bytes: &[u8]) -> anyhow::Result<()> {
    if config.writes_stdout() {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
    } else {
        std::fs::write(&config.output, bytes)
            .with_context(|| format!("failed to write {}", config.output.display()))?;
    }
    Ok(())
}

/// Builds the audit event carrying the input document as its data.
///
/// The document is validated but kept as source text, so the formatters see
/// its number literals and repeated keys unchanged.
fn build_event(config: &Config, input: &[u8]) -> anyhow::Result<Event> {
    let data: Box<RawValue> = serde_json::from_slice(input).context("input is not valid JSON")?;

    let mut builder = AuditEvent::builder()
        .subtype(config.audit_subtype()?)
        .format(AuditFormat::Jsonx)
        .raw_data(data);
    if let Some(id) = &config.id {
        builder = builder.id(id.clone());
    }

    Ok(Event::from_audit(builder.build()?))
}

fn formatting_pipeline() -> anyhow::Result<Pipeline> {
    Ok(Pipeline::builder()
        .node("json", Arc::new(JsonFormatter::new()))
        .node("jsonx", Arc::new(JsonxFormatter::new()))
        .build()?)
}

fn run(config: &Config) -> anyhow::Result<()> {
    let pipeline = formatting_pipeline()?;

    let input = read_input(config)?;
    let mut event = build_event(config, &input)?;
    info!(event_id = event.id(), subtype = %event.payload().subtype, "Formatting audit event");

    let event = pipeline
        .process(&CancellationToken::new(), &mut event)
        .context("audit pipeline failed")?;

    let jsonx = event
        .format(AuditFormat::Jsonx.as_str())
        .context("pipeline finished without a JSONx rendering")?;
    write_output(config, jsonx)?;

    info!(event_id = event.id(), bytes = jsonx.len(), "JSONx written");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    run(&config)
}
