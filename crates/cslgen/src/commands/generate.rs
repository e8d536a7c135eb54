/*
 * generate.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Generate command implementation
 */

//! Generate command implementation.
//!
//! This module implements `cslgen generate`: load the configuration, then
//! for every publication row assemble the style and write one file per
//! style id of the row.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, Timelike};
use tracing::{debug, info};

use cslgen_config::{ConfigTable, PublicationRow};
use cslgen_core::{AssembleOptions, Assembler, OutputLayout, Template};

/// Arguments for the generate command
#[derive(Debug)]
pub struct GenerateArgs {
    /// Configuration file
    pub config: PathBuf,
    /// Template overriding the embedded one
    pub template: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Restrict the run to the row owning this id
    pub only: Option<String>,
    /// RFC 3339 timestamp for `info/updated`
    pub timestamp: Option<String>,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs) -> Result<()> {
    let table = ConfigTable::load(&args.config)
        .with_context(|| format!("Failed to load configuration {}", args.config.display()))?;

    let template = match &args.template {
        Some(path) => Template::load(path)
            .with_context(|| format!("Failed to read template {}", path.display()))?,
        None => Template::embedded(),
    };
    debug!(stem = template.stem(), "Using template");

    let rows: Vec<&PublicationRow> = match &args.only {
        Some(id) => vec![table.find_row(id)?],
        None => table.rows().iter().collect(),
    };

    let assembler = Assembler::new(
        template,
        AssembleOptions {
            timestamp: resolve_timestamp(args.timestamp.as_deref())?,
            contributor: table.contributor().clone(),
        },
    );
    let output = OutputLayout::new(&args.output_dir, assembler.template().stem());
    let id_base = assembler.template().id_base();

    let mut written = 0;
    for row in rows {
        let mut style = assembler
            .assemble(row, &table)
            .with_context(|| format!("Failed to assemble style {}", row.primary_id()))?;
        written += output
            .write(&mut style, row, &id_base)
            .with_context(|| format!("Failed to write styles for {}", row.name))?
            .len();
    }

    info!(count = written, dir = %args.output_dir.display(), "Generation complete");
    Ok(())
}

/// The given RFC 3339 timestamp, or the local time truncated to seconds.
fn resolve_timestamp(value: Option<&str>) -> Result<DateTime<FixedOffset>> {
    match value {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .with_context(|| format!("Invalid timestamp '{}'", value)),
        None => {
            let now = Local::now();
            Ok(now.with_nanosecond(0).unwrap_or(now).fixed_offset())
        }
    }
}
