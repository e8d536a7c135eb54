/*
 * check.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Check command implementation
 */

//! Check command implementation.
//!
//! Loads a configuration the way `generate` would and reports what a run
//! would silently ignore: unknown parameter keys and style ids that no
//! metadata row lists.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use cslgen_config::ConfigTable;

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    pub config: PathBuf,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let table = ConfigTable::load(&args.config)
        .with_context(|| format!("Failed to load configuration {}", args.config.display()))?;

    for line in report(&table) {
        println!("{}", line);
    }
    info!(
        rows = table.rows().len(),
        path = %args.config.display(),
        "Configuration loaded"
    );
    Ok(())
}

fn report(table: &ConfigTable) -> Vec<String> {
    let mut lines: Vec<String> = table
        .rows()
        .iter()
        .map(|row| {
            let mode = if row.is_multilingual() { "bilingual" } else { "monolingual" };
            format!("{} ({}): {} [{}]", row.name, row.language, row.ids().join(", "), mode)
        })
        .collect();
    lines.extend(
        table
            .unknown_keys()
            .into_iter()
            .map(|key| format!("unknown parameter: {}", key)),
    );
    lines.extend(
        table
            .orphan_style_ids()
            .into_iter()
            .map(|id| format!("style id without a metadata row: {}", id)),
    );
    lines
}
