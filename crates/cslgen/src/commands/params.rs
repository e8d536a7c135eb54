/*
 * params.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Params command implementation
 */

//! Params command implementation.

use anyhow::{Context, Result};

use cslgen_config::{PARAMS, ParamSpec};

/// Arguments for the params command
#[derive(Debug)]
pub struct ParamsArgs {
    pub json: bool,
}

/// Execute the params command
pub fn execute(args: ParamsArgs) -> Result<()> {
    let specs: Vec<ParamSpec> = PARAMS.iter().map(|p| p.spec()).collect();
    let rendered = if args.json {
        serde_json::to_string_pretty(&specs).context("Failed to serialize parameter schema")?
    } else {
        render_table(&specs)
    };
    println!("{}", rendered);
    Ok(())
}

/// One line per parameter: key, kind, quoted default, description.
fn render_table(specs: &[ParamSpec]) -> String {
    let width = specs.iter().map(|s| s.key.len()).max().unwrap_or(0);
    specs
        .iter()
        .map(|s| {
            format!(
                "{:width$}  {:4}  {:8}  {}",
                s.key,
                s.kind.to_string(),
                format!("{:?}", s.default),
                s.description,
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
