/*
 * error.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Error types for style assembly.
 */

//! Error types for cslgen-core

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A rewrite rule found the tree in a shape it does not expect.
    #[error("Rule '{rule}' failed: {source}")]
    Rule {
        rule: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Macro '{name}' not found for the {variant} variant")]
    MissingMacro { name: String, variant: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error(transparent)]
    Xml(#[from] cslgen_xml::Error),

    #[error(transparent)]
    Config(#[from] cslgen_config::Error),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Attribute this error to a rule.
    pub fn in_rule(self, rule: &str) -> Self {
        Error::Rule {
            rule: rule.to_string(),
            source: Box::new(self),
        }
    }

    /// Name of the rule that failed, if any.
    pub fn rule(&self) -> Option<&str> {
        match self {
            Error::Rule { rule, .. } => Some(rule),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
