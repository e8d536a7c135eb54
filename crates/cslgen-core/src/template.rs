/*
 * template.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Canonical style templates.
 */

//! Canonical style templates.
//!
//! The template text is immutable; every assembly parses its own working
//! copy from it.

use std::path::Path;

use crate::{Error, Result};

/// Chicago author-date, the template every generated style starts from.
pub const CHICAGO_AUTHOR_DATE: &str = include_str!("../templates/chicago-author-date.csl");

/// Stem of the embedded template, used for output file names and style ids.
pub const DEFAULT_STEM: &str = "chicago-author-date";

/// Template source text plus the stem naming its derivatives.
#[derive(Debug, Clone)]
pub struct Template {
    stem: String,
    source: String,
}

impl Template {
    pub fn new(stem: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            source: source.into(),
        }
    }

    /// The embedded Chicago author-date template.
    pub fn embedded() -> Self {
        Self::new(DEFAULT_STEM, CHICAGO_AUTHOR_DATE)
    }

    /// Read a template from disk. The stem is the file name without its
    /// extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::Template(format!("no file name in {}", path.display())))?;
        Ok(Self::new(stem, source))
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Base of the `info/id` URL of every style derived from this template.
    pub fn id_base(&self) -> String {
        format!("http://www.zotero.org/styles/{}", self.stem)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::embedded()
    }
}
