/*
 * output.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Writes assembled styles to disk.
 */

//! Writes assembled styles to disk.

use std::fs;
use std::path::{Path, PathBuf};

use cslgen_config::PublicationRow;

use crate::document::StyleDocument;
use crate::{Error, Result};

/// Where generated files go and how they are named.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    dir: PathBuf,
    stem: String,
}

impl OutputLayout {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `{dir}/{stem}-{id}.csl`
    pub fn path_for(&self, style_id: &str) -> PathBuf {
        self.dir.join(format!("{}-{}.csl", self.stem, style_id))
    }

    /// Write one file per id of `row`.
    ///
    /// Every file holds the same document; only `info/id` is re-stamped for
    /// the id the file is named after. The document keeps the primary id
    /// afterwards.
    pub fn write(
        &self,
        style: &mut StyleDocument,
        row: &PublicationRow,
        id_base: &str,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut written = Vec::with_capacity(row.ids().len());
        for id in row.ids() {
            style.set_style_id(id_base, id)?;
            let path = self.path_for(id);
            let xml = style.to_xml()?;
            fs::write(&path, xml).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "Wrote style");
            written.push(path);
        }
        style.set_style_id(id_base, row.primary_id())?;
        Ok(written)
    }
}
