//! The configuration table: metadata rows plus the parameter grid.

use crate::metadata::RawRow;
use crate::{ConfigRecord, ConfigValue, Contributor, Error, Param, ParamKind, PublicationRow, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    contributor: Option<Contributor>,
    #[serde(default)]
    metadata: Vec<RawRow>,
    #[serde(default)]
    parameters: IndexMap<String, Option<IndexMap<String, ConfigValue>>>,
}

/// A loaded configuration source.
///
/// Parameters are stored by key, then by style id, mirroring the layout of
/// the file. [`ConfigTable::record`] pivots one style id out of the grid.
#[derive(Debug, Clone, Default)]
pub struct ConfigTable {
    contributor: Contributor,
    rows: Vec<PublicationRow>,
    parameters: IndexMap<String, IndexMap<String, ConfigValue>>,
}

impl ConfigTable {
    /// Read and parse a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loading configuration");
        Self::from_yaml_str(&content)
    }

    /// Parse a configuration table from YAML text.
    ///
    /// Unknown parameter keys and flag cells that are not booleans are
    /// reported as warnings, never as errors.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let raw: RawTable = serde_yaml::from_str(content)?;

        let mut rows = Vec::with_capacity(raw.metadata.len());
        for (index, raw_row) in raw.metadata.into_iter().enumerate() {
            let row = PublicationRow::new(raw_row.ids.split(), raw_row.name, raw_row.language)
                .map_err(|e| Error::InvalidMetadata {
                    row: index + 1,
                    message: e.to_string(),
                })?;
            rows.push(row);
        }

        let parameters: IndexMap<String, IndexMap<String, ConfigValue>> = raw
            .parameters
            .into_iter()
            .map(|(key, cells)| (key, cells.unwrap_or_default()))
            .collect();

        let table = Self {
            contributor: raw.contributor.unwrap_or_default(),
            rows,
            parameters,
        };
        table.warn_about_gaps();
        Ok(table)
    }

    fn warn_about_gaps(&self) {
        for key in self.unknown_keys() {
            tracing::warn!(key, "Unknown parameter key is ignored");
        }
        for (key, cells) in &self.parameters {
            let Some(param) = Param::from_key(key) else {
                continue;
            };
            if param.kind() != ParamKind::Flag {
                continue;
            }
            for (id, value) in cells {
                if !value.is_empty() && value.as_flag().is_none() {
                    tracing::warn!(key = key.as_str(), id = id.as_str(), "Flag cell is not true or false");
                }
            }
        }
    }

    pub fn contributor(&self) -> &Contributor {
        &self.contributor
    }

    pub fn rows(&self) -> &[PublicationRow] {
        &self.rows
    }

    /// The row listing `id`.
    pub fn find_row(&self, id: &str) -> Result<&PublicationRow> {
        self.rows
            .iter()
            .find(|row| row.contains(id))
            .ok_or_else(|| Error::UnknownStyleId(id.to_string()))
    }

    /// Parameter keys that are not part of the schema.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.parameters
            .keys()
            .map(String::as_str)
            .filter(|key| Param::from_key(key).is_none())
            .collect()
    }

    /// Style ids that have parameter cells but appear in no metadata row.
    pub fn orphan_style_ids(&self) -> Vec<&str> {
        let mut orphans: Vec<&str> = Vec::new();
        for cells in self.parameters.values() {
            for id in cells.keys() {
                if !self.rows.iter().any(|row| row.contains(id)) && !orphans.contains(&id.as_str()) {
                    orphans.push(id);
                }
            }
        }
        orphans
    }

    /// Pivot the cells of one style id into a record.
    ///
    /// An id with no cells at all yields an empty record, so every
    /// parameter resolves to its default.
    pub fn record(&self, id: &str) -> ConfigRecord {
        let values: IndexMap<String, ConfigValue> = self
            .parameters
            .iter()
            .filter_map(|(key, cells)| cells.get(id).map(|value| (key.clone(), value.clone())))
            .collect();
        if values.is_empty() {
            tracing::warn!(id, "No parameters configured, using defaults");
        }
        ConfigRecord::new(id, values)
    }
}
