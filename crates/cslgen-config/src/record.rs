//! Resolved parameters for one style id.

use crate::{ConfigValue, Param};
use indexmap::IndexMap;

/// Parameter cells of one style id.
///
/// Lookups never fail: an absent or empty cell resolves to the default.
#[derive(Debug, Clone, Default)]
pub struct ConfigRecord {
    id: String,
    values: IndexMap<String, ConfigValue>,
}

impl ConfigRecord {
    pub fn new(id: impl Into<String>, values: IndexMap<String, ConfigValue>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }

    /// A record with no cells; every parameter resolves to its default.
    pub fn empty(id: impl Into<String>) -> Self {
        Self::new(id, IndexMap::new())
    }

    /// Set a cell, mostly useful in tests.
    pub fn with(mut self, key: impl Into<String>, value: ConfigValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Untyped lookup: the cell as text, or `default` when absent or empty.
    pub fn get(&self, key: &str, default: &str) -> String {
        match self.values.get(key) {
            Some(value) if !value.is_empty() => value.as_text(),
            _ => default.to_string(),
        }
    }

    /// Text value of a parameter, falling back to its schema default.
    pub fn text(&self, param: Param) -> String {
        self.get(param.key(), param.default_value())
    }

    /// Text value when the cell is set, `None` otherwise.
    pub fn optional(&self, param: Param) -> Option<String> {
        self.is_set(param).then(|| self.raw(param))
    }

    /// Boolean value of a parameter.
    ///
    /// Cells that are not booleans resolve to the default with a warning.
    pub fn flag(&self, param: Param) -> bool {
        let default = param.default_value() == "true";
        match self.values.get(param.key()) {
            Some(value) if !value.is_empty() => value.as_flag().unwrap_or_else(|| {
                tracing::warn!(
                    id = %self.id,
                    key = param.key(),
                    value = %value.as_text(),
                    "Expected true or false, using the default"
                );
                default
            }),
            _ => default,
        }
    }

    /// The cell exactly as configured, empty when absent.
    pub fn raw(&self, param: Param) -> String {
        self.values
            .get(param.key())
            .map(ConfigValue::as_text)
            .unwrap_or_default()
    }

    /// True when the cell is present and not empty.
    pub fn is_set(&self, param: Param) -> bool {
        self.values
            .get(param.key())
            .is_some_and(|value| !value.is_empty())
    }

    /// Keys of the cells this record carries.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
