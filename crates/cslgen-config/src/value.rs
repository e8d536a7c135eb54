//! Parameter cell values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// One cell of the parameter table.
///
/// Cells hold either text or a literal boolean. Numbers are read as text;
/// an explicit `null` or `~` is the same as an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Text(String),
    Flag(bool),
}

impl ConfigValue {
    /// True for empty text. Flags are never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, ConfigValue::Text(text) if text.is_empty())
    }

    /// The cell as text, flags rendered as `true`/`false`.
    pub fn as_text(&self) -> String {
        match self {
            ConfigValue::Text(text) => text.clone(),
            ConfigValue::Flag(flag) => flag.to_string(),
        }
    }

    /// Interpret the cell as a boolean.
    ///
    /// Literal booleans map directly; the texts `true` and `false` (any case)
    /// are accepted as well. Anything else is `None`.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ConfigValue::Flag(flag) => Some(*flag),
            ConfigValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
        }
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(ConfigValue::Text(String::new())),
            Value::Bool(flag) => Ok(ConfigValue::Flag(flag)),
            Value::Number(number) => Ok(ConfigValue::Text(number.to_string())),
            Value::String(text) => Ok(ConfigValue::Text(text)),
            other => Err(serde::de::Error::custom(format!(
                "expected text or boolean, found {:?}",
                other
            ))),
        }
    }
}
