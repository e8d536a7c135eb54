//! Publication rows and the contributor record stamped into every style.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The contributor appended to `info` of every generated style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl Default for Contributor {
    fn default() -> Self {
        Self {
            name: "cslgen".to_string(),
            uri: None,
        }
    }
}

/// One publication: its style ids, display name and language.
///
/// The first id is the primary one. A second id names the Japanese variant
/// and turns the run bilingual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationRow {
    ids: Vec<String>,
    pub name: String,
    pub language: String,
}

impl PublicationRow {
    /// A row with one or two style ids.
    pub fn new(
        ids: Vec<String>,
        name: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self> {
        if !(1..=2).contains(&ids.len()) {
            return Err(Error::StyleIdCount(ids.len()));
        }
        Ok(Self {
            ids,
            name: name.into(),
            language: language.into(),
        })
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn primary_id(&self) -> &str {
        // `new` guarantees at least one id.
        self.ids.first().map(String::as_str).unwrap_or_default()
    }

    pub fn secondary_id(&self) -> Option<&str> {
        self.ids.get(1).map(String::as_str)
    }

    pub fn is_multilingual(&self) -> bool {
        self.ids.len() > 1
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }
}

/// Ids as written in the file: either `"a, b"` or a YAML list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawIds {
    Joined(String),
    List(Vec<String>),
}

impl RawIds {
    pub(crate) fn split(self) -> Vec<String> {
        let ids = match self {
            RawIds::Joined(joined) => joined.split(',').map(str::to_string).collect(),
            RawIds::List(list) => list,
        };
        ids.into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRow {
    pub(crate) ids: RawIds,
    pub(crate) name: String,
    pub(crate) language: String,
}
