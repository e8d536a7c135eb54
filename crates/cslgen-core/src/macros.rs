/*
 * macros.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Macro dictionaries.
 */

//! Macro dictionaries.
//!
//! A dictionary maps the logical (unsuffixed) name of a macro to the macro
//! element one language variant edits. The primary dictionary points at the
//! template's own macros; the Japanese dictionary points at their `-ja`
//! clones under the same logical names.

use std::collections::HashMap;

use cslgen_xml::{Document, NodeId};

use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct MacroDictionary {
    suffix: String,
    macros: HashMap<String, NodeId>,
    order: Vec<String>,
}

impl MacroDictionary {
    /// Index the given macro elements by their `name` attribute.
    ///
    /// A duplicate name replaces the earlier entry; the collision is logged
    /// and otherwise left alone.
    pub fn from_macros(doc: &Document, macros: &[NodeId]) -> Result<Self> {
        let mut dictionary = Self::default();
        for &node in macros {
            let name = doc
                .attr(node, "name")
                .ok_or_else(|| cslgen_xml::Error::MissingAttribute {
                    element: doc.describe(node),
                    attribute: "name".to_string(),
                })?;
            dictionary.insert(name, node);
        }
        Ok(dictionary)
    }

    /// Clone every macro of `self` with `suffix` appended to its name.
    ///
    /// Each clone is inserted right after its source. The returned
    /// dictionary keys the clones by their unsuffixed names.
    pub fn clone_with_suffix(&self, doc: &mut Document, suffix: &str) -> Result<Self> {
        let mut clones = Self {
            suffix: suffix.to_string(),
            ..Self::default()
        };
        for name in &self.order {
            let source = self.macros[name];
            let parent = doc
                .parent(source)
                .ok_or_else(|| Error::Template(format!("macro '{}' is detached", name)))?;
            let index = doc.index_in_parent(source).map_or(0, |i| i + 1);
            let clone = doc.clone_subtree(source);
            doc.set_attr(clone, "name", &format!("{}{}", name, suffix));
            doc.move_node(clone, parent, index)?;
            clones.insert(name, clone);
        }
        Ok(clones)
    }

    fn insert(&mut self, name: &str, node: NodeId) {
        if self.macros.insert(name.to_string(), node).is_some() {
            tracing::warn!(name, "Duplicate macro name, the later definition wins");
        } else {
            self.order.push(name.to_string());
        }
    }

    /// The macro for a logical name.
    pub fn get(&self, name: &str) -> Result<NodeId> {
        self.macros
            .get(name)
            .copied()
            .ok_or_else(|| Error::MissingMacro {
                name: format!("{}{}", name, self.suffix),
                variant: if self.suffix.is_empty() {
                    "primary".to_string()
                } else {
                    self.suffix.trim_start_matches('-').to_string()
                },
            })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
