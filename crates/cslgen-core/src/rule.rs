/*
 * rule.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Style rewrite pipeline infrastructure.
 */

//! Style rewrite pipeline infrastructure.
//!
//! This module provides the core abstractions for style rewrites:
//!
//! - [`StyleRule`] - The trait implemented by all rewrite rules
//! - [`RuleContext`] - What one language pass gives its rules
//! - [`RulePipeline`] - Ordered collection of rules to execute
//!
//! # Architecture
//!
//! Rules run in a flat, ordered sequence (insertion order). Later rules
//! may rely on the structure earlier rules leave behind, so the order of a
//! pipeline is part of its behavior. Each rule can:
//! - Move, insert, clone and remove elements of the style tree
//! - Set or drop attributes
//! - Read parameters of the language pass from the [`ConfigRecord`]
//!
//! # Example
//!
//! ```ignore
//! use cslgen_core::rule::{RuleContext, RulePipeline, StyleRule};
//!
//! struct CitationBrackets;
//!
//! impl StyleRule for CitationBrackets {
//!     fn name(&self) -> &str { "citation-brackets" }
//!
//!     fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
//!         doc.set_attr(ctx.citation_layout, "prefix", "（");
//!         Ok(())
//!     }
//! }
//!
//! let mut pipeline = RulePipeline::new();
//! pipeline.push(Box::new(CitationBrackets));
//! pipeline.execute(&mut doc, &ctx)?;
//! ```

use cslgen_config::{ConfigRecord, Param};
use cslgen_xml::{Document, NodeId, NodeQuery};

use crate::Result;
use crate::locale::LocaleVariant;
use crate::macros::MacroDictionary;

/// Trait for style rewrite rules.
///
/// # Thread Safety
///
/// Rules must be `Send + Sync` so pipelines can be shared between runs for
/// different publications.
pub trait StyleRule: Send + Sync {
    /// Human-readable name for this rule.
    ///
    /// Used for logging and in error messages.
    fn name(&self) -> &str;

    /// Apply the rule to the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if an element or attribute the rule requires is
    /// missing.
    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()>;
}

/// Everything a rule may read during one language pass.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub variant: &'a LocaleVariant,
    pub macros: &'a MacroDictionary,
    pub config: &'a ConfigRecord,
    /// The style's `info` element.
    pub info: NodeId,
    /// The shared `citation` element.
    pub citation: NodeId,
    pub citation_layout: NodeId,
    pub bibliography_layout: NodeId,
}

impl RuleContext<'_> {
    /// A macro of this pass by its logical name.
    pub fn macro_node(&self, name: &str) -> Result<NodeId> {
        self.macros.get(name)
    }

    /// The bibliography layout's `text` that calls macro `name`.
    pub fn bibliography_text(&self, doc: &Document, name: &str) -> Result<NodeId> {
        self.layout_text(doc, self.bibliography_layout, name)
    }

    /// `text[@macro=...]` child of `layout`, with this pass's suffix.
    pub fn layout_text(&self, doc: &Document, layout: NodeId, name: &str) -> Result<NodeId> {
        let query = format!("text[@macro='{}{}']", name, self.variant.suffix());
        Ok(doc.select_one(layout, &query)?)
    }

    pub fn text(&self, param: Param) -> String {
        self.config.text(param)
    }

    pub fn flag(&self, param: Param) -> bool {
        self.config.flag(param)
    }
}

/// A pipeline of style rules to execute in order.
///
/// Rules run in insertion order.
pub struct RulePipeline {
    rules: Vec<Box<dyn StyleRule>>,
}

impl RulePipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule to the pipeline.
    ///
    /// Rules run in the order they are added.
    pub fn push(&mut self, rule: Box<dyn StyleRule>) {
        self.rules.push(rule);
    }

    /// Add multiple rules to the pipeline.
    pub fn extend(&mut self, rules: impl IntoIterator<Item = Box<dyn StyleRule>>) {
        self.rules.extend(rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Execute all rules in insertion order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered, tagged with the rule's name.
    /// Execution stops on error.
    pub fn execute(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        for rule in &self.rules {
            tracing::debug!(rule = rule.name(), variant = %ctx.variant, "Running rule");
            rule.apply(doc, ctx).map_err(|e| e.in_rule(rule.name()))?;
        }

        Ok(())
    }

    /// List the names of all rules in execution order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl Default for RulePipeline {
    fn default() -> Self {
        Self::new()
    }
}
