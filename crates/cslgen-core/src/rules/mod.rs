/*
 * rules/mod.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * The rewrite rules and their pipelines.
 */

//! The rewrite rules and their pipelines.

pub mod bibliography;
pub mod citation;
pub mod shared;

#[cfg(test)]
pub(crate) mod fixture;

use cslgen_xml::Document;

use crate::Result;
use crate::rule::{RuleContext, RulePipeline, StyleRule};

/// Citation rules in execution order.
pub fn citation_pipeline() -> RulePipeline {
    use citation::*;

    let mut pipeline = RulePipeline::new();
    pipeline.extend([
        Box::new(CitationBrackets) as Box<dyn StyleRule>,
        Box::new(NameDateDelimiter),
        Box::new(ShortNameJoin),
        Box::new(EtAlMode),
        Box::new(PointLocators),
        Box::new(CitationOriginalDate),
        Box::new(LocaleOptions),
    ]);
    pipeline
}

/// Bibliography rules in execution order.
pub fn bibliography_pipeline() -> RulePipeline {
    use bibliography::*;

    let mut pipeline = RulePipeline::new();
    pipeline.extend([
        Box::new(LayoutOrder) as Box<dyn StyleRule>,
        Box::new(LayoutDelimiters),
        Box::new(Contributors),
        Box::new(ContainerContributors),
        Box::new(SecondaryContributors),
        Box::new(IssuedDate),
        Box::new(Title),
        Box::new(ContainerTitle),
        Box::new(CollectionTitle),
        Box::new(Edition),
        Box::new(Issue),
        Box::new(Locators),
        Box::new(LocatorsChapter),
        Box::new(LocatorsArticle),
        Box::new(Access),
    ]);
    pipeline
}

/// Both pipelines of one language pass.
pub struct RuleEngine {
    bibliography: RulePipeline,
    citation: RulePipeline,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            bibliography: bibliography_pipeline(),
            citation: citation_pipeline(),
        }
    }

    /// Run one pass: bibliography rules, then citation rules.
    pub fn run(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        tracing::debug!(variant = %ctx.variant, config = ctx.config.id(), "Starting language pass");
        self.bibliography.execute(doc, ctx)?;
        self.citation.execute(doc, ctx)
    }

    /// Rule names in the order one pass runs them.
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names = self.bibliography.rule_names();
        names.extend(self.citation.rule_names());
        names
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
