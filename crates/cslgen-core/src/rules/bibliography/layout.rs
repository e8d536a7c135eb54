/*
 * rules/bibliography/layout.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Order and punctuation of the bibliography layout.
 */

use cslgen_xml::{Document, NodeQuery};

use crate::rule::{RuleContext, StyleRule};
use crate::{Error, Result};

/// Container contributors before the container title, issue before the
/// chapter pages.
pub struct LayoutOrder;

impl StyleRule for LayoutOrder {
    fn name(&self) -> &str {
        "layout-order"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let contributors = ctx.bibliography_text(doc, "container-contributors")?;
        let previous = doc.previous_sibling(contributors).ok_or_else(|| {
            Error::Template("container contributors open the bibliography layout".to_string())
        })?;
        doc.move_before(contributors, previous)?;

        let issue = ctx.bibliography_text(doc, "issue")?;
        let chapter = ctx.bibliography_text(doc, "locators-chapter")?;
        doc.move_before(issue, chapter)?;
        Ok(())
    }
}

/// Drop the layout's own punctuation and put a period before the access
/// block.
pub struct LayoutDelimiters;

impl StyleRule for LayoutDelimiters {
    fn name(&self) -> &str {
        "layout-delimiters"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let layout = ctx.bibliography_layout;
        let group = doc.select_one(layout, "group")?;
        doc.take_attr(group, "delimiter")?;
        doc.take_attr(layout, "suffix")?;

        let last = doc.children(layout).len().saturating_sub(1);
        doc.insert_child(layout, last, "text", None, &[("value", ". ")])?;
        Ok(())
    }
}
