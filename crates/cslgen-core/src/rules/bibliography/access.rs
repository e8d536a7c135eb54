/*
 * rules/bibliography/access.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * URL, DOI and access date.
 */

use cslgen_config::Param;
use cslgen_xml::{Document, NodeQuery};

use crate::rule::{RuleContext, StyleRule};
use crate::{Error, Result};

/// Item types whose access date is always rendered.
const WEB_TYPES: &str = "webpage post-weblog";

/// URL or DOI first, then the bracketed access date.
pub struct Access;

impl StyleRule for Access {
    fn name(&self) -> &str {
        "access"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let text = ctx.bibliography_text(doc, "access")?;
        doc.remove_attr(text, "prefix");

        let access = ctx.macro_node("access")?;
        let group = doc.select_one(access, "group")?;
        doc.take_attr(group, "delimiter")?;

        let legal_case = doc.select_one(group, "choose/if[@type='legal_case']")?;
        let link = doc
            .parent(legal_case)
            .ok_or_else(|| Error::Template("access link branch is detached".to_string()))?;
        doc.move_to_front(link)?;

        let issued = doc.select_one(group, "choose/if[@variable='issued']")?;
        let accessed = doc.select_one(issued, "group")?;
        doc.set_attr(accessed, "prefix", &ctx.text(Param::AccessedLeft));
        doc.set_attr(accessed, "suffix", &ctx.text(Param::AccessedRight));
        doc.set_attr(accessed, "delimiter", &ctx.text(Param::AccessedLabelRight));
        if ctx.flag(Param::HideAccessedLabel) {
            let label = doc.select_one(accessed, "text[@term='accessed']")?;
            doc.remove(label);
        }

        let choose = doc
            .parent(issued)
            .ok_or_else(|| Error::Template("accessed branch is detached".to_string()))?;
        let web = doc.insert_child(
            choose,
            0,
            "if",
            None,
            &[("type", WEB_TYPES), ("match", "any")],
        )?;
        let forced = doc.clone_subtree(accessed);
        doc.move_node(forced, web, 0)?;
        doc.set_name(issued, "else-if");
        Ok(())
    }
}
