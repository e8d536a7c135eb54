/*
 * rules/bibliography/names.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Name lists of the bibliography entry.
 */

use cslgen_config::Param;
use cslgen_xml::{Document, NodeQuery};

use crate::Result;
use crate::rule::{RuleContext, StyleRule};
use crate::rules::shared::{NameListProfile, format_name_list};

/// Primary authors.
pub struct Contributors;

impl StyleRule for Contributors {
    fn name(&self) -> &str {
        "contributors"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let contributors = ctx.macro_node("contributors")?;
        let name = doc.select_one(contributors, "group/names/name")?;
        format_name_list(doc, name, ctx.config, NameListProfile::Initialized)?;
        let label = doc.select_one(contributors, "group/names/label")?;
        doc.set_attr(label, "prefix", "");
        Ok(())
    }
}

/// Editors and authors of the containing work, introduced by the
/// container prefix ("In").
pub struct ContainerContributors;

impl StyleRule for ContainerContributors {
    fn name(&self) -> &str {
        "container-contributors"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let group = doc.select_one(ctx.macro_node("container-contributors")?, "choose/if/group")?;
        doc.set_attr(group, "prefix", "");

        let labels = doc.select_all(group, "names/label")?;
        for &label in &labels {
            doc.set_attr(label, "form", "short");
            doc.move_to_end(label)?;
        }

        let title = ctx.bibliography_text(doc, "container-title")?;
        doc.set_attr(title, "prefix", "");
        let contributors = ctx.bibliography_text(doc, "container-contributors")?;
        doc.set_attr(contributors, "suffix", &ctx.text(Param::BookAuthorsSuffix));

        let container_prefix = doc.select_one(
            ctx.macro_node("container-title")?,
            "choose/if/text[@macro='container-prefix']",
        )?;
        doc.set_attr(container_prefix, "prefix", ". ");
        doc.set_attr(container_prefix, "suffix", "");
        doc.set_attr(group, "delimiter", " ");
        doc.move_node(container_prefix, group, 0)?;

        for name in doc.select_all(group, "names/name")? {
            format_name_list(doc, name, ctx.config, NameListProfile::Initialized)?;
        }
        let left = ctx.text(Param::ContributorLabelLeft);
        let right = ctx.text(Param::ContributorLabelRight);
        for label in labels {
            doc.set_attr(label, "prefix", &left);
            doc.set_attr(label, "suffix", &right);
        }
        Ok(())
    }
}

/// Editors, translators and directors of the work itself.
pub struct SecondaryContributors;

impl StyleRule for SecondaryContributors {
    fn name(&self) -> &str {
        "secondary-contributors"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let text = ctx.bibliography_text(doc, "secondary-contributors")?;
        doc.remove_attr(text, "prefix");

        let group = doc.select_one(ctx.macro_node("secondary-contributors")?, "choose/if/group")?;
        for name in doc.select_all(group, "names/name")? {
            format_name_list(doc, name, ctx.config, NameListProfile::Initialized)?;
            doc.move_to_front(name)?;
        }

        let left = ctx.text(Param::SecondaryLabelLeft);
        let right = ctx.text(Param::SecondaryLabelRight);
        for label in doc.select_all(group, "names/label")? {
            doc.set_attr(label, "prefix", &left);
            doc.set_attr(label, "suffix", &right);
            doc.set_attr(label, "form", "short");
        }
        Ok(())
    }
}
