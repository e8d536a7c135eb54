/*
 * rules/bibliography/titles.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Titles, container titles, series and edition.
 */

use cslgen_config::Param;
use cslgen_xml::{Document, NodeId, NodeQuery};

use crate::rule::{RuleContext, StyleRule};
use crate::{Error, Result};

/// Set or drop `font-style` on a title text.
fn apply_title_style(doc: &mut Document, text: NodeId, ctx: &RuleContext<'_>) -> Result<()> {
    let style = ctx.text(Param::BookTitleStyle);
    if style.is_empty() {
        doc.take_attr(text, "font-style")?;
    } else {
        doc.set_attr(text, "font-style", &style);
    }
    Ok(())
}

fn set_brackets(doc: &mut Document, node: NodeId, left: &str, right: &str) {
    doc.set_attr(node, "prefix", left);
    doc.set_attr(node, "suffix", right);
}

/// Quotes on article titles and brackets on book titles.
pub struct Title;

impl StyleRule for Title {
    fn name(&self) -> &str {
        "title"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let title = ctx.macro_node("title")?;
        let article = doc.select_one(title, "choose/else/text")?;
        doc.set_attr(article, "quotes", &ctx.text(Param::TitleQuotes));

        let book = doc.select_one(
            title,
            "choose/else-if[@type='bill book graphic legislation motion_picture song']/text",
        )?;
        apply_title_style(doc, book, ctx)?;
        set_brackets(
            doc,
            book,
            &ctx.text(Param::BookTitleLeft),
            &ctx.text(Param::BookTitleRight),
        );
        Ok(())
    }
}

/// Brackets on the container title, split by item type when books and
/// journals are bracketed differently.
pub struct ContainerTitle;

impl StyleRule for ContainerTitle {
    fn name(&self) -> &str {
        "container-title"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let text = doc.select_one(ctx.macro_node("container-title")?, "choose/else-if/group/text")?;
        apply_title_style(doc, text, ctx)?;

        let book_left = ctx.text(Param::BookTitleLeft);
        let book_right = ctx.text(Param::BookTitleRight);
        if book_right == ctx.text(Param::JournalTitleRight) {
            set_brackets(doc, text, &book_left, &book_right);
            return Ok(());
        }

        let group = doc
            .parent(text)
            .ok_or_else(|| Error::Template("container title text is detached".to_string()))?;
        let choose = doc.insert_child(group, 0, "choose", None, &[])?;
        let book = doc.append_child(choose, "if", None, &[("type", "chapter")])?;
        let journal = doc.append_child(choose, "else-if", None, &[("type", "article-journal")])?;
        let other = doc.append_child(choose, "else", None, &[])?;

        let book_title = doc.clone_subtree(text);
        set_brackets(doc, book_title, &book_left, &book_right);
        doc.move_node(book_title, book, 0)?;

        let journal_title = doc.clone_subtree(text);
        set_brackets(
            doc,
            journal_title,
            &ctx.text(Param::JournalTitleLeft),
            &ctx.text(Param::JournalTitleRight),
        );
        doc.move_node(journal_title, journal, 0)?;

        doc.move_node(text, other, 0)?;
        Ok(())
    }
}

/// Delimiter between series title and number.
pub struct CollectionTitle;

impl StyleRule for CollectionTitle {
    fn name(&self) -> &str {
        "collection-title"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let group = doc.select_one(ctx.macro_node("collection-title")?, "choose/if/choose/if/group")?;
        doc.set_attr(group, "delimiter", &ctx.text(Param::JournalTitleSuffix));
        Ok(())
    }
}

pub struct Edition;

impl StyleRule for Edition {
    fn name(&self) -> &str {
        "edition"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let text = ctx.bibliography_text(doc, "edition")?;
        doc.set_attr(text, "suffix", &ctx.text(Param::EditionRight));
        Ok(())
    }
}
