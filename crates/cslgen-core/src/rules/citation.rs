/*
 * rules/citation.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Rules that rewrite the in-text citation.
 */

//! Rules that rewrite the in-text citation.

use cslgen_config::Param;
use cslgen_xml::{Document, NodeQuery};

use crate::Result;
use crate::locale::find_or_create_locale;
use crate::rule::{RuleContext, StyleRule};
use crate::rules::shared::{original_date_as_year, precedes_last};

/// Brackets around the whole citation.
pub struct CitationBrackets;

impl StyleRule for CitationBrackets {
    fn name(&self) -> &str {
        "citation-brackets"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        doc.set_attr(ctx.citation_layout, "prefix", &ctx.text(Param::CitationLeft));
        doc.set_attr(ctx.citation_layout, "suffix", &ctx.text(Param::CitationRight));
        Ok(())
    }
}

/// Delimiter between the author and the date, with and without a date.
pub struct NameDateDelimiter;

impl StyleRule for NameDateDelimiter {
    fn name(&self) -> &str {
        "name-date-delimiter"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let delimiter = ctx.text(Param::CitationNameDateDelimiter);
        for path in ["group/choose/if/group", "group/choose/else/group"] {
            let group = doc.select_one(ctx.citation_layout, path)?;
            doc.set_attr(group, "delimiter", &delimiter);
        }
        Ok(())
    }
}

/// How short-form author names are joined.
pub struct ShortNameJoin;

impl StyleRule for ShortNameJoin {
    fn name(&self) -> &str {
        "short-name-join"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let name = doc.select_one(ctx.macro_node("contributors-short")?, "names/name")?;
        doc.set_attr(name, "delimiter", &ctx.text(Param::CitationNameDelimiter));
        doc.set_attr(name, "and", &ctx.text(Param::CitationAndForm));
        doc.set_attr(
            name,
            "delimiter-precedes-last",
            precedes_last(ctx.flag(Param::CitationDelimiterPrecedesLast)),
        );
        Ok(())
    }
}

/// Whether et-al abbreviation applies to every or only to subsequent cites.
pub struct EtAlMode;

impl StyleRule for EtAlMode {
    fn name(&self) -> &str {
        "et-al-mode"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let citation = ctx.citation;
        let (drop, keep) = if ctx.flag(Param::CitationEtAlSubsequent) {
            (
                ["et-al-min", "et-al-use-first"],
                ["et-al-subsequent-min", "et-al-subsequent-use-first"],
            )
        } else {
            (
                ["et-al-subsequent-min", "et-al-subsequent-use-first"],
                ["et-al-min", "et-al-use-first"],
            )
        };

        let present = drop.iter().any(|attr| doc.attr(citation, attr).is_some());
        let missing = keep.iter().any(|attr| doc.attr(citation, attr).is_none());
        if !present && !missing {
            return Ok(());
        }
        for attr in drop {
            doc.remove_attr(citation, attr);
        }
        doc.set_attr(citation, keep[0], "3");
        doc.set_attr(citation, keep[1], "1");
        Ok(())
    }
}

/// Page label placement around point locators.
pub struct PointLocators;

impl StyleRule for PointLocators {
    fn name(&self) -> &str {
        "point-locators"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let branch = doc.select_one(ctx.macro_node("point-locators")?, "choose/if")?;
        let text = doc.select_one(branch, "text")?;
        doc.move_to_front(text)?;

        let choose = doc.create_element("choose");
        let page = doc.append_child(choose, "if", None, &[("locator", "page"), ("match", "any")])?;
        let form = ctx.text(Param::CitationPageLabelForm);
        if !form.is_empty() {
            doc.append_child(
                page,
                "label",
                None,
                &[("variable", "locator"), ("form", form.as_str())],
            )?;
        }

        let index = if ctx.flag(Param::CitationInvertPageLabel) { 1 } else { 0 };
        doc.move_node(choose, branch, index)?;
        Ok(())
    }
}

/// Original publication year in citations.
pub struct CitationOriginalDate;

impl StyleRule for CitationOriginalDate {
    fn name(&self) -> &str {
        "citation-original-date"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let group = doc.select_one(ctx.macro_node("date-in-text")?, "choose/if/group")?;
        doc.set_attr(group, "delimiter", "");
        original_date_as_year(doc, group, ctx.config)
    }
}

/// Punctuation and page-range options of the pass's locale block.
pub struct LocaleOptions;

impl StyleRule for LocaleOptions {
    fn name(&self) -> &str {
        "locale-options"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let locale = find_or_create_locale(doc, ctx.info, ctx.variant.language())?;

        let options = match doc.select(locale, "style-options")? {
            Some(options) => options,
            None => doc.insert_child(locale, 0, "style-options", None, &[])?,
        };
        let in_quote = ctx.flag(Param::PunctuationInQuote);
        doc.set_attr(options, "punctuation-in-quote", if in_quote { "true" } else { "false" });

        let delimiter = ctx.text(Param::PageRangeDelimiter);
        if delimiter.is_empty() {
            return Ok(());
        }
        let terms = match doc.select(locale, "terms")? {
            Some(terms) => terms,
            None => doc.append_child(locale, "terms", None, &[])?,
        };
        match doc.select(terms, "term[@name='page-range-delimiter']")? {
            Some(term) => doc.set_text(term, &delimiter)?,
            None => {
                doc.append_child(
                    terms,
                    "term",
                    Some(delimiter.as_str()),
                    &[("name", "page-range-delimiter")],
                )?;
            }
        }
        Ok(())
    }
}
