/*
 * rules/bibliography/locators.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Publisher block, volume/issue numbers and page ranges.
 */

use cslgen_config::Param;
use cslgen_xml::{Document, NodeQuery};

use crate::Result;
use crate::rule::{RuleContext, StyleRule};
use crate::rules::shared::place_label;

/// Publisher and place.
pub struct Issue;

impl StyleRule for Issue {
    fn name(&self) -> &str {
        "issue"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let group = doc.select_one(ctx.macro_node("issue")?, "choose/else/group")?;
        doc.take_attr(group, "prefix")?;
        doc.set_attr(group, "delimiter", &ctx.text(Param::IssueDelimiter));
        Ok(())
    }
}

/// Volume and issue of journal articles.
pub struct Locators;

impl StyleRule for Locators {
    fn name(&self) -> &str {
        "locators"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let text = ctx.bibliography_text(doc, "locators")?;
        doc.set_attr(text, "suffix", &ctx.text(Param::LocatorRight));

        let locators = ctx.macro_node("locators")?;
        let form = ctx.text(Param::LocatorLabelForm);
        let invert = ctx.flag(Param::LocatorLabelInvert);

        // Volume, optionally followed by the issue
        let volume = doc.select_one(locators, "choose/if/choose/if")?;
        let volume_text = doc.select_one(volume, "text")?;
        let group = doc.select_one(volume, "group")?;
        if !form.is_empty() {
            let index = if invert { 1 } else { 0 };
            doc.insert_child(
                volume,
                index,
                "label",
                None,
                &[("variable", "volume"), ("form", form.as_str())],
            )?;
        }
        doc.take_attr(volume_text, "prefix")?;
        doc.set_attr(group, "prefix", &ctx.text(Param::IssueLeft));
        doc.set_attr(group, "suffix", &ctx.text(Param::IssueRight));

        let issue = doc.select_one(group, "choose/if")?;
        if !form.is_empty() {
            place_label(doc, issue, &[("variable", "issue"), ("form", form.as_str())], invert)?;
        }

        // Issue without a volume
        let issue_only = doc.select_one(locators, "choose/if/choose/else-if/group")?;
        let term = doc.select_one(issue_only, "text[@term='issue']")?;
        doc.move_to_end(term)?;
        doc.take_attr(issue_only, "prefix")?;
        Ok(())
    }
}

/// Page range of chapters.
pub struct LocatorsChapter;

impl StyleRule for LocatorsChapter {
    fn name(&self) -> &str {
        "locators-chapter"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let group = doc.select_one(ctx.macro_node("locators-chapter")?, "choose/if/choose/if/group")?;
        doc.set_attr(group, "prefix", &ctx.text(Param::ChapterPrefix));

        let form = ctx.text(Param::ChapterLabelForm);
        if ctx.flag(Param::ChapterLabelInvert) {
            doc.append_child(group, "label", None, &[("form", form.as_str()), ("variable", "page")])?;
            return Ok(());
        }

        let separator = ctx.text(Param::ChapterSeparator);
        let mut attrs = vec![("form", form.as_str()), ("variable", "page")];
        if !separator.is_empty() {
            attrs.push(("suffix", separator.as_str()));
        }
        doc.insert_child(group, 0, "label", None, &attrs)?;
        Ok(())
    }
}

/// Page range of journal articles.
pub struct LocatorsArticle;

impl StyleRule for LocatorsArticle {
    fn name(&self) -> &str {
        "locators-article"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let article = doc.select_one(ctx.macro_node("locators-article")?, "choose/else-if/choose")?;
        let prefix = ctx.text(Param::ArticlePrefix);
        let form = ctx.text(Param::LocatorLabelForm);
        let invert = ctx.flag(Param::ArticlePageLabelInvert);

        for branch in ["if", "else"] {
            let parent = doc.select_one(article, branch)?;
            let page = doc.select_one(parent, "text")?;
            doc.set_attr(page, "prefix", &prefix);
            if !form.is_empty() {
                place_label(doc, parent, &[("form", form.as_str()), ("variable", "page")], invert)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixture::RuleFixture;
    use cslgen_config::{ConfigRecord, ConfigValue};

    fn labels(fixture: &RuleFixture, macro_name: &str) -> usize {
        let node = fixture.macro_node(macro_name);
        fixture
            .doc()
            .descendants(node)
            .filter(|&n| fixture.doc().name(n) == "label")
            .count()
    }

    #[test]
    fn test_issue() {
        let mut fixture = RuleFixture::new();
        fixture.apply(&Issue).unwrap();
        let group = fixture.in_macro("issue", "choose/else/group");
        assert_eq!(fixture.attr(group, "prefix"), None);
        assert_eq!(fixture.attr(group, "delimiter"), Some("、"));
    }

    #[test]
    fn test_locators_without_labels() {
        let mut fixture = RuleFixture::new();
        fixture.apply(&Locators).unwrap();
        assert_eq!(labels(&fixture, "locators"), 0);

        let volume = fixture.in_macro("locators", "choose/if/choose/if");
        assert_eq!(fixture.child_names(volume), vec!["text", "group"]);
        let text = fixture.doc().children(volume)[0];
        assert_eq!(fixture.attr(text, "prefix"), None);
        let group = fixture.doc().children(volume)[1];
        assert_eq!(fixture.attr(group, "prefix"), Some(""));
        assert_eq!(fixture.attr(group, "suffix"), Some(""));

        let issue_only = fixture.in_macro("locators", "choose/if/choose/else-if/group");
        assert_eq!(fixture.attr(issue_only, "prefix"), None);
        let last = *fixture.doc().children(issue_only).last().unwrap();
        assert_eq!(fixture.attr(last, "term"), Some("issue"));
        assert_eq!(fixture.attr(fixture.layout_text("locators"), "suffix"), Some(""));
    }

    #[test]
    fn test_locators_with_labels() {
        let mut fixture = RuleFixture::with_text(&[("b-locator-label-form", "short")]);
        fixture.apply(&Locators).unwrap();
        assert_eq!(labels(&fixture, "locators"), 2);

        let volume = fixture.in_macro("locators", "choose/if/choose/if");
        assert_eq!(fixture.child_names(volume), vec!["label", "text", "group"]);
        let issue = fixture.in_macro("locators", "choose/if/choose/if/group/choose/if");
        assert_eq!(fixture.child_names(issue), vec!["label", "text"]);
        let label = fixture.doc().children(issue)[0];
        assert_eq!(fixture.attr(label, "variable"), Some("issue"));
        assert_eq!(fixture.attr(label, "form"), Some("short"));
    }

    #[test]
    fn test_locators_with_inverted_labels() {
        let mut fixture = RuleFixture::with_config(
            ConfigRecord::empty("chicago-en")
                .with("b-locator-label-form", ConfigValue::Text("long".to_string()))
                .with("b-locator-label-invert", ConfigValue::Flag(true)),
        );
        fixture.apply(&Locators).unwrap();

        let volume = fixture.in_macro("locators", "choose/if/choose/if");
        assert_eq!(fixture.child_names(volume), vec!["text", "label", "group"]);
        let issue = fixture.in_macro("locators", "choose/if/choose/if/group/choose/if");
        assert_eq!(fixture.child_names(issue), vec!["text", "label"]);
    }

    #[test]
    fn test_locators_chapter_default() {
        let mut fixture = RuleFixture::new();
        fixture.apply(&LocatorsChapter).unwrap();
        let group = fixture.in_macro("locators-chapter", "choose/if/choose/if/group");
        assert_eq!(fixture.attr(group, "prefix"), Some("、"));
        assert_eq!(fixture.child_names(group), vec!["label", "text", "text"]);
        let label = fixture.doc().children(group)[0];
        assert_eq!(fixture.attr(label, "form"), Some("long"));
        assert_eq!(fixture.attr(label, "suffix"), None);
    }

    #[test]
    fn test_locators_chapter_separator_and_invert() {
        let mut fixture = RuleFixture::with_text(&[("b-locator-chapter-separator", " ")]);
        fixture.apply(&LocatorsChapter).unwrap();
        let group = fixture.in_macro("locators-chapter", "choose/if/choose/if/group");
        let label = fixture.doc().children(group)[0];
        assert_eq!(fixture.attr(label, "suffix"), Some(" "));

        let mut fixture = RuleFixture::with_config(
            ConfigRecord::empty("chicago-en").with("b-locator-chapter-label-invert", ConfigValue::Flag(true)),
        );
        fixture.apply(&LocatorsChapter).unwrap();
        let group = fixture.in_macro("locators-chapter", "choose/if/choose/if/group");
        assert_eq!(fixture.child_names(group), vec!["text", "text", "label"]);
    }

    #[test]
    fn test_locators_article() {
        let mut fixture = RuleFixture::new();
        fixture.apply(&LocatorsArticle).unwrap();
        assert_eq!(labels(&fixture, "locators-article"), 0);
        for path in ["choose/else-if/choose/if/text", "choose/else-if/choose/else/text"] {
            let text = fixture.in_macro("locators-article", path);
            assert_eq!(fixture.attr(text, "prefix"), Some("、"));
        }

        let mut fixture = RuleFixture::with_config(
            ConfigRecord::empty("chicago-en")
                .with("b-locator-label-form", ConfigValue::Text("short".to_string()))
                .with("b-article-page-label-invert", ConfigValue::Flag(true)),
        );
        fixture.apply(&LocatorsArticle).unwrap();
        assert_eq!(labels(&fixture, "locators-article"), 2);
        for path in ["choose/else-if/choose/if", "choose/else-if/choose/else"] {
            let branch = fixture.in_macro("locators-article", path);
            assert_eq!(fixture.child_names(branch), vec!["text", "label"]);
        }
    }
}
