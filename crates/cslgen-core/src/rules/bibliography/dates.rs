/*
 * rules/bibliography/dates.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Issued date of the bibliography entry.
 */

use cslgen_config::Param;
use cslgen_xml::{Document, NodeQuery};

use crate::Result;
use crate::rule::{RuleContext, StyleRule};
use crate::rules::shared::original_date_as_year;

/// Brackets around the year, the original year, and "n.d.".
pub struct IssuedDate;

impl StyleRule for IssuedDate {
    fn name(&self) -> &str {
        "date"
    }

    fn apply(&self, doc: &mut Document, ctx: &RuleContext<'_>) -> Result<()> {
        let date = ctx.macro_node("date")?;
        let left = ctx.text(Param::DateLeft);
        let right = ctx.text(Param::DateRight);

        let group = doc.select_one(date, "choose/if/group")?;
        doc.set_attr(group, "prefix", &left);
        doc.set_attr(group, "suffix", &right);
        doc.set_attr(group, "delimiter", &ctx.text(Param::DateDelimiter));
        original_date_as_year(doc, group, ctx.config)?;

        let no_date = doc.select_one(date, "choose/else/text")?;
        doc.set_attr(no_date, "prefix", &left);
        doc.set_attr(no_date, "suffix", &right);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixture::RuleFixture;

    #[test]
    fn test_issued_date() {
        let mut fixture = RuleFixture::with_text(&[("b-date-left", "("), ("b-date-right", ")")]);
        fixture.apply(&IssuedDate).unwrap();

        let group = fixture.in_macro("date", "choose/if/group");
        assert_eq!(fixture.attr(group, "prefix"), Some("("));
        assert_eq!(fixture.attr(group, "suffix"), Some(")"));
        assert_eq!(fixture.attr(group, "delimiter"), Some(""));

        let original = fixture
            .doc()
            .select_one(group, "date[@variable='original-date']")
            .unwrap();
        assert_eq!(fixture.attr(original, "form"), None);
        assert_eq!(fixture.attr(original, "suffix"), Some("="));
        assert_eq!(fixture.child_names(original), vec!["date-part"]);

        let no_date = fixture.in_macro("date", "choose/else/text");
        assert_eq!(fixture.attr(no_date, "prefix"), Some("("));
        assert_eq!(fixture.attr(no_date, "suffix"), Some(")"));
    }
}
