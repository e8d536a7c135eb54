/*
 * rules/shared.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Operations shared by citation and bibliography rules.
 */

//! Operations shared by citation and bibliography rules.

use cslgen_config::{ConfigRecord, Param};
use cslgen_xml::{Document, NodeId, NodeQuery};

use crate::Result;

/// Make the `original-date` element under `parent` render an explicit year.
///
/// Sets prefix and suffix from the configuration, drops the `form` and
/// `date-parts` shorthand (both must be present) and appends a
/// `date-part name="year"`.
pub fn original_date_as_year(doc: &mut Document, parent: NodeId, config: &ConfigRecord) -> Result<()> {
    let date = doc.select_one(parent, "date[@variable='original-date']")?;
    doc.set_attr(date, "prefix", &config.text(Param::OriginalDateLeft));
    doc.set_attr(date, "suffix", &config.text(Param::OriginalDateRight));
    doc.take_attr(date, "form")?;
    doc.take_attr(date, "date-parts")?;
    doc.append_child(date, "date-part", None, &[("name", "year")])?;
    Ok(())
}

/// Which optional name attributes a name list receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameListProfile {
    /// Delimiters only.
    Plain,
    /// Delimiters plus initialization, sort order and name-part split.
    Initialized,
}

/// Apply the configured name-list format to a `name` element.
pub fn format_name_list(
    doc: &mut Document,
    name: NodeId,
    config: &ConfigRecord,
    profile: NameListProfile,
) -> Result<()> {
    doc.set_attr(name, "and", &config.text(Param::AndForm));
    doc.set_attr(name, "delimiter", &config.text(Param::NameDelimiter));
    doc.set_attr(name, "sort-separator", &config.text(Param::NameSortSeparator));
    doc.set_attr(
        name,
        "delimiter-precedes-last",
        precedes_last(config.flag(Param::DelimiterPrecedesLast)),
    );
    if profile == NameListProfile::Plain {
        return Ok(());
    }

    doc.set_attr(name, "initialize-with", &config.text(Param::NameInitializeWith));
    if let Some(initialize) = config.optional(Param::NameInitialize) {
        doc.set_attr(name, "initialize", &initialize);
    }
    if let Some(order) = config.optional(Param::NameAsSortOrder) {
        doc.set_attr(name, "name-as-sort-order", &order);
    }
    if let Some(delimiter) = config.optional(Param::NameSplitDelimiter) {
        doc.split_name(name, &delimiter)?;
    }
    Ok(())
}

/// `delimiter-precedes-last` value for a flag.
pub fn precedes_last(flag: bool) -> &'static str {
    if flag { "always" } else { "never" }
}

/// Insert a `label` as the first child of `parent`, or append it when
/// `after` is set.
pub fn place_label(
    doc: &mut Document,
    parent: NodeId,
    attrs: &[(&str, &str)],
    after: bool,
) -> Result<NodeId> {
    let label = if after {
        doc.append_child(parent, "label", None, attrs)?
    } else {
        doc.insert_child(parent, 0, "label", None, attrs)?
    };
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cslgen_config::ConfigValue;
    use cslgen_xml::parse;

    fn text(value: &str) -> ConfigValue {
        ConfigValue::Text(value.to_string())
    }

    #[test]
    fn test_original_date_as_year() {
        let mut doc = parse(
            r#"<style xmlns="http://purl.org/net/xbiblio/csl"><group><date variable="original-date" form="text" date-parts="year" prefix="(" suffix=")"/></group></style>"#,
        )
        .unwrap();
        let group = doc.select_one(doc.root(), "group").unwrap();
        let config = ConfigRecord::empty("x").with("c-original-date-left", text("["));
        original_date_as_year(&mut doc, group, &config).unwrap();

        let date = doc.select_one(group, "date").unwrap();
        assert_eq!(doc.attr(date, "prefix"), Some("["));
        assert_eq!(doc.attr(date, "suffix"), Some("="));
        assert_eq!(doc.attr(date, "form"), None);
        assert_eq!(doc.attr(date, "date-parts"), None);
        let parts = doc.select_all(date, "date-part").unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(doc.attr(parts[0], "name"), Some("year"));
    }

    #[test]
    fn test_original_date_requires_shorthand() {
        let mut doc = parse(
            r#"<style xmlns="http://purl.org/net/xbiblio/csl"><group><date variable="original-date" form="text"/></group></style>"#,
        )
        .unwrap();
        let group = doc.select_one(doc.root(), "group").unwrap();
        let err = original_date_as_year(&mut doc, group, &ConfigRecord::empty("x")).unwrap_err();
        assert!(err.to_string().contains("date-parts"), "Got: {}", err);
    }

    #[test]
    fn test_name_list_profiles() {
        let source = r#"<style xmlns="http://purl.org/net/xbiblio/csl"><name and="text" delimiter=", "/></style>"#;
        let config = ConfigRecord::empty("x")
            .with("b-delimiter-precedes-last", ConfigValue::Flag(true))
            .with("b-name-as-sort-order", text("all"))
            .with("b-name-split-delimiter", text(" "));

        let mut doc = parse(source).unwrap();
        let name = doc.select_one(doc.root(), "name").unwrap();
        format_name_list(&mut doc, name, &config, NameListProfile::Plain).unwrap();
        assert_eq!(doc.attr(name, "and"), Some(""));
        assert_eq!(doc.attr(name, "delimiter"), Some("・"));
        assert_eq!(doc.attr(name, "sort-separator"), Some(","));
        assert_eq!(doc.attr(name, "delimiter-precedes-last"), Some("always"));
        assert_eq!(doc.attr(name, "initialize-with"), None);
        assert!(doc.children(name).is_empty());

        let mut doc = parse(source).unwrap();
        let name = doc.select_one(doc.root(), "name").unwrap();
        format_name_list(&mut doc, name, &config, NameListProfile::Initialized).unwrap();
        assert_eq!(doc.attr(name, "initialize-with"), Some(""));
        assert_eq!(doc.attr(name, "initialize"), None);
        assert_eq!(doc.attr(name, "name-as-sort-order"), Some("all"));
        assert_eq!(doc.select_all(name, "name-part").unwrap().len(), 2);
    }

    #[test]
    fn test_place_label() {
        let mut doc = parse(
            r#"<style xmlns="http://purl.org/net/xbiblio/csl"><group><text variable="page"/></group></style>"#,
        )
        .unwrap();
        let group = doc.select_one(doc.root(), "group").unwrap();
        let first = place_label(&mut doc, group, &[("variable", "page")], false).unwrap();
        let last = place_label(&mut doc, group, &[("variable", "page")], true).unwrap();
        assert_eq!(doc.children(group).first(), Some(&first));
        assert_eq!(doc.children(group).last(), Some(&last));
    }
}
