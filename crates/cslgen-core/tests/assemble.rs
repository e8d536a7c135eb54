/*
 * tests/assemble.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * End-to-end assembly of the embedded template.
 */

//! End-to-end assembly of the embedded template.

use chrono::{DateTime, FixedOffset, TimeZone};
use cslgen_config::{ConfigRecord, ConfigTable, ConfigValue, Contributor, PARAMS, Param, ParamKind};
use cslgen_core::{AssembleOptions, Assembler, CHICAGO_AUTHOR_DATE, StyleDocument, Template};
use cslgen_xml::{Document, NodeId, NodeQuery};

const TABLE: &str = r#"
contributor:
  name: Example Press
  uri: https://example.org/press
metadata:
  - ids: chicago-en, chicago-ja
    name: Journal of Examples
    language: English
  - ids: solo-en
    name: Solo Review
    language: English
parameters:
  b-name-delimiter:
    chicago-en: "; "
  b-locator-label-form:
    solo-en: short
"#;

fn timestamp() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 4, 1, 12, 0, 0)
        .unwrap()
}

fn assembler_for(template: Template, table: &ConfigTable) -> Assembler {
    Assembler::new(
        template,
        AssembleOptions {
            timestamp: timestamp(),
            contributor: table.contributor().clone(),
        },
    )
}

fn assemble(id: &str) -> StyleDocument {
    let table = ConfigTable::from_yaml_str(TABLE).unwrap();
    let row = table.find_row(id).unwrap();
    assembler_for(Template::embedded(), &table)
        .assemble(row, &table)
        .unwrap()
}

fn macro_refs(doc: &Document, node: NodeId) -> Vec<String> {
    doc.descendants(node)
        .filter_map(|n| doc.attr(n, "macro"))
        .map(str::to_string)
        .collect()
}

fn macro_named(style: &StyleDocument, name: &str) -> NodeId {
    let query = format!("macro[@name='{}']", name);
    style.doc().select_one(style.root(), &query).unwrap()
}

#[test]
fn test_singleton_blocks() {
    for id in ["chicago-en", "solo-en"] {
        let style = assemble(id);
        let doc = style.doc();
        for block in ["info", "citation", "bibliography"] {
            assert_eq!(doc.select_all(style.root(), block).unwrap().len(), 1, "{} in {}", block, id);
        }
    }
}

#[test]
fn test_bilingual_layouts_call_japanese_macros() {
    let style = assemble("chicago-en");
    let doc = style.doc();

    for layouts in [style.citation_layouts().unwrap(), style.bibliography_layouts().unwrap()] {
        assert_eq!(layouts.len(), 2);
        assert_eq!(doc.attr(layouts[0], "locale"), Some("ja"));

        let ja_refs = macro_refs(doc, layouts[0]);
        assert!(!ja_refs.is_empty());
        assert!(ja_refs.iter().all(|r| r.ends_with("-ja")), "{:?}", ja_refs);
        let primary_refs = macro_refs(doc, layouts[1]);
        assert!(primary_refs.iter().all(|r| !r.ends_with("-ja")), "{:?}", primary_refs);

        for name in ja_refs.iter().chain(&primary_refs) {
            macro_named(&style, name);
        }
    }
}

#[test]
fn test_monolingual_has_no_japanese_parts() {
    let style = assemble("solo-en");
    let xml = style.to_xml().unwrap();
    assert!(!xml.contains("-ja\""));
    assert!(!xml.contains("locale=\"ja\""));
    assert!(!xml.contains("xml:lang=\"ja\""));
    assert!(!xml.contains("name-kana"));
    assert!(xml.contains("<id>http://www.zotero.org/styles/chicago-author-date-solo-en</id>"));
}

#[test]
fn test_output_is_deterministic() {
    let first = assemble("chicago-en").to_xml().unwrap();
    let second = assemble("chicago-en").to_xml().unwrap();
    assert_eq!(first, second);
    assert!(first.contains("<updated>2024-04-01T12:00:00+09:00</updated>"));
    assert!(first.contains("<title>Journal of Examples (English)</title>"));
    assert!(first.contains("<uri>https://example.org/press</uri>"));
}

#[test]
fn test_literal_value_and_default_per_variant() {
    let style = assemble("chicago-en");
    let doc = style.doc();

    let primary = doc
        .select_one(macro_named(&style, "contributors"), "group/names/name")
        .unwrap();
    assert_eq!(doc.attr(primary, "delimiter"), Some("; "));

    let japanese = doc
        .select_one(macro_named(&style, "contributors-ja"), "group/names/name")
        .unwrap();
    assert_eq!(doc.attr(japanese, "delimiter"), Some("・"));
}

#[test]
fn test_original_date_renders_year_everywhere() {
    let style = assemble("chicago-en");
    let doc = style.doc();
    let mut seen = 0;
    for name in ["date", "date-ja", "date-in-text", "date-in-text-ja"] {
        for date in doc
            .descendants(macro_named(&style, name))
            .filter(|&n| doc.attr(n, "variable") == Some("original-date"))
        {
            seen += 1;
            assert_eq!(doc.attr(date, "form"), None);
            assert_eq!(doc.attr(date, "date-parts"), None);
            let parts = doc.select_all(date, "date-part").unwrap();
            assert_eq!(parts.len(), 1);
            assert_eq!(doc.attr(parts[0], "name"), Some("year"));
        }
    }
    assert_eq!(seen, 4);
}

#[test]
fn test_locator_labels_follow_configured_form() {
    let count_labels = |style: &StyleDocument| {
        let doc = style.doc();
        doc.descendants(macro_named(style, "locators"))
            .filter(|&n| doc.name(n) == "label")
            .count()
    };

    assert_eq!(count_labels(&assemble("chicago-en")), 0);

    let style = assemble("solo-en");
    assert_eq!(count_labels(&style), 2);
    let doc = style.doc();
    let volume = doc
        .select_one(macro_named(&style, "locators"), "choose/if/choose/if")
        .unwrap();
    let first = doc.children(volume)[0];
    assert_eq!(doc.name(first), "label");
    assert_eq!(doc.attr(first, "form"), Some("short"));
}

#[test]
fn test_shared_citation_settings() {
    let style = assemble("chicago-en");
    let doc = style.doc();
    let citation = style.citation();
    assert_eq!(doc.attr(citation, "et-al-min"), Some("3"));
    assert_eq!(doc.attr(citation, "disambiguate-add-year-suffix"), Some("false"));
    assert_eq!(doc.attr(citation, "disambiguate-add-givenname"), Some("false"));
    assert_eq!(doc.attr(style.root(), "page-range-format"), Some("expanded"));
}

#[test]
fn test_template_drift_names_the_rule() {
    let drifted = CHICAGO_AUTHOR_DATE.replace(
        "<macro name=\"access\">\n    <group delimiter=\". \">",
        "<macro name=\"access\">\n    <group>",
    );
    assert_ne!(drifted, CHICAGO_AUTHOR_DATE);

    let table = ConfigTable::from_yaml_str(TABLE).unwrap();
    let row = table.find_row("solo-en").unwrap();
    let err = assembler_for(Template::new("drifted", drifted), &table)
        .assemble(row, &table)
        .unwrap_err();
    assert_eq!(err.rule(), Some("access"));
}

#[test]
fn test_default_contributor() {
    let table = ConfigTable::from_yaml_str("metadata: []\n").unwrap();
    assert_eq!(table.contributor(), &Contributor::default());
}

/// The cell that spells out a parameter's default.
fn explicit_default(param: Param) -> ConfigValue {
    match param.kind() {
        ParamKind::Flag => ConfigValue::Flag(param.default_value() == "true"),
        ParamKind::Text => ConfigValue::Text(param.default_value().to_string()),
    }
}

fn assemble_pair(primary: &ConfigRecord, secondary: Option<&ConfigRecord>) -> String {
    let table = ConfigTable::from_yaml_str(TABLE).unwrap();
    assembler_for(Template::embedded(), &table)
        .assemble_records("Journal", "English", primary, secondary)
        .unwrap()
        .to_xml()
        .unwrap()
}

#[test]
fn test_explicit_defaults_match_empty_cells() {
    let monolingual = assemble_pair(&ConfigRecord::empty("solo-en"), None);
    let bilingual = assemble_pair(
        &ConfigRecord::empty("chicago-en"),
        Some(&ConfigRecord::empty("chicago-ja")),
    );

    let mut differing = Vec::new();
    for &param in PARAMS.iter().filter(|p| !p.default_value().is_empty()) {
        let cell = explicit_default(param);
        let solo = ConfigRecord::empty("solo-en").with(param.key(), cell.clone());
        if assemble_pair(&solo, None) != monolingual {
            differing.push(param.key());
            continue;
        }

        let primary = ConfigRecord::empty("chicago-en").with(param.key(), cell.clone());
        let secondary = ConfigRecord::empty("chicago-ja").with(param.key(), cell);
        if assemble_pair(&primary, Some(&secondary)) != bilingual {
            differing.push(param.key());
        }
    }
    assert!(differing.is_empty(), "explicit defaults change the output: {:?}", differing);
}

#[test]
fn test_empty_cells_match_absent_cells() {
    let blank = PARAMS
        .iter()
        .filter(|p| p.kind() == ParamKind::Text)
        .fold(ConfigRecord::empty("solo-en"), |record, p| {
            record.with(p.key(), ConfigValue::Text(String::new()))
        });
    assert_eq!(
        assemble_pair(&blank, None),
        assemble_pair(&ConfigRecord::empty("solo-en"), None)
    );
}
