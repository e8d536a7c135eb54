/*
 * assembler.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Assembles one publication's style from the template.
 */

//! Assembles one publication's style from the template.
//!
//! Assembly prepares the working copy (shared settings, Japanese clones,
//! metadata) and then runs the rule engine once per language: the Japanese
//! pass first when the publication is bilingual, the primary pass last.

use chrono::{DateTime, FixedOffset};
use cslgen_config::{ConfigRecord, ConfigTable, Contributor, PublicationRow};
use cslgen_xml::{NodeId, NodeQuery};

use crate::document::StyleDocument;
use crate::locale::{JA_SUFFIX, LocaleVariant, insert_japanese_locale};
use crate::macros::MacroDictionary;
use crate::metadata::{StyleMetadata, stamp};
use crate::rule::RuleContext;
use crate::rules::RuleEngine;
use crate::template::Template;
use crate::{Error, Result};

/// Sort key prepended to bilingual bibliographies.
const KANA_SORT_KEY: &str = "name-kana";

/// Settings shared by every publication of a run.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Written to `info/updated`.
    pub timestamp: DateTime<FixedOffset>,
    pub contributor: Contributor,
}

/// One layout pair a language pass edits.
#[derive(Debug, Clone, Copy)]
struct Layouts {
    citation: NodeId,
    bibliography: NodeId,
}

pub struct Assembler {
    template: Template,
    options: AssembleOptions,
    engine: RuleEngine,
}

impl Assembler {
    pub fn new(template: Template, options: AssembleOptions) -> Self {
        Self {
            template,
            options,
            engine: RuleEngine::new(),
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Assemble the style for a publication row of `table`.
    pub fn assemble(&self, row: &PublicationRow, table: &ConfigTable) -> Result<StyleDocument> {
        let primary = table.record(row.primary_id());
        let secondary = row.secondary_id().map(|id| table.record(id));
        self.assemble_records(&row.name, &row.language, &primary, secondary.as_ref())
    }

    /// Assemble a style from explicit records.
    ///
    /// `primary` supplies the style id and the primary pass's parameters. A
    /// `secondary` record makes the style bilingual and drives the Japanese
    /// pass.
    pub fn assemble_records(
        &self,
        name: &str,
        language: &str,
        primary: &ConfigRecord,
        secondary: Option<&ConfigRecord>,
    ) -> Result<StyleDocument> {
        let mut style = StyleDocument::parse(self.template.source())?;
        let root = style.root();
        let info = style.info();
        let citation = style.citation();
        let bibliography = style.bibliography();
        let primary_layouts = Layouts {
            citation: first_layout(&style.citation_layouts()?, "citation")?,
            bibliography: first_layout(&style.bibliography_layouts()?, "bibliography")?,
        };

        let doc = style.doc_mut();
        doc.take_attr(bibliography, "subsequent-author-substitute")?;
        doc.set_attr(root, "page-range-format", "expanded");

        let macro_nodes = style.macros()?;
        let primary_macros = MacroDictionary::from_macros(style.doc(), &macro_nodes)?;

        let japanese = match secondary {
            Some(record) => {
                let doc = style.doc_mut();
                let sort = doc.select_one(bibliography, "sort")?;
                doc.insert_child(sort, 0, "key", None, &[("variable", KANA_SORT_KEY)])?;
                let macros = primary_macros.clone_with_suffix(doc, JA_SUFFIX)?;
                let layouts = Layouts {
                    citation: localize_layout(&mut style, primary_layouts.citation)?,
                    bibliography: localize_layout(&mut style, primary_layouts.bibliography)?,
                };
                Some((record, macros, layouts))
            }
            None => None,
        };

        let doc = style.doc_mut();
        doc.set_attr(citation, "et-al-min", "3");
        for attr in [
            "disambiguate-add-year-suffix",
            "disambiguate-add-names",
            "disambiguate-add-givenname",
        ] {
            doc.set_attr(citation, attr, "false");
        }

        let id_base = self.template.id_base();
        stamp(
            &mut style,
            &StyleMetadata {
                name,
                language,
                id_base: &id_base,
                style_id: primary.id(),
                contributor: &self.options.contributor,
                updated: self.options.timestamp,
            },
        )?;

        if let Some((record, macros, layouts)) = &japanese {
            insert_japanese_locale(style.doc_mut(), info)?;
            self.run_pass(&mut style, &LocaleVariant::Japanese, macros, record, *layouts)?;
        }
        let variant = LocaleVariant::primary_for(primary.id());
        self.run_pass(&mut style, &variant, &primary_macros, primary, primary_layouts)?;

        tracing::info!(
            id = primary.id(),
            bilingual = japanese.is_some(),
            "Assembled style"
        );
        Ok(style)
    }

    fn run_pass(
        &self,
        style: &mut StyleDocument,
        variant: &LocaleVariant,
        macros: &MacroDictionary,
        config: &ConfigRecord,
        layouts: Layouts,
    ) -> Result<()> {
        let ctx = RuleContext {
            variant,
            macros,
            config,
            info: style.info(),
            citation: style.citation(),
            citation_layout: layouts.citation,
            bibliography_layout: layouts.bibliography,
        };
        self.engine.run(style.doc_mut(), &ctx)
    }
}

fn first_layout(layouts: &[NodeId], block: &str) -> Result<NodeId> {
    layouts
        .first()
        .copied()
        .ok_or_else(|| Error::Template(format!("{} has no layout", block)))
}

/// Clone `layout` as a `locale="ja"` layout right before it, calling the
/// `-ja` macros.
fn localize_layout(style: &mut StyleDocument, layout: NodeId) -> Result<NodeId> {
    let doc = style.doc_mut();
    let clone = doc.clone_subtree(layout);
    doc.set_attr(clone, "locale", "ja");
    doc.retarget_macro_refs(clone, JA_SUFFIX);
    doc.move_before(clone, layout)?;
    Ok(clone)
}
