/*
 * metadata.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Metadata stamping for generated styles.
 */

//! Metadata stamping for generated styles.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use cslgen_config::Contributor;
use cslgen_xml::NodeQuery;

use crate::Result;
use crate::document::StyleDocument;

/// What gets written into `info`.
#[derive(Debug, Clone)]
pub struct StyleMetadata<'a> {
    /// Display name of the publication.
    pub name: &'a str,
    pub language: &'a str,
    pub id_base: &'a str,
    pub style_id: &'a str,
    pub contributor: &'a Contributor,
    pub updated: DateTime<FixedOffset>,
}

/// ISO-8601 at second precision with a numeric offset.
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Stamp contributor, title, id, summary and update time.
pub fn stamp(style: &mut StyleDocument, meta: &StyleMetadata<'_>) -> Result<()> {
    let info = style.info();
    let label = format!("{} ({})", meta.name, meta.language);

    append_contributor(style, meta.contributor)?;

    let doc = style.doc_mut();
    for title in doc.select_all(info, "title")? {
        doc.set_text(title, &label)?;
    }
    for summary in doc.select_all(info, "summary")? {
        let text = format!(
            "{} - Edited for {}",
            doc.text(summary).unwrap_or_default(),
            label
        );
        doc.set_text(summary, &text)?;
    }

    let updated = match doc.select(info, "updated")? {
        Some(updated) => updated,
        None => doc.append_child(info, "updated", None, &[])?,
    };
    doc.set_text(updated, &format_timestamp(&meta.updated))?;

    style.set_style_id(meta.id_base, meta.style_id)
}

/// Add a `contributor` after the last existing one, or at the end of `info`.
fn append_contributor(style: &mut StyleDocument, contributor: &Contributor) -> Result<()> {
    let info = style.info();
    let doc = style.doc_mut();
    let index = match doc.select_all(info, "contributor")?.last() {
        Some(&last) => doc.index_in_parent(last).map_or(0, |i| i + 1),
        None => doc.children(info).len(),
    };
    let node = doc.insert_child(info, index, "contributor", None, &[])?;
    doc.append_child(node, "name", Some(contributor.name.as_str()), &[])?;
    if let Some(uri) = &contributor.uri {
        doc.append_child(node, "uri", Some(uri.as_str()), &[])?;
    }
    Ok(())
}
