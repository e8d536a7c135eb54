/*
 * locale.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Language variants and locale blocks.
 */

//! Language variants and locale blocks.

use std::fmt;

use cslgen_xml::{Document, NodeId, NodeQuery};

use crate::Result;

/// Suffix appended to macro names of the Japanese variant.
pub const JA_SUFFIX: &str = "-ja";

/// Localized terms of the Japanese locale block: text, term name, form.
const JA_TERMS: &[(&str, &str, Option<&str>)] = &[
    ("頁", "page", Some("long")),
    ("巻", "volume", Some("short")),
    ("号", "issue", Some("short")),
    ("訳", "translator", Some("short")),
    ("編訳", "editortranslator", Some("short")),
    ("アクセス", "accessed", None),
];

/// One language pass over the style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleVariant {
    /// The layouts and macros of the template itself.
    Primary { language: String },
    /// The `locale="ja"` layouts and their `-ja` macros.
    Japanese,
}

impl LocaleVariant {
    /// Primary variant for a style id: the language is the id's last
    /// dash-separated segment when it looks like a language code, `en`
    /// otherwise.
    pub fn primary_for(style_id: &str) -> Self {
        let language = style_id
            .rsplit_once('-')
            .map(|(_, tail)| tail)
            .filter(|tail| {
                (2..=3).contains(&tail.len()) && tail.chars().all(|c| c.is_ascii_lowercase())
            })
            .unwrap_or("en");
        LocaleVariant::Primary {
            language: language.to_string(),
        }
    }

    /// Suffix of the macro names this variant's layouts reference.
    pub fn suffix(&self) -> &'static str {
        match self {
            LocaleVariant::Primary { .. } => "",
            LocaleVariant::Japanese => JA_SUFFIX,
        }
    }

    /// Language of the locale block this variant's options go into.
    pub fn language(&self) -> &str {
        match self {
            LocaleVariant::Primary { language } => language,
            LocaleVariant::Japanese => "ja",
        }
    }
}

impl fmt::Display for LocaleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleVariant::Primary { language } => write!(f, "primary ({})", language),
            LocaleVariant::Japanese => write!(f, "ja"),
        }
    }
}

/// Insert the Japanese locale block right after `info`.
pub fn insert_japanese_locale(doc: &mut Document, info: NodeId) -> Result<NodeId> {
    let root = doc.root();
    let index = doc.index_in_parent(info).map_or(0, |i| i + 1);
    let locale = doc.insert_child(root, index, "locale", None, &[("xml:lang", "ja")])?;
    let terms = doc.append_child(locale, "terms", None, &[])?;
    for (text, name, form) in JA_TERMS {
        let mut attrs = vec![("name", *name)];
        if let Some(form) = form {
            attrs.push(("form", *form));
        }
        doc.append_child(terms, "term", Some(*text), &attrs)?;
    }
    Ok(locale)
}

/// The locale block for `language`, created when missing.
///
/// A new block goes after the last existing locale, or after `info` when
/// the style has none.
pub fn find_or_create_locale(doc: &mut Document, info: NodeId, language: &str) -> Result<NodeId> {
    let root = doc.root();
    let query = format!("locale[@xml:lang='{}']", language);
    if let Some(locale) = doc.select(root, &query)? {
        return Ok(locale);
    }
    let anchor = doc.select_all(root, "locale")?.last().copied().unwrap_or(info);
    let index = doc.index_in_parent(anchor).map_or(0, |i| i + 1);
    tracing::debug!(language, "Creating locale block");
    Ok(doc.insert_child(root, index, "locale", None, &[("xml:lang", language)])?)
}
