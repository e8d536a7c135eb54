/*
 * document.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * The working copy of a style.
 */

//! The working copy of a style.

use cslgen_xml::{Document, NodeId, NodeQuery};

use crate::{Error, Result};

/// A parsed style plus handles to its singleton blocks.
///
/// There is exactly one `info`, `citation` and `bibliography` element;
/// [`StyleDocument::parse`] rejects templates where that is not so.
#[derive(Debug, Clone)]
pub struct StyleDocument {
    doc: Document,
    info: NodeId,
    citation: NodeId,
    bibliography: NodeId,
}

impl StyleDocument {
    /// Parse style source into a fresh working copy.
    pub fn parse(source: &str) -> Result<Self> {
        let doc = cslgen_xml::parse(source)?;
        let root = doc.root();
        if doc.name(root) != "style" {
            return Err(Error::Template(format!(
                "expected a <style> root, found {}",
                doc.describe(root)
            )));
        }
        let info = singleton(&doc, "info")?;
        let citation = singleton(&doc, "citation")?;
        let bibliography = singleton(&doc, "bibliography")?;
        Ok(Self {
            doc,
            info,
            citation,
            bibliography,
        })
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn root(&self) -> NodeId {
        self.doc.root()
    }

    pub fn info(&self) -> NodeId {
        self.info
    }

    pub fn citation(&self) -> NodeId {
        self.citation
    }

    pub fn bibliography(&self) -> NodeId {
        self.bibliography
    }

    /// Layouts of the citation block, in document order.
    pub fn citation_layouts(&self) -> Result<Vec<NodeId>> {
        Ok(self.doc.select_all(self.citation, "layout")?)
    }

    /// Layouts of the bibliography block, in document order.
    pub fn bibliography_layouts(&self) -> Result<Vec<NodeId>> {
        Ok(self.doc.select_all(self.bibliography, "layout")?)
    }

    /// Top-level macro elements, in document order.
    pub fn macros(&self) -> Result<Vec<NodeId>> {
        Ok(self.doc.select_all(self.root(), "macro")?)
    }

    /// Rewrite every `info/id` to `{id_base}-{style_id}`.
    pub fn set_style_id(&mut self, id_base: &str, style_id: &str) -> Result<()> {
        let value = format!("{}-{}", id_base, style_id);
        for id in self.doc.select_all(self.info, "id")? {
            self.doc.set_text(id, &value)?;
        }
        Ok(())
    }

    /// Current `info/id` text, if any.
    pub fn style_id(&self) -> Option<&str> {
        let id = self.doc.select(self.info, "id").ok().flatten()?;
        self.doc.text(id)
    }

    /// Serialize the style with an XML declaration.
    pub fn to_xml(&self) -> Result<String> {
        Ok(cslgen_xml::to_string(&self.doc)?)
    }
}

fn singleton(doc: &Document, name: &str) -> Result<NodeId> {
    match doc.select_all(doc.root(), name)?.as_slice() {
        [only] => Ok(*only),
        [] => Err(Error::Template(format!("missing <{}> block", name))),
        many => Err(Error::Template(format!(
            "expected one <{}> block, found {}",
            name,
            many.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::CHICAGO_AUTHOR_DATE;

    #[test]
    fn test_parse_embedded_template() {
        let style = StyleDocument::parse(CHICAGO_AUTHOR_DATE).unwrap();
        assert_eq!(style.doc().name(style.info()), "info");
        assert_eq!(style.citation_layouts().unwrap().len(), 1);
        assert_eq!(style.bibliography_layouts().unwrap().len(), 1);
        assert!(style.macros().unwrap().len() > 20);
    }

    #[test]
    fn test_missing_block() {
        let err = StyleDocument::parse(
            r#"<style xmlns="http://purl.org/net/xbiblio/csl"><info/><citation/></style>"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("bibliography"), "Got: {}", err);
    }

    #[test]
    fn test_duplicate_block() {
        let err = StyleDocument::parse(
            r#"<style xmlns="http://purl.org/net/xbiblio/csl"><info/><info/><citation/><bibliography/></style>"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn test_wrong_root() {
        assert!(matches!(
            StyleDocument::parse("<locale/>"),
            Err(Error::Template(_))
        ));
    }

    #[test]
    fn test_set_style_id() {
        let mut style = StyleDocument::parse(CHICAGO_AUTHOR_DATE).unwrap();
        style
            .set_style_id("http://www.zotero.org/styles/chicago-author-date", "chicago-en")
            .unwrap();
        assert_eq!(
            style.style_id(),
            Some("http://www.zotero.org/styles/chicago-author-date-chicago-en")
        );
    }
}
