//! Test fixture: the embedded template with one primary pass set up.

use cslgen_config::{ConfigRecord, ConfigValue};
use cslgen_xml::{Document, NodeId, NodeQuery};

use crate::Result;
use crate::document::StyleDocument;
use crate::locale::LocaleVariant;
use crate::macros::MacroDictionary;
use crate::rule::{RuleContext, StyleRule};
use crate::template::CHICAGO_AUTHOR_DATE;

pub(crate) struct RuleFixture {
    pub style: StyleDocument,
    pub macros: MacroDictionary,
    pub variant: LocaleVariant,
    pub config: ConfigRecord,
}

impl RuleFixture {
    pub fn new() -> Self {
        Self::with_config(ConfigRecord::empty("chicago-en"))
    }

    pub fn with_config(config: ConfigRecord) -> Self {
        let style = StyleDocument::parse(CHICAGO_AUTHOR_DATE).unwrap();
        let macros = MacroDictionary::from_macros(style.doc(), &style.macros().unwrap()).unwrap();
        Self {
            variant: LocaleVariant::primary_for(config.id()),
            style,
            macros,
            config,
        }
    }

    /// Shorthand for a fixture with text cells.
    pub fn with_text(cells: &[(&str, &str)]) -> Self {
        let config = cells.iter().fold(ConfigRecord::empty("chicago-en"), |record, (key, value)| {
            record.with(*key, ConfigValue::Text(value.to_string()))
        });
        Self::with_config(config)
    }

    pub fn apply(&mut self, rule: &dyn StyleRule) -> Result<()> {
        let ctx = RuleContext {
            variant: &self.variant,
            macros: &self.macros,
            config: &self.config,
            info: self.style.info(),
            citation: self.style.citation(),
            citation_layout: self.style.citation_layouts()?[0],
            bibliography_layout: self.style.bibliography_layouts()?[0],
        };
        rule.apply(self.style.doc_mut(), &ctx)
    }

    pub fn doc(&self) -> &Document {
        self.style.doc()
    }

    pub fn macro_node(&self, name: &str) -> NodeId {
        self.macros.get(name).unwrap()
    }

    /// First match of `path` under macro `name`.
    pub fn in_macro(&self, name: &str, path: &str) -> NodeId {
        self.doc().select_one(self.macro_node(name), path).unwrap()
    }

    pub fn citation_layout(&self) -> NodeId {
        self.style.citation_layouts().unwrap()[0]
    }

    pub fn bibliography_layout(&self) -> NodeId {
        self.style.bibliography_layouts().unwrap()[0]
    }

    /// The bibliography layout's `text` calling macro `name`.
    pub fn layout_text(&self, name: &str) -> NodeId {
        let query = format!("text[@macro='{}']", name);
        self.doc().select_one(self.bibliography_layout(), &query).unwrap()
    }

    /// Element names of the children of `node`.
    pub fn child_names(&self, node: NodeId) -> Vec<String> {
        let doc = self.doc();
        doc.children(node)
            .iter()
            .map(|&c| doc.name(c).to_string())
            .collect()
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.doc().attr(node, name)
    }
}
