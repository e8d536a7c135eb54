//! XML parser that builds [`Document`] arenas.

use crate::{Attribute, Document, Element, Error, NodeId, Result, XML_NAMESPACE};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parse XML from a string into a fresh [`Document`].
///
/// Comments, processing instructions, the XML declaration and whitespace-only
/// text between elements are dropped. Text interleaved with child elements is
/// rejected, since CSL never uses mixed content.
///
/// # Example
///
/// ```rust
/// use cslgen_xml::parse;
///
/// let doc = parse("<root><child/></root>").unwrap();
/// assert_eq!(doc.name(doc.root()), "root");
/// assert_eq!(doc.children(doc.root()).len(), 1);
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed.
pub fn parse(content: &str) -> Result<Document> {
    XmlParser::new(content).parse()
}

/// Internal parser state.
struct XmlParser<'a> {
    /// The quick-xml reader.
    reader: Reader<&'a [u8]>,

    /// Elements allocated so far, in document order.
    nodes: Vec<Element>,

    /// Open elements.
    stack: Vec<NodeId>,

    /// In-scope namespace bindings, one frame per open element.
    /// `None` as prefix is the default namespace.
    scopes: Vec<Vec<(Option<String>, String)>>,
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            reader,
            nodes: Vec::new(),
            stack: Vec::new(),
            scopes: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Document> {
        let mut root: Option<NodeId> = None;

        loop {
            let event_start = self.reader.buffer_position() as usize;

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let id = self.open_element(&e, event_start)?;
                    self.attach(id, &mut root)?;
                    self.stack.push(id);
                }
                Ok(Event::End(e)) => {
                    let end_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    let id = self.stack.pop().ok_or_else(|| Error::XmlSyntax {
                        message: format!("Unexpected closing tag </{}>", end_name),
                        position: event_start as u64,
                    })?;
                    let element = &self.nodes[id.0];
                    if element.qualified_name() != end_name {
                        return Err(Error::MismatchedEndTag {
                            expected: element.qualified_name(),
                            found: end_name,
                        });
                    }
                    self.scopes.pop();
                }
                Ok(Event::Empty(e)) => {
                    let id = self.open_element(&e, event_start)?;
                    self.attach(id, &mut root)?;
                    self.scopes.pop();
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|err| Error::XmlSyntax {
                        message: format!("Invalid text content: {}", err),
                        position: event_start as u64,
                    })?;
                    self.push_text(&text)?;
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(e.as_ref()).to_string();
                    self.push_text(&text)?;
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlSyntax {
                        message: e.to_string(),
                        position: self.reader.error_position(),
                    });
                }
            }
        }

        if let Some(&open) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", self.nodes[open.0].qualified_name()),
            });
        }

        let root = root.ok_or(Error::EmptyDocument)?;
        Ok(Document::from_parts(self.nodes, root))
    }

    /// Allocate an element for a start or empty tag and open its namespace scope.
    fn open_element(&mut self, e: &BytesStart<'_>, offset: usize) -> Result<NodeId> {
        let full_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let (prefix, name) = match full_name.split_once(':') {
            Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
            None => (None, full_name.clone()),
        };

        let mut attributes = Vec::new();
        let mut frame = Vec::new();
        for attr_result in e.attributes() {
            let attr = attr_result?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr
                .unescape_value()
                .map_err(|err| Error::XmlSyntax {
                    message: format!("Invalid attribute value: {}", err),
                    position: offset as u64,
                })?
                .into_owned();

            if key == "xmlns" {
                frame.push((None, value.clone()));
            } else if let Some(bound) = key.strip_prefix("xmlns:") {
                frame.push((Some(bound.to_string()), value.clone()));
            }
            attributes.push(Attribute::new(key, value));
        }
        self.scopes.push(frame);

        let namespace = self.resolve(prefix.as_deref());
        let mut element = Element::new(name, prefix, namespace);
        element.attributes = attributes;
        element.offset = Some(offset);

        let id = NodeId(self.nodes.len());
        self.nodes.push(element);
        Ok(id)
    }

    fn resolve(&self, prefix: Option<&str>) -> Option<String> {
        if prefix == Some("xml") {
            return Some(XML_NAMESPACE.to_string());
        }
        self.scopes
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .find(|(bound, _)| bound.as_deref() == prefix)
            .map(|(_, uri)| uri.clone())
    }

    fn attach(&mut self, id: NodeId, root: &mut Option<NodeId>) -> Result<()> {
        match self.stack.last().copied() {
            Some(parent) => {
                if self.nodes[parent.0].text.is_some() {
                    return Err(Error::MixedContent {
                        element: self.nodes[parent.0].qualified_name(),
                    });
                }
                self.nodes[id.0].parent = Some(parent);
                self.nodes[parent.0].children.push(id);
                Ok(())
            }
            None => {
                if root.is_some() {
                    return Err(Error::MultipleRoots);
                }
                *root = Some(id);
                Ok(())
            }
        }
    }

    fn push_text(&mut self, text: &str) -> Result<()> {
        let Some(&current) = self.stack.last() else {
            // Text outside the root element is only allowed to be whitespace.
            return Ok(());
        };
        if text.trim().is_empty() && self.nodes[current.0].text.is_none() {
            return Ok(());
        }
        let element = &mut self.nodes[current.0];
        if !element.children.is_empty() {
            return Err(Error::MixedContent {
                element: element.qualified_name(),
            });
        }
        element.text.get_or_insert_with(String::new).push_str(text);
        Ok(())
    }
}
