//! Serialization of [`Document`] trees back to XML text.

use crate::{Document, Error, NodeId, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io;

/// Serialize a document to a string with an XML declaration and two-space
/// indentation.
///
/// Only attached elements are written; subtrees detached by edits are
/// skipped. Output is deterministic for a given tree.
pub fn to_string(doc: &Document) -> Result<String> {
    let mut buffer = Vec::new();
    write_to(doc, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::Write(e.to_string()))
}

/// Serialize a document into any [`io::Write`] sink.
pub fn write_to<W: io::Write>(doc: &Document, sink: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(sink, b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(write_error)?;
    write_element(&mut writer, doc, doc.root())?;
    writer
        .get_mut()
        .write_all(b"\n")
        .map_err(|e| Error::Write(e.to_string()))
}

fn write_element<W: io::Write>(writer: &mut Writer<W>, doc: &Document, id: NodeId) -> Result<()> {
    let element = doc.element(id);
    let name = element.qualified_name();

    let mut start = BytesStart::new(name.as_str());
    for attr in &element.attributes {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }

    let children = doc.children(id);
    match (&element.text, children.is_empty()) {
        (None, true) => {
            writer.write_event(Event::Empty(start)).map_err(write_error)?;
        }
        (Some(text), _) => {
            writer.write_event(Event::Start(start)).map_err(write_error)?;
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_error)?;
            writer
                .write_event(Event::End(BytesEnd::new(name.as_str())))
                .map_err(write_error)?;
        }
        (None, false) => {
            writer.write_event(Event::Start(start)).map_err(write_error)?;
            for &child in children {
                write_element(writer, doc, child)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name.as_str())))
                .map_err(write_error)?;
        }
    }
    Ok(())
}

fn write_error(err: impl std::fmt::Display) -> Error {
    Error::Write(err.to_string())
}
