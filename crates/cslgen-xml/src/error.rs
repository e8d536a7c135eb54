//! Error types for parsing, querying and editing XML trees.

use thiserror::Error;

/// Result type alias for cslgen-xml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, querying or editing a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// XML syntax error from quick-xml.
    #[error("XML syntax error at byte {position}: {message}")]
    XmlSyntax { message: String, position: u64 },

    /// Unexpected end of input.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    /// Mismatched end tag.
    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    /// Empty document (no root element).
    #[error("Empty XML document: no root element found")]
    EmptyDocument,

    /// Multiple root elements.
    #[error("Invalid XML: multiple root elements")]
    MultipleRoots,

    /// Text interleaved with child elements.
    #[error("Mixed content is not supported in <{element}>")]
    MixedContent { element: String },

    /// A path query that could not be parsed.
    #[error("Invalid query '{query}': {message}")]
    InvalidQuery { query: String, message: String },

    /// A required query matched nothing.
    #[error("No element matches '{query}' under {context}")]
    NoMatch { query: String, context: String },

    /// A required attribute is absent.
    #[error("Missing attribute '{attribute}' on {element}")]
    MissingAttribute { element: String, attribute: String },

    /// An element of the wrong kind was handed to an edit primitive.
    #[error("Expected <{expected}>, found {found}")]
    UnexpectedElement { expected: String, found: String },

    /// A move or insert that would break the tree.
    #[error("Cannot place {node} under {target}: {reason}")]
    InvalidMove {
        node: String,
        target: String,
        reason: String,
    },

    /// Serialization failure.
    #[error("Failed to write XML: {0}")]
    Write(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlSyntax {
            message: err.to_string(),
            position: 0,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlSyntax {
            message: format!("Attribute error: {}", err),
            position: 0,
        }
    }
}
