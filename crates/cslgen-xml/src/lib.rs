//! Editable XML trees for CSL style generation.
//!
//! This crate parses a CSL document into an arena of [`Element`]s addressed by
//! [`NodeId`] handles. Handles stay valid while nodes are moved, detached or
//! re-attached, which lets callers hold on to a node across a long sequence of
//! structural edits.
//!
//! # Overview
//!
//! The main types are:
//! - [`Document`]: the arena, owning every element created for one run
//! - [`Element`]: name, attributes, optional text and ordered children
//! - [`Query`] / [`NodeQuery`]: small path queries such as
//!   `choose/if[@type='legal_case']/group`
//!
//! Editing primitives (`insert_child`, `move_node`, `clone_subtree`,
//! `retarget_macro_refs`, `split_name`, ...) live on [`Document`].
//!
//! # Example
//!
//! ```rust
//! use cslgen_xml::{NodeQuery, parse};
//!
//! let mut doc = parse(r#"<style xmlns="http://purl.org/net/xbiblio/csl" version="1.0">
//!   <macro name="author">
//!     <text variable="author"/>
//!   </macro>
//! </style>"#).unwrap();
//!
//! let root = doc.root();
//! let text = doc.select_one(root, "macro[@name='author']/text").unwrap();
//! doc.set_attr(text, "suffix", ". ");
//! assert_eq!(doc.attr(text, "suffix"), Some(". "));
//! ```

mod edit;
pub mod error;
pub mod parser;
pub mod query;
pub mod types;
pub mod writer;

pub use error::{Error, Result};
pub use parser::parse;
pub use query::{NodeQuery, Query};
pub use types::{Attribute, Document, Element, NodeId};
pub use writer::{to_string, write_to};

/// Namespace of CSL 1.0 documents.
pub const CSL_NAMESPACE: &str = "http://purl.org/net/xbiblio/csl";

/// Namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
