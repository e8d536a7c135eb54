//! Core arena types.

use std::fmt;

/// Handle to an element stored in a [`Document`].
///
/// Handles are only meaningful for the document that issued them. They stay
/// valid when the element is moved or detached; a detached element simply
/// has no parent until it is attached again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An attribute, stored under its qualified name (`xml:lang`, `macro`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified attribute name as written in the source.
    pub name: String,

    /// Attribute value (after unescaping XML entities).
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Namespace prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Local part of the name.
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }
}

/// An element in the arena.
#[derive(Debug, Clone)]
pub struct Element {
    /// The local name of the element (without namespace prefix).
    pub name: String,

    /// Namespace prefix, if any (e.g., "csl" in `<csl:text>`).
    pub prefix: Option<String>,

    /// Resolved namespace URI.
    pub namespace: Option<String>,

    /// Attributes in source order.
    pub attributes: Vec<Attribute>,

    /// Text content. Elements carry either text or child elements.
    pub text: Option<String>,

    /// Byte offset of the start tag in the parsed source. `None` for
    /// elements created by edits.
    pub offset: Option<usize>,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Element {
    /// Create a detached element without attributes or content.
    pub fn new(name: impl Into<String>, prefix: Option<String>, namespace: Option<String>) -> Self {
        Self {
            name: name.into(),
            prefix,
            namespace,
            attributes: Vec::new(),
            text: None,
            offset: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Name as written in the source, including the prefix.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    /// Get an attribute value by qualified name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check whether an attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Ordered child handles.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent handle, `None` for the root and for detached elements.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// An XML document held as an arena of elements.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: Vec<Element>,
    pub(crate) root: NodeId,
}

impl Document {
    /// Create a document from a root element.
    pub fn new(root: Element) -> Self {
        let mut root = root;
        root.parent = None;
        root.children.clear();
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub(crate) fn from_parts(nodes: Vec<Element>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    pub(crate) fn push(&mut self, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(element);
        id
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Namespace of the root element; queries and new elements use it.
    pub fn namespace(&self) -> Option<&str> {
        self.element(self.root).namespace.as_deref()
    }

    /// Borrow an element.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by another document.
    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    /// Mutably borrow an element.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by another document.
    pub fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    /// Local name of an element.
    pub fn name(&self, id: NodeId) -> &str {
        &self.element(id).name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.element(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.element(id).children
    }

    /// Position of an element among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index
            .checked_sub(1)
            .map(|i| self.children(parent)[i])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Attribute value by qualified name.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).get_attribute(name)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.element(id).text.as_deref()
    }

    /// True if `id` is `ancestor` or lies below it.
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// True if the element is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.is_within(id, self.root)
    }

    /// Pre-order traversal of `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// Short rendering of an element's start tag, for error messages.
    pub fn describe(&self, id: NodeId) -> String {
        let element = self.element(id);
        let mut out = format!("<{}", element.qualified_name());
        for attr in &element.attributes {
            if attr.name == "xmlns" || attr.name.starts_with("xmlns:") {
                continue;
            }
            out.push_str(&format!(" {}=\"{}\"", attr.name, attr.value));
        }
        out.push('>');
        if let Some(offset) = element.offset {
            out.push_str(&format!(" (byte {})", offset));
        }
        out
    }
}

/// Iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
