//! Structural path queries.
//!
//! A query is a `/`-separated list of child steps evaluated from a context
//! element. Each step names an element (or `*`) and may carry attribute
//! predicates:
//!
//! ```text
//! group/choose/if[@variable='issued']/group
//! choose/else-if[@type='bill book graphic']/text
//! locale[@xml:lang='ja']/terms
//! names/label[@form]
//! ```
//!
//! Only elements in the document namespace match a named step. Results are
//! returned in document order.

use crate::{Document, Error, NodeId, Result};
use std::str::FromStr;

/// A parsed path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    source: String,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    name: NameTest,
    predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Local(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Has(String),
    Equals(String, String),
}

impl Query {
    /// Parse a query string.
    pub fn parse(source: &str) -> Result<Self> {
        QueryParser::new(source).parse()
    }

    /// The query as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Evaluate against `doc`, starting from `from`.
    pub fn evaluate(&self, doc: &Document, from: NodeId) -> Vec<NodeId> {
        let namespace = doc.namespace();
        let mut current = vec![from];
        for step in &self.steps {
            current = current
                .iter()
                .flat_map(|&node| doc.children(node).iter().copied())
                .filter(|&child| step.matches(doc, child, namespace))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }
}

impl FromStr for Query {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Query::parse(s)
    }
}

impl Step {
    fn matches(&self, doc: &Document, id: NodeId, namespace: Option<&str>) -> bool {
        let element = doc.element(id);
        if element.namespace.as_deref() != namespace {
            return false;
        }
        if let NameTest::Local(name) = &self.name
            && element.name != *name
        {
            return false;
        }
        self.predicates.iter().all(|predicate| match predicate {
            Predicate::Has(attr) => element.has_attribute(attr),
            Predicate::Equals(attr, value) => element.get_attribute(attr) == Some(value.as_str()),
        })
    }
}

struct QueryParser<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> QueryParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::InvalidQuery {
            query: self.source.to_string(),
            message: message.into(),
        }
    }

    fn parse(mut self) -> Result<Query> {
        let mut steps = Vec::new();
        loop {
            steps.push(self.step()?);
            match self.chars.next() {
                None => break,
                Some((_, '/')) => continue,
                Some((pos, c)) => {
                    return Err(self.error(format!("unexpected '{}' at {}", c, pos)));
                }
            }
        }
        Ok(Query {
            source: self.source.to_string(),
            steps,
        })
    }

    fn step(&mut self) -> Result<Step> {
        let name = self.name()?;
        let name = if name == "*" {
            NameTest::Any
        } else {
            NameTest::Local(name)
        };

        let mut predicates = Vec::new();
        while let Some(&(_, '[')) = self.chars.peek() {
            self.chars.next();
            predicates.push(self.predicate()?);
        }
        Ok(Step { name, predicates })
    }

    fn name(&mut self) -> Result<String> {
        let mut name = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '/' || c == '[' || c == ']' || c == '=' {
                break;
            }
            name.push(c);
            self.chars.next();
        }
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(self.error("empty step"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(self.error(format!("whitespace in name '{}'", name)));
        }
        Ok(name)
    }

    fn predicate(&mut self) -> Result<Predicate> {
        match self.chars.next() {
            Some((_, '@')) => {}
            _ => return Err(self.error("predicates must start with '@'")),
        }
        let attr = self.name()?;
        match self.chars.next() {
            Some((_, ']')) => Ok(Predicate::Has(attr)),
            Some((_, '=')) => {
                let value = self.quoted()?;
                match self.chars.next() {
                    Some((_, ']')) => Ok(Predicate::Equals(attr, value)),
                    _ => Err(self.error("unterminated predicate")),
                }
            }
            _ => Err(self.error("unterminated predicate")),
        }
    }

    fn quoted(&mut self) -> Result<String> {
        let quote = match self.chars.next() {
            Some((_, q @ ('\'' | '"'))) => q,
            _ => return Err(self.error("expected a quoted value")),
        };
        let mut value = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == quote {
                return Ok(value);
            }
            value.push(c);
        }
        Err(self.error("unterminated string"))
    }
}

/// Structural query capability over a tree.
///
/// Rule code depends on this trait rather than on the query syntax, so the
/// selection mechanism can change without touching the rules.
pub trait NodeQuery {
    /// First matching element, if any.
    fn select(&self, from: NodeId, path: &str) -> Result<Option<NodeId>>;

    /// Every matching element, in document order.
    fn select_all(&self, from: NodeId, path: &str) -> Result<Vec<NodeId>>;

    /// Description of a node for error messages.
    fn describe_node(&self, node: NodeId) -> String;

    /// First matching element, or [`Error::NoMatch`].
    fn select_one(&self, from: NodeId, path: &str) -> Result<NodeId> {
        self.select(from, path)?.ok_or_else(|| Error::NoMatch {
            query: path.to_string(),
            context: self.describe_node(from),
        })
    }
}

impl NodeQuery for Document {
    fn select(&self, from: NodeId, path: &str) -> Result<Option<NodeId>> {
        Ok(Query::parse(path)?.evaluate(self, from).first().copied())
    }

    fn select_all(&self, from: NodeId, path: &str) -> Result<Vec<NodeId>> {
        Ok(Query::parse(path)?.evaluate(self, from))
    }

    fn describe_node(&self, node: NodeId) -> String {
        self.describe(node)
    }
}
