//! Structural edit primitives.
//!
//! Every primitive keeps the arena a tree: an element has at most one parent,
//! appears once in that parent's child list, and never becomes its own
//! ancestor.

use crate::{Attribute, Document, Element, Error, NodeId, Result};

impl Document {
    /// Create a detached element qualified to the document namespace.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        let root = self.element(self.root());
        let element = Element::new(name, root.prefix.clone(), root.namespace.clone());
        self.push(element)
    }

    /// Create an element and insert it at `index` among `parent`'s children.
    ///
    /// `index` may equal the current child count, which appends.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        name: &str,
        text: Option<&str>,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId> {
        let id = self.create_element(name);
        {
            let element = self.element_mut(id);
            element.text = text.map(str::to_string);
            element.attributes = attrs
                .iter()
                .map(|(name, value)| Attribute::new(*name, *value))
                .collect();
        }
        self.move_node(id, parent, index)?;
        Ok(id)
    }

    /// Create an element as the last child of `parent`.
    pub fn append_child(
        &mut self,
        parent: NodeId,
        name: &str,
        text: Option<&str>,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId> {
        let index = self.children(parent).len();
        self.insert_child(parent, index, name, text, attrs)
    }

    /// Detach `node` and reinsert it under `new_parent` at `index`.
    ///
    /// `index` counts positions in `new_parent`'s child list after `node` has
    /// been detached, so moving a node to index 0 of its own parent makes it
    /// the first child.
    pub fn move_node(&mut self, node: NodeId, new_parent: NodeId, index: usize) -> Result<()> {
        if node == self.root() {
            return Err(self.invalid_move(node, new_parent, "the root cannot be moved"));
        }
        if self.is_within(new_parent, node) {
            return Err(self.invalid_move(node, new_parent, "target lies inside the moved node"));
        }
        if self.text(new_parent).is_some() {
            return Err(self.invalid_move(node, new_parent, "target holds text content"));
        }

        let len_after_detach = self.children(new_parent).len()
            - usize::from(self.parent(node) == Some(new_parent));
        if index > len_after_detach {
            return Err(self.invalid_move(
                node,
                new_parent,
                &format!("index {} exceeds {} children", index, len_after_detach),
            ));
        }

        self.detach(node);
        self.element_mut(new_parent).children.insert(index, node);
        self.element_mut(node).parent = Some(new_parent);
        Ok(())
    }

    /// Move `node` so that it sits immediately before `reference`.
    pub fn move_before(&mut self, node: NodeId, reference: NodeId) -> Result<()> {
        if node == reference {
            return Ok(());
        }
        let parent = self
            .parent(reference)
            .ok_or_else(|| self.invalid_move(node, reference, "reference has no parent"))?;
        if self.is_within(parent, node) {
            return Err(self.invalid_move(node, parent, "target lies inside the moved node"));
        }
        self.detach(node);
        let index = self
            .index_in_parent(reference)
            .ok_or_else(|| self.invalid_move(node, reference, "reference is detached"))?;
        self.move_node(node, parent, index)
    }

    /// Move `node` to the end of its current parent's child list.
    pub fn move_to_end(&mut self, node: NodeId) -> Result<()> {
        let parent = self
            .parent(node)
            .ok_or_else(|| self.invalid_move(node, node, "node is detached"))?;
        let last = self.children(parent).len() - 1;
        self.move_node(node, parent, last)
    }

    /// Move `node` to the front of its current parent's child list.
    pub fn move_to_front(&mut self, node: NodeId) -> Result<()> {
        let parent = self
            .parent(node)
            .ok_or_else(|| self.invalid_move(node, node, "node is detached"))?;
        self.move_node(node, parent, 0)
    }

    /// Detach `node` from the tree. The subtree stays in the arena and can be
    /// attached again later.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.element_mut(node).parent.take() {
            self.element_mut(parent).children.retain(|&c| c != node);
        }
    }

    /// Deep-copy `node` and its subtree. The copy is detached.
    pub fn clone_subtree(&mut self, node: NodeId) -> NodeId {
        let mut copy = self.element(node).clone();
        copy.parent = None;
        copy.children = Vec::new();
        let id = self.push(copy);

        let children = self.children(node).to_vec();
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.element_mut(child_copy).parent = Some(id);
            self.element_mut(id).children.push(child_copy);
        }
        id
    }

    /// Append `suffix` to every `macro` attribute in the subtree of `node`
    /// (including `node` itself) and drop `prefix`/`suffix` from those
    /// elements.
    pub fn retarget_macro_refs(&mut self, node: NodeId, suffix: &str) {
        let targets: Vec<NodeId> = self
            .descendants(node)
            .filter(|&id| self.element(id).has_attribute("macro"))
            .collect();
        for id in targets {
            let element = self.element_mut(id);
            for attr in element.attributes.iter_mut() {
                if attr.name == "macro" {
                    attr.value.push_str(suffix);
                }
            }
            element
                .attributes
                .retain(|a| a.name != "prefix" && a.name != "suffix");
        }
    }

    /// Replace the implicit family/given join of a `name` element with two
    /// explicit `name-part` children: family (followed by `delimiter`), then
    /// given.
    pub fn split_name(&mut self, name_node: NodeId, delimiter: &str) -> Result<()> {
        if self.name(name_node) != "name" {
            return Err(Error::UnexpectedElement {
                expected: "name".to_string(),
                found: self.describe(name_node),
            });
        }
        let existing: Vec<NodeId> = self
            .children(name_node)
            .iter()
            .copied()
            .filter(|&c| self.name(c) == "name-part")
            .collect();
        for part in existing {
            self.remove(part);
        }
        self.append_child(
            name_node,
            "name-part",
            None,
            &[("name", "family"), ("suffix", delimiter)],
        )?;
        self.append_child(name_node, "name-part", None, &[("name", "given")])?;
        Ok(())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let element = self.element_mut(node);
        match element.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => element.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Remove an attribute if present, returning its value.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> Option<String> {
        let element = self.element_mut(node);
        let index = element.attributes.iter().position(|a| a.name == name)?;
        Some(element.attributes.remove(index).value)
    }

    /// Remove an attribute that must be present.
    pub fn take_attr(&mut self, node: NodeId, name: &str) -> Result<String> {
        self.remove_attr(node, name)
            .ok_or_else(|| Error::MissingAttribute {
                element: self.describe(node),
                attribute: name.to_string(),
            })
    }

    /// Rename an element in place, keeping its prefix and namespace.
    pub fn set_name(&mut self, node: NodeId, name: &str) {
        self.element_mut(node).name = name.to_string();
    }

    /// Replace the text content of an element that has no children.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        if !self.children(node).is_empty() {
            return Err(Error::MixedContent {
                element: self.element(node).qualified_name(),
            });
        }
        self.element_mut(node).text = Some(text.to_string());
        Ok(())
    }

    fn invalid_move(&self, node: NodeId, target: NodeId, reason: &str) -> Error {
        Error::InvalidMove {
            node: self.describe(node),
            target: self.describe(target),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{CSL_NAMESPACE, Error, NodeQuery, parse};

    const LAYOUT: &str = r#"<style xmlns="http://purl.org/net/xbiblio/csl">
  <layout suffix=".">
    <text macro="contributors"/>
    <text macro="date" prefix=" (" suffix=")"/>
    <group delimiter=", ">
      <text macro="title" prefix=". "/>
      <text variable="page"/>
    </group>
  </layout>
</style>"#;

    fn names(doc: &crate::Document, parent: crate::NodeId) -> Vec<String> {
        doc.children(parent)
            .iter()
            .map(|&c| {
                doc.attr(c, "macro")
                    .or_else(|| doc.attr(c, "variable"))
                    .unwrap_or(doc.name(c))
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_created_elements_use_document_namespace() {
        let mut doc = parse(LAYOUT).unwrap();
        let layout = doc.select_one(doc.root(), "layout").unwrap();
        let label = doc
            .append_child(layout, "label", None, &[("variable", "page")])
            .unwrap();
        assert_eq!(doc.element(label).namespace.as_deref(), Some(CSL_NAMESPACE));
        assert_eq!(
            doc.select_one(layout, "label[@variable='page']").unwrap(),
            label
        );
    }

    #[test]
    fn test_insert_child_positions() {
        let mut doc = parse(LAYOUT).unwrap();
        let layout = doc.select_one(doc.root(), "layout").unwrap();
        doc.insert_child(layout, 0, "text", None, &[("value", "first")])
            .unwrap();
        assert_eq!(doc.attr(doc.children(layout)[0], "value"), Some("first"));

        let err = doc.insert_child(layout, 10, "text", None, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidMove { .. }));
    }

    #[test]
    fn test_move_within_parent() {
        let mut doc = parse(LAYOUT).unwrap();
        let layout = doc.select_one(doc.root(), "layout").unwrap();
        let date = doc.select_one(layout, "text[@macro='date']").unwrap();
        doc.move_node(date, layout, 0).unwrap();
        assert_eq!(names(&doc, layout), vec!["date", "contributors", "group"]);

        doc.move_to_end(date).unwrap();
        assert_eq!(names(&doc, layout), vec!["contributors", "group", "date"]);
    }

    #[test]
    fn test_move_before_sibling_swaps() {
        let mut doc = parse(LAYOUT).unwrap();
        let layout = doc.select_one(doc.root(), "layout").unwrap();
        let date = doc.select_one(layout, "text[@macro='date']").unwrap();
        let previous = doc.previous_sibling(date).unwrap();
        doc.move_before(date, previous).unwrap();
        assert_eq!(names(&doc, layout), vec!["date", "contributors", "group"]);
    }

    #[test]
    fn test_move_across_parents() {
        let mut doc = parse(LAYOUT).unwrap();
        let layout = doc.select_one(doc.root(), "layout").unwrap();
        let group = doc.select_one(layout, "group").unwrap();
        let page = doc.select_one(group, "text[@variable='page']").unwrap();
        doc.move_node(page, layout, 0).unwrap();
        assert_eq!(doc.parent(page), Some(layout));
        assert_eq!(names(&doc, group), vec!["title"]);
    }

    #[test]
    fn test_move_into_own_subtree_is_rejected() {
        let mut doc = parse(LAYOUT).unwrap();
        let layout = doc.select_one(doc.root(), "layout").unwrap();
        let group = doc.select_one(layout, "group").unwrap();
        assert!(matches!(
            doc.move_node(layout, group, 0),
            Err(Error::InvalidMove { .. })
        ));
        assert!(matches!(
            doc.move_node(doc.root(), layout, 0),
            Err(Error::InvalidMove { .. })
        ));
    }

    #[test]
    fn test_clone_subtree_is_independent() {
        let mut doc = parse(LAYOUT).unwrap();
        let layout = doc.select_one(doc.root(), "layout").unwrap();
        let copy = doc.clone_subtree(layout);
        assert_eq!(doc.parent(copy), None);

        let copied_title = doc.select_one(copy, "group/text[@macro='title']").unwrap();
        doc.set_attr(copied_title, "macro", "changed");

        let original_title = doc.select_one(layout, "group/text").unwrap();
        assert_eq!(doc.attr(original_title, "macro"), Some("title"));
        assert_ne!(copied_title, original_title);
    }

    #[test]
    fn test_retarget_macro_refs() {
        let mut doc = parse(LAYOUT).unwrap();
        let layout = doc.select_one(doc.root(), "layout").unwrap();
        doc.retarget_macro_refs(layout, "-ja");

        let date = doc.select_one(layout, "text[@macro='date-ja']").unwrap();
        assert_eq!(doc.attr(date, "prefix"), None);
        assert_eq!(doc.attr(date, "suffix"), None);
        assert!(doc.select(layout, "group/text[@macro='title-ja']").unwrap().is_some());
        // Non-macro nodes keep their attributes
        assert_eq!(doc.attr(layout, "suffix"), Some("."));
        let group = doc.select_one(layout, "group").unwrap();
        assert_eq!(doc.attr(group, "delimiter"), Some(", "));
    }

    #[test]
    fn test_split_name() {
        let mut doc = parse(
            r#"<style xmlns="http://purl.org/net/xbiblio/csl"><names><name><name-part name="family" text-case="uppercase"/></name></names></style>"#,
        )
        .unwrap();
        let name = doc.select_one(doc.root(), "names/name").unwrap();
        doc.split_name(name, " ").unwrap();

        let parts = doc.select_all(name, "name-part").unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(doc.attr(parts[0], "name"), Some("family"));
        assert_eq!(doc.attr(parts[0], "suffix"), Some(" "));
        assert_eq!(doc.attr(parts[1], "name"), Some("given"));

        let names_node = doc.select_one(doc.root(), "names").unwrap();
        assert!(matches!(
            doc.split_name(names_node, " "),
            Err(Error::UnexpectedElement { .. })
        ));
    }

    #[test]
    fn test_attribute_helpers() {
        let mut doc = parse(LAYOUT).unwrap();
        let layout = doc.select_one(doc.root(), "layout").unwrap();
        doc.set_attr(layout, "suffix", "");
        assert_eq!(doc.attr(layout, "suffix"), Some(""));
        assert_eq!(doc.take_attr(layout, "suffix").unwrap(), "");
        assert!(matches!(
            doc.take_attr(layout, "suffix"),
            Err(Error::MissingAttribute { .. })
        ));
        assert_eq!(doc.remove_attr(layout, "suffix"), None);
    }

    #[test]
    fn test_set_name() {
        let mut doc = parse(LAYOUT).unwrap();
        let group = doc.select_one(doc.root(), "layout/group").unwrap();
        doc.set_name(group, "choose");
        assert!(doc.select(doc.root(), "layout/group").unwrap().is_none());
        assert_eq!(doc.select_one(doc.root(), "layout/choose").unwrap(), group);
    }

    #[test]
    fn test_set_text_rejects_parents() {
        let mut doc = parse(LAYOUT).unwrap();
        let layout = doc.select_one(doc.root(), "layout").unwrap();
        assert!(doc.set_text(layout, "x").is_err());
        let page = doc.select_one(layout, "group/text[@variable='page']").unwrap();
        doc.set_text(page, "x").unwrap();
        assert_eq!(doc.text(page), Some("x"));
    }
}
