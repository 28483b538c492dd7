//! Arena-based DOM for HTML parsing.
//!
//! Nodes live in one vector and link to each other by index. A node is never
//! freed: detaching only unlinks it, so every [`ArenaNodeId`] handed out stays
//! valid for the life of the DOM.

use std::borrow::Cow;

use html5ever::{LocalName, Namespace, QualName};

/// Index of a node in its [`ArenaDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaNodeId(pub u32);

impl ArenaNodeId {
    /// Marks a missing parent, sibling or child.
    pub const NONE: ArenaNodeId = ArenaNodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        *self != Self::NONE
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

#[derive(Debug, Clone)]
pub enum ArenaNodeData {
    Document,
    Element { name: QualName, attrs: Vec<Attribute> },
    Text(String),
    Comment(String),
    /// `<!DOCTYPE name>`; public and system identifiers are not kept.
    Doctype(String),
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

#[derive(Debug)]
pub struct ArenaNode {
    pub data: ArenaNodeData,
    pub parent: ArenaNodeId,
    pub first_child: ArenaNodeId,
    pub last_child: ArenaNodeId,
    pub prev_sibling: ArenaNodeId,
    pub next_sibling: ArenaNodeId,
}

impl From<ArenaNodeData> for ArenaNode {
    fn from(data: ArenaNodeData) -> Self {
        Self {
            data,
            parent: ArenaNodeId::NONE,
            first_child: ArenaNodeId::NONE,
            last_child: ArenaNodeId::NONE,
            prev_sibling: ArenaNodeId::NONE,
            next_sibling: ArenaNodeId::NONE,
        }
    }
}

/// A parsed document.
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
}

impl ArenaDom {
    /// An empty document.
    pub fn new() -> Self {
        Self {
            nodes: vec![ArenaNodeData::Document.into()],
        }
    }

    fn push(&mut self, data: ArenaNodeData) -> ArenaNodeId {
        self.nodes.push(data.into());
        ArenaNodeId(self.nodes.len() as u32 - 1)
    }

    /// The document root, always the first node.
    pub fn document(&self) -> ArenaNodeId {
        ArenaNodeId(0)
    }

    pub fn get(&self, id: ArenaNodeId) -> Option<&ArenaNode> {
        self.nodes.get(id.0 as usize)
    }

    fn get_mut(&mut self, id: ArenaNodeId) -> Option<&mut ArenaNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> ArenaNodeId {
        self.push(ArenaNodeData::Element { name, attrs })
    }

    pub fn create_text(&mut self, text: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Text(text))
    }

    pub fn create_comment(&mut self, text: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Comment(text))
    }

    pub fn create_doctype(&mut self, name: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Doctype(name))
    }

    /// Link `node` into `parent` between `prev` and `next`.
    ///
    /// `node` must be detached; `prev` and `next` must be adjacent children of
    /// `parent` (either may be `NONE` at the ends).
    fn splice(
        &mut self,
        node: ArenaNodeId,
        parent: ArenaNodeId,
        prev: ArenaNodeId,
        next: ArenaNodeId,
    ) {
        if let Some(n) = self.get_mut(node) {
            n.parent = parent;
            n.prev_sibling = prev;
            n.next_sibling = next;
        }

        match self.get_mut(prev) {
            Some(p) => p.next_sibling = node,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.first_child = node;
                }
            }
        }
        match self.get_mut(next) {
            Some(n) => n.prev_sibling = node,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.last_child = node;
                }
            }
        }
    }

    /// Make `child` the last child of `parent`.
    pub fn append(&mut self, parent: ArenaNodeId, child: ArenaNodeId) {
        let Some(last) = self.get(parent).map(|p| p.last_child) else {
            return;
        };
        self.splice(child, parent, last, ArenaNodeId::NONE);
    }

    /// Put `node` right before `sibling`, under the same parent.
    pub fn insert_before(&mut self, sibling: ArenaNodeId, node: ArenaNodeId) {
        let Some((parent, prev)) = self.get(sibling).map(|s| (s.parent, s.prev_sibling)) else {
            return;
        };
        self.splice(node, parent, prev, sibling);
    }

    /// Append text to `parent`, extending its last child if that is text.
    pub fn append_text(&mut self, parent: ArenaNodeId, text: &str) {
        let last = self.get(parent).map_or(ArenaNodeId::NONE, |p| p.last_child);
        if let Some(ArenaNode {
            data: ArenaNodeData::Text(existing),
            ..
        }) = self.get_mut(last)
        {
            existing.push_str(text);
            return;
        }

        let node = self.create_text(text.to_string());
        self.append(parent, node);
    }

    /// Unlink `id` from its parent and siblings. Its own children stay.
    pub fn detach(&mut self, id: ArenaNodeId) {
        let Some(&ArenaNode {
            parent,
            prev_sibling: prev,
            next_sibling: next,
            ..
        }) = self.get(id)
        else {
            return;
        };

        match self.get_mut(prev) {
            Some(p) => p.next_sibling = next,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.first_child = next;
                }
            }
        }
        match self.get_mut(next) {
            Some(n) => n.prev_sibling = prev,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.last_child = prev;
                }
            }
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = ArenaNodeId::NONE;
            node.prev_sibling = ArenaNodeId::NONE;
            node.next_sibling = ArenaNodeId::NONE;
        }
    }

    /// Replace all children of `id` with a single text node, like assigning
    /// `textContent`. An empty string leaves it without children.
    pub fn set_text_content(&mut self, id: ArenaNodeId, text: &str) {
        if let Some(ArenaNode {
            data: ArenaNodeData::Text(existing),
            ..
        }) = self.get_mut(id)
        {
            text.clone_into(existing);
            return;
        }

        let children: Vec<_> = self.children(id).collect();
        for child in children {
            self.detach(child);
        }
        if !text.is_empty() {
            let node = self.create_text(text.to_string());
            self.append(id, node);
        }
    }

    /// Add each attribute `id` does not already have.
    pub fn add_missing_attrs(&mut self, id: ArenaNodeId, attrs: impl IntoIterator<Item = Attribute>) {
        if let Some(ArenaNode {
            data: ArenaNodeData::Element { attrs: existing, .. },
            ..
        }) = self.get_mut(id)
        {
            for attr in attrs {
                if existing.iter().all(|a| a.name != attr.name) {
                    existing.push(attr);
                }
            }
        }
    }

    pub fn children(&self, parent: ArenaNodeId) -> ChildrenIter<'_> {
        ChildrenIter {
            dom: self,
            current: self.get(parent).map_or(ArenaNodeId::NONE, |p| p.first_child),
        }
    }

    /// `root` and everything below it, in document order.
    pub fn descendants(&self, root: ArenaNodeId) -> Descendants<'_> {
        Descendants {
            dom: self,
            stack: self.get(root).map(|_| root).into_iter().collect(),
        }
    }

    /// First node in document order satisfying `predicate`.
    pub fn find<F>(&self, predicate: F) -> Option<ArenaNodeId>
    where
        F: Fn(&ArenaNode) -> bool,
    {
        self.descendants(self.document())
            .find(|&id| self.get(id).is_some_and(&predicate))
    }

    /// First element with local name `tag`.
    pub fn find_by_tag(&self, tag: &str) -> Option<ArenaNodeId> {
        self.descendants(self.document())
            .find(|&id| self.element_name(id).is_some_and(|n| n.as_ref() == tag))
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ChildrenIter<'a> {
    dom: &'a ArenaDom,
    current: ArenaNodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current;
        self.current = self.dom.get(id)?.next_sibling;
        Some(id)
    }
}

/// Pre-order walk of a subtree.
pub struct Descendants<'a> {
    dom: &'a ArenaDom,
    stack: Vec<ArenaNodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(self.dom.children(id));
        self.stack[start..].reverse();
        Some(id)
    }
}

// Element and text accessors. All of them answer `None`/empty for nodes of
// the wrong kind.
impl ArenaDom {
    pub fn qual_name(&self, id: ArenaNodeId) -> Option<&QualName> {
        match &self.get(id)?.data {
            ArenaNodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn element_name(&self, id: ArenaNodeId) -> Option<&LocalName> {
        self.qual_name(id).map(|name| &name.local)
    }

    pub fn element_namespace(&self, id: ArenaNodeId) -> Option<&Namespace> {
        self.qual_name(id).map(|name| &name.ns)
    }

    pub fn attrs(&self, id: ArenaNodeId) -> &[Attribute] {
        match self.get(id).map(|n| &n.data) {
            Some(ArenaNodeData::Element { attrs, .. }) => attrs,
            _ => &[],
        }
    }

    /// Value of the attribute with local name `name`, in any namespace.
    pub fn get_attr(&self, id: ArenaNodeId, name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|a| a.name.local.as_ref() == name)
            .map(|a| a.value.as_str())
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self, id: ArenaNodeId) -> impl Iterator<Item = &str> {
        self.get_attr(id, "class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    pub fn is_element(&self, id: ArenaNodeId) -> bool {
        self.qual_name(id).is_some()
    }

    pub fn is_text(&self, id: ArenaNodeId) -> bool {
        self.text(id).is_some()
    }

    /// Data of a text node.
    pub fn text(&self, id: ArenaNodeId) -> Option<&str> {
        match &self.get(id)?.data {
            ArenaNodeData::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Concatenated text of all text nodes in the subtree of `id`.
    ///
    /// Borrows when the text lives in a single node.
    pub fn text_content(&self, id: ArenaNodeId) -> Cow<'_, str> {
        if let Some(text) = self.text(id) {
            return Cow::Borrowed(text);
        }

        let mut children = self.children(id);
        match (children.next(), children.next()) {
            (None, _) => Cow::Borrowed(""),
            (Some(only), None) if self.is_text(only) => {
                Cow::Borrowed(self.text(only).unwrap_or_default())
            }
            _ => Cow::Owned(
                self.descendants(id)
                    .filter_map(|node| self.text(node))
                    .collect(),
            ),
        }
    }

    pub fn child_element_count(&self, id: ArenaNodeId) -> usize {
        self.children(id).filter(|&c| self.is_element(c)).count()
    }
}
