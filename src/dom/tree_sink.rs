//! html5ever tree builder output into an [`ArenaDom`].

use std::borrow::Cow;
use std::cell::{Cell, Ref, RefCell};

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName, local_name, ns};

use super::arena::{ArenaDom, ArenaNodeId, Attribute};

/// Name reported for handles that are not elements.
static NO_NAME: QualName = QualName {
    prefix: None,
    ns: ns!(),
    local: local_name!(""),
};

/// Builds an [`ArenaDom`] while html5ever parses.
///
/// `TreeSink` methods take `&self`, so the DOM sits behind a `RefCell`.
/// Handles are plain node ids.
pub struct ArenaSink {
    dom: RefCell<ArenaDom>,
    errors: Cell<usize>,
}

impl Default for ArenaSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(ArenaDom::new()),
            errors: Cell::new(0),
        }
    }

    /// Finish parsing and take the DOM.
    pub fn into_dom(self) -> ArenaDom {
        let errors = self.errors.get();
        if errors > 0 {
            log::trace!("html parser recovered from {errors} errors");
        }
        self.dom.into_inner()
    }

    fn convert(attrs: Vec<Html5Attribute>) -> impl Iterator<Item = Attribute> {
        attrs.into_iter().map(|a| Attribute {
            name: a.name,
            value: a.value.to_string(),
        })
    }

    fn into_node(dom: &mut ArenaDom, child: NodeOrText<ArenaNodeId>) -> ArenaNodeId {
        match child {
            NodeOrText::AppendNode(node) => node,
            NodeOrText::AppendText(text) => dom.create_text(text.to_string()),
        }
    }
}

impl TreeSink for ArenaSink {
    type Handle = ArenaNodeId;
    type Output = Self;
    type ElemName<'a>
        = Ref<'a, QualName>
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, _msg: Cow<'static, str>) {
        // Recover like browsers do; only the count is kept
        self.errors.set(self.errors.get() + 1);
    }

    fn get_document(&self) -> ArenaNodeId {
        self.dom.borrow().document()
    }

    fn elem_name<'a>(&'a self, target: &'a ArenaNodeId) -> Ref<'a, QualName> {
        Ref::map(self.dom.borrow(), |dom| {
            dom.qual_name(*target).unwrap_or(&NO_NAME)
        })
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> ArenaNodeId {
        let attrs = Self::convert(attrs).collect();
        self.dom.borrow_mut().create_element(name, attrs)
    }

    fn create_comment(&self, text: StrTendril) -> ArenaNodeId {
        self.dom.borrow_mut().create_comment(text.to_string())
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> ArenaNodeId {
        // Only reachable from XML; an empty comment keeps the handle valid
        self.dom.borrow_mut().create_comment(String::new())
    }

    fn append(&self, parent: &ArenaNodeId, child: NodeOrText<ArenaNodeId>) {
        let mut dom = self.dom.borrow_mut();
        match child {
            NodeOrText::AppendText(text) => dom.append_text(*parent, &text),
            NodeOrText::AppendNode(node) => dom.append(*parent, node),
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &ArenaNodeId,
        prev_element: &ArenaNodeId,
        child: NodeOrText<ArenaNodeId>,
    ) {
        let has_parent = self
            .dom
            .borrow()
            .get(*element)
            .is_some_and(|n| n.parent.is_some());
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        let mut dom = self.dom.borrow_mut();
        let doctype = dom.create_doctype(name.to_string());
        let document = dom.document();
        dom.append(document, doctype);
    }

    fn get_template_contents(&self, target: &ArenaNodeId) -> ArenaNodeId {
        // No separate fragment: template children stay under the element
        *target
    }

    fn same_node(&self, x: &ArenaNodeId, y: &ArenaNodeId) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &ArenaNodeId, new_node: NodeOrText<ArenaNodeId>) {
        let mut dom = self.dom.borrow_mut();
        let node = Self::into_node(&mut dom, new_node);
        dom.insert_before(*sibling, node);
    }

    fn add_attrs_if_missing(&self, target: &ArenaNodeId, attrs: Vec<Html5Attribute>) {
        self.dom
            .borrow_mut()
            .add_missing_attrs(*target, Self::convert(attrs));
    }

    fn remove_from_parent(&self, target: &ArenaNodeId) {
        self.dom.borrow_mut().detach(*target);
    }

    fn reparent_children(&self, node: &ArenaNodeId, new_parent: &ArenaNodeId) {
        let mut dom = self.dom.borrow_mut();
        let children: Vec<_> = dom.children(*node).collect();
        for child in children {
            dom.detach(child);
            dom.append(*new_parent, child);
        }
    }
}
