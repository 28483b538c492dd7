//! Element handle over the arena DOM.
//!
//! [`ElementRef`] is the crate's adapter between the parsed document and
//! the rest of the crate: it implements `selectors::Element` so candidate
//! links can be found with CSS selectors, and [`LinkNode`] so the detector
//! can inspect them.

use std::borrow::Cow;
use std::fmt;

use html5ever::{LocalName, Namespace, ns};
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::MatchingContext;
use selectors::matching::ElementSelectorFlags;
use selectors::parser::SelectorParseErrorKind;
use selectors::{OpaqueElement, SelectorImpl};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};
use crate::detect::{LinkNode, NodeKind};

/// Selector implementation for the selectors crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSelectors;

/// Identifier string type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct IdentStr(pub String);

impl precomputed_hash::PrecomputedHash for IdentStr {
    fn precomputed_hash(&self) -> u32 {
        self.0
            .bytes()
            .fold(0u32, |h, byte| h.wrapping_mul(31).wrapping_add(byte as u32))
    }
}

impl AsRef<str> for IdentStr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for IdentStr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IdentStr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl cssparser::ToCss for IdentStr {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(&self.0)
    }
}

/// Wrapper type for LocalName that implements ToCss.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssLocalName(pub LocalName);

impl precomputed_hash::PrecomputedHash for CssLocalName {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

impl cssparser::ToCss for CssLocalName {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(self.0.as_ref())
    }
}

impl From<String> for CssLocalName {
    fn from(s: String) -> Self {
        Self(LocalName::from(s))
    }
}

impl From<&str> for CssLocalName {
    fn from(s: &str) -> Self {
        Self(LocalName::from(s))
    }
}

impl AsRef<str> for CssLocalName {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

/// Wrapper type for Namespace that implements ToCss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CssNamespace(pub Namespace);

impl precomputed_hash::PrecomputedHash for CssNamespace {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

impl cssparser::ToCss for CssNamespace {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(self.0.as_ref())
    }
}

impl From<String> for CssNamespace {
    fn from(s: String) -> Self {
        Self(Namespace::from(s))
    }
}

impl From<&str> for CssNamespace {
    fn from(s: &str) -> Self {
        Self(Namespace::from(s))
    }
}

impl<'i> selectors::parser::Parser<'i> for LinkSelectors {
    type Impl = LinkSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

/// Pseudo-elements never match a static document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoElement {}

impl cssparser::ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = LinkSelectors;

    fn accepts_state_pseudo_classes(&self) -> bool {
        match *self {}
    }

    fn valid_after_slotted(&self) -> bool {
        match *self {}
    }
}

/// No non-tree-structural pseudo-classes are supported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NonTSPseudoClass {}

impl selectors::parser::NonTSPseudoClass for NonTSPseudoClass {
    type Impl = LinkSelectors;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl cssparser::ToCss for NonTSPseudoClass {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl SelectorImpl for LinkSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = IdentStr;
    type Identifier = IdentStr;
    type LocalName = CssLocalName;
    type NamespaceUrl = CssNamespace;
    type NamespacePrefix = IdentStr;
    type BorrowedLocalName = CssLocalName;
    type BorrowedNamespaceUrl = CssNamespace;
    type NonTSPseudoClass = NonTSPseudoClass;
    type PseudoElement = PseudoElement;
}

/// Reference to a node in the ArenaDom.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    pub dom: &'a ArenaDom,
    pub id: ArenaNodeId,
}

impl<'a> ElementRef<'a> {
    pub fn new(dom: &'a ArenaDom, id: ArenaNodeId) -> Self {
        Self { dom, id }
    }

    fn is_html_element(&self, tag: &str) -> bool {
        self.dom.element_namespace(self.id) == Some(&ns!(html))
            && self
                .dom
                .element_name(self.id)
                .is_some_and(|n| n.as_ref() == tag)
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("name", &self.dom.element_name(self.id))
            .finish()
    }
}

impl LinkNode for ElementRef<'_> {
    fn kind(&self) -> NodeKind {
        if self.is_html_element("a") {
            NodeKind::Anchor
        } else if self.is_html_element("div") {
            NodeKind::Div
        } else {
            NodeKind::Other
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.dom.get_attr(self.id, name)
    }

    fn text_content(&self) -> Option<Cow<'_, str>> {
        self.dom.get(self.id)?;
        Some(self.dom.text_content(self.id))
    }

    fn child_element_count(&self) -> usize {
        self.dom.child_element_count(self.id)
    }
}

impl<'a> selectors::Element for ElementRef<'a> {
    type Impl = LinkSelectors;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self)
    }

    fn parent_element(&self) -> Option<Self> {
        let node = self.dom.get(self.id)?;
        self.dom
            .is_element(node.parent)
            .then(|| Self::new(self.dom, node.parent))
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let mut current = self.dom.get(self.id)?.prev_sibling;
        while current.is_some() {
            if self.dom.is_element(current) {
                return Some(Self::new(self.dom, current));
            }
            current = self.dom.get(current)?.prev_sibling;
        }
        None
    }

    fn next_sibling_element(&self) -> Option<Self> {
        let mut current = self.dom.get(self.id)?.next_sibling;
        while current.is_some() {
            if self.dom.is_element(current) {
                return Some(Self::new(self.dom, current));
            }
            current = self.dom.get(current)?.next_sibling;
        }
        None
    }

    fn first_element_child(&self) -> Option<Self> {
        self.dom
            .children(self.id)
            .find(|&child| self.dom.is_element(child))
            .map(|child| Self::new(self.dom, child))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        self.dom.element_namespace(self.id) == Some(&ns!(html))
    }

    fn has_local_name(&self, name: &CssLocalName) -> bool {
        self.dom
            .element_name(self.id)
            .is_some_and(|n| n == &name.0)
    }

    fn has_namespace(&self, ns: &CssNamespace) -> bool {
        self.dom
            .element_namespace(self.id)
            .is_some_and(|n| n == &ns.0)
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.dom.element_name(self.id) == other.dom.element_name(other.id)
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssNamespace>,
        local_name: &CssLocalName,
        operation: &AttrSelectorOperation<&IdentStr>,
    ) -> bool {
        self.dom
            .attrs(self.id)
            .iter()
            .filter(|attr| match ns {
                NamespaceConstraint::Any => true,
                NamespaceConstraint::Specific(ns) => attr.name.ns == ns.0,
            })
            .find(|attr| attr.name.local == local_name.0)
            .is_some_and(|attr| operation.eval_str(&attr.value))
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &NonTSPseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pc {}
    }

    fn match_pseudo_element(
        &self,
        pe: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pe {}
    }

    fn is_link(&self) -> bool {
        self.is_html_element("a") && self.dom.get_attr(self.id, "href").is_some()
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.dom
            .get_attr(self.id, "id")
            .is_some_and(|elem_id| case_sensitivity.eq(elem_id.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.dom
            .classes(self.id)
            .any(|c| case_sensitivity.eq(c.as_bytes(), name.0.as_bytes()))
    }

    fn imported_part(&self, _name: &IdentStr) -> Option<IdentStr> {
        None
    }

    fn is_part(&self, _name: &IdentStr) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.dom
            .children(self.id)
            .all(|child| match self.dom.get(child).map(|n| &n.data) {
                Some(ArenaNodeData::Element { .. }) => false,
                Some(ArenaNodeData::Text(t)) => t.is_empty(),
                _ => true,
            })
    }

    fn is_root(&self) -> bool {
        self.dom
            .get(self.id)
            .and_then(|n| self.dom.get(n.parent))
            .is_some_and(|parent| matches!(parent.data, ArenaNodeData::Document))
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn add_element_unique_hashes(&self, _filter: &mut selectors::bloom::BloomFilter) -> bool {
        false
    }

    fn has_custom_state(&self, _name: &IdentStr) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Selector, parse_html};

    fn first<'a>(dom: &'a ArenaDom, tag: &str) -> ElementRef<'a> {
        ElementRef::new(dom, dom.find_by_tag(tag).unwrap())
    }

    fn matches(elem: ElementRef<'_>, selector: &str) -> bool {
        Selector::parse(selector).unwrap().matches(elem)
    }

    #[test]
    fn test_tag_and_class_selectors() {
        let dom = parse_html(r#"<div class="metadata-link-inner other">x</div>"#);
        let div = first(&dom, "div");

        assert!(matches(div, "div"));
        assert!(matches(div, ".metadata-link-inner"));
        assert!(matches(div, "div.other"));
        assert!(!matches(div, "a"));
        assert!(!matches(div, ".missing"));
    }

    #[test]
    fn test_attribute_substring_selector() {
        let dom = parse_html(
            r#"<a href="https://example.com">1</a><a href="/relative">2</a><a>3</a>"#,
        );
        let selector = Selector::parse(r#"a[href*="://"]"#).unwrap();
        let anchors: Vec<_> = dom
            .descendants(dom.document())
            .filter(|&id| dom.element_name(id).is_some_and(|n| n.as_ref() == "a"))
            .map(|id| selector.matches(ElementRef::new(&dom, id)))
            .collect();

        assert_eq!(anchors, vec![true, false, false]);
    }

    #[test]
    fn test_descendant_selector() {
        let dom = parse_html(
            r#"<div class="metadata-property-value"><span><div class="metadata-link-inner">x</div></span></div>"#,
        );
        let inner = ElementRef::new(
            &dom,
            dom.descendants(dom.document())
                .find(|&id| dom.classes(id).any(|c| c == "metadata-link-inner"))
                .unwrap(),
        );

        assert!(matches(inner, ".metadata-property-value .metadata-link-inner"));
        assert!(!matches(inner, ".metadata-property-value > .metadata-link-inner"));
        assert!(matches(inner, "span > .metadata-link-inner"));
    }

    #[test]
    fn test_link_node_kind() {
        let dom = parse_html(r#"<a href="https://a.com">a</a><div>d</div><p>p</p>"#);

        assert_eq!(first(&dom, "a").kind(), NodeKind::Anchor);
        assert_eq!(first(&dom, "div").kind(), NodeKind::Div);
        assert_eq!(first(&dom, "p").kind(), NodeKind::Other);

        let text = dom.children(dom.find_by_tag("p").unwrap()).next().unwrap();
        assert_eq!(ElementRef::new(&dom, text).kind(), NodeKind::Other);
    }

    #[test]
    fn test_svg_anchor_is_not_an_html_anchor() {
        let dom = parse_html(r#"<svg><a href="https://a.com">https://a.com</a></svg>"#);
        assert_eq!(first(&dom, "a").kind(), NodeKind::Other);
    }

    #[test]
    fn test_link_node_accessors() {
        let dom = parse_html(r#"<a href="https://a.com"><img src="i.png"> https://a.com</a>"#);
        let a = first(&dom, "a");

        assert_eq!(a.attr("href"), Some("https://a.com"));
        assert_eq!(a.child_element_count(), 1);
        assert_eq!(a.text_content().as_deref(), Some(" https://a.com"));
    }
}
