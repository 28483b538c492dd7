//! Owned node snapshot for hosts with their own DOM.

use std::borrow::Cow;

use super::{DATA_HREF_ATTR, HREF_ATTR, LinkNode, NodeKind};

/// Copy of the node state the detector reads.
///
/// Hosts that keep their own document tree (a browser, an editor plugin)
/// fill one of these per candidate node instead of implementing
/// [`LinkNode`] themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSnapshot {
    pub kind: NodeKind,
    pub href: Option<String>,
    pub data_href: Option<String>,
    pub text: Option<String>,
    pub child_elements: usize,
}

impl LinkSnapshot {
    /// An `<a>` with the given `href` and text.
    pub fn anchor(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Anchor,
            href: Some(href.into()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A metadata-panel `<div>` with the given `data-href` and text.
    pub fn metadata(data_href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Div,
            data_href: Some(data_href.into()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Set the number of element children.
    pub fn with_child_elements(mut self, count: usize) -> Self {
        self.child_elements = count;
        self
    }
}

impl LinkNode for LinkSnapshot {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match name {
            HREF_ATTR => self.href.as_deref(),
            DATA_HREF_ATTR => self.data_href.as_deref(),
            _ => None,
        }
    }

    fn text_content(&self) -> Option<Cow<'_, str>> {
        self.text.as_deref().map(Cow::Borrowed)
    }

    fn child_element_count(&self) -> usize {
        self.child_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_lookup() {
        let link = LinkSnapshot::anchor("https://a.com", "label");
        assert_eq!(link.attr("href"), Some("https://a.com"));
        assert_eq!(link.attr("data-href"), None);
        assert_eq!(link.attr("title"), None);
        assert_eq!(link.text_content().as_deref(), Some("label"));
    }

    #[test]
    fn test_default_is_not_a_link() {
        let node = LinkSnapshot::default();
        assert_eq!(node.kind(), NodeKind::Other);
        assert_eq!(node.text_content(), None);
        assert_eq!(node.child_element_count(), 0);
    }
}
