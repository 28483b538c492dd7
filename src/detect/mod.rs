//! Detection of links whose label is just their own URL.
//!
//! The detector works on anything implementing [`LinkNode`], a small
//! capability interface over a document node. The crate ships two
//! implementations: [`LinkSnapshot`], an owned copy of the few fields the
//! detector reads, and [`ElementRef`](crate::dom::ElementRef), which wraps a
//! node of the parsed [`ArenaDom`](crate::dom::ArenaDom).
//!
//! Rendering environments tend to append `/` to a bare-authority URL, so
//! `https://example.com` and `https://example.com/` are treated as the same
//! URL. A slash after a real path is significant and must match exactly.

mod snapshot;

pub use snapshot::LinkSnapshot;

use std::borrow::Cow;

use memchr::{memchr, memchr3};

use crate::format::is_external_url;

/// Attribute holding an anchor's target.
pub const HREF_ATTR: &str = "href";

/// Side attribute holding a metadata-panel link's target.
pub const DATA_HREF_ATTR: &str = "data-href";

/// Structural shape of a node, as far as link detection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// `<a>` element.
    Anchor,
    /// `<div>` element, the shape metadata panels render links with.
    Div,
    /// Any other element, text node, comment, ...
    #[default]
    Other,
}

/// Read access to the parts of a document node the detector inspects.
pub trait LinkNode {
    /// Shape of the node.
    fn kind(&self) -> NodeKind;

    /// Attribute value, `None` when the attribute is absent.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Rendered text of the node and its descendants.
    fn text_content(&self) -> Option<Cow<'_, str>>;

    /// Number of element children.
    fn child_element_count(&self) -> usize;
}

impl<T: LinkNode + ?Sized> LinkNode for &T {
    fn kind(&self) -> NodeKind {
        (**self).kind()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        (**self).attr(name)
    }

    fn text_content(&self) -> Option<Cow<'_, str>> {
        (**self).text_content()
    }

    fn child_element_count(&self) -> usize {
        (**self).child_element_count()
    }
}

/// The two link shapes the detector recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkVariant {
    /// `<a href="...">`
    Anchor,
    /// `<div data-href="...">` inside a metadata panel.
    Metadata,
}

impl LinkVariant {
    /// Node shape this variant requires.
    pub fn kind(self) -> NodeKind {
        match self {
            LinkVariant::Anchor => NodeKind::Anchor,
            LinkVariant::Metadata => NodeKind::Div,
        }
    }

    /// Attribute the target URL is read from.
    pub fn target_attr(self) -> &'static str {
        match self {
            LinkVariant::Anchor => HREF_ATTR,
            LinkVariant::Metadata => DATA_HREF_ATTR,
        }
    }

    /// Target URL of `node`, if it has this variant's shape and attribute.
    pub fn target<'a, N: LinkNode + ?Sized>(self, node: &'a N) -> Option<&'a str> {
        if node.kind() != self.kind() {
            return None;
        }
        node.attr(self.target_attr())
    }

    /// Whether `node` is a link of this variant labelled with its own URL.
    pub fn is_url_only<N: LinkNode + ?Sized>(self, node: &N) -> bool {
        let Some(target) = self.target(node) else {
            return false;
        };
        if !is_external_url(target) {
            return false;
        }
        let label = node.text_content().unwrap_or_default();
        urls_match_ignoring_trailing_slash(target, &label) && node.child_element_count() == 0
    }
}

/// Whether `node` is an anchor whose label restates its `href`.
///
/// # Examples
///
/// ```
/// use tidylinks::{LinkSnapshot, is_url_only_link};
///
/// let link = LinkSnapshot::anchor("https://example.com/", "https://example.com");
/// assert!(is_url_only_link(&link));
///
/// let link = LinkSnapshot::anchor("https://example.com", "Example");
/// assert!(!is_url_only_link(&link));
/// ```
pub fn is_url_only_link<N: LinkNode + ?Sized>(node: &N) -> bool {
    LinkVariant::Anchor.is_url_only(node)
}

/// Whether `node` is a metadata-panel link whose label restates its
/// `data-href`.
pub fn is_url_only_metadata_link<N: LinkNode + ?Sized>(node: &N) -> bool {
    LinkVariant::Metadata.is_url_only(node)
}

/// Compare two URLs, tolerating a slash after a bare authority.
///
/// ```
/// use tidylinks::detect::urls_match_ignoring_trailing_slash;
///
/// assert!(urls_match_ignoring_trailing_slash("https://a.com/", "https://a.com"));
/// assert!(urls_match_ignoring_trailing_slash("https://a.com/?q=1", "https://a.com?q=1"));
/// assert!(!urls_match_ignoring_trailing_slash("https://a.com/p/", "https://a.com/p"));
/// ```
pub fn urls_match_ignoring_trailing_slash(a: &str, b: &str) -> bool {
    a == b || normalize_authority_slash(a) == normalize_authority_slash(b)
}

/// Remove the slash directly after a URL's authority when no path follows.
///
/// Only a slash followed by `?`, `#` or the end of the string is removed;
/// strings without a `scheme://` prefix are returned as is.
pub fn normalize_authority_slash(url: &str) -> Cow<'_, str> {
    match authority_slash(url) {
        Some(pos) => {
            let mut normalized = String::with_capacity(url.len() - 1);
            normalized.push_str(&url[..pos]);
            normalized.push_str(&url[pos + 1..]);
            Cow::Owned(normalized)
        }
        None => Cow::Borrowed(url),
    }
}

/// Byte offset of a removable slash after the authority.
fn authority_slash(url: &str) -> Option<usize> {
    let bytes = url.as_bytes();

    // The scheme may not contain a slash, so the first slash has to open `://`.
    let first_slash = memchr(b'/', bytes)?;
    if first_slash == 0
        || bytes[first_slash - 1] != b':'
        || bytes.get(first_slash + 1) != Some(&b'/')
    {
        return None;
    }

    let authority_start = first_slash + 2;
    let authority_len = memchr3(b'/', b'?', b'#', &bytes[authority_start..])?;
    if authority_len == 0 {
        return None;
    }

    let slash = authority_start + authority_len;
    if bytes[slash] != b'/' {
        return None;
    }
    match bytes.get(slash + 1) {
        None | Some(b'?') | Some(b'#') => Some(slash),
        Some(_) => None,
    }
}
