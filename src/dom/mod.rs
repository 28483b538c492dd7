//! Parsed HTML documents.
//!
//! html5ever parses into an arena ([`ArenaDom`]) that can be queried with
//! CSS selectors ([`Selector`]), inspected through [`ElementRef`], edited in
//! place and serialized back to HTML.
//!
//! # Example
//!
//! ```
//! use tidylinks::dom::{Selector, parse_html, serialize_node};
//!
//! let mut dom = parse_html(r#"<p><a href="https://example.com">x</a></p>"#);
//! let selector = Selector::parse("a").unwrap();
//! let a = dom.select(&selector)[0];
//!
//! dom.set_text_content(a, "example.com");
//! assert_eq!(serialize_node(&dom, a), r#"<a href="https://example.com">example.com</a>"#);
//! ```

mod arena;
mod element_ref;
mod selector;
mod serialize;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute};
pub use element_ref::{ElementRef, LinkSelectors};
pub use selector::Selector;
pub use serialize::{serialize_children, serialize_document, serialize_node};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::ArenaSink;

/// Parse an HTML document.
///
/// Fragments are wrapped in `<html><head></head><body>...</body></html>`
/// the way browsers do it.
pub fn parse_html(html: &str) -> ArenaDom {
    let sink = ArenaSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Parse HTML bytes, detecting their encoding.
///
/// Supports UTF-8 (with or without BOM), an encoding declared by
/// `<?xml encoding>` or `<meta charset>`, and falls back to Windows-1252.
pub fn parse_html_bytes(html: &[u8]) -> ArenaDom {
    let hint = crate::util::sniff_encoding(html);
    parse_html(&crate::util::decode_text(html, hint))
}

/// The `<body>` element of a parsed document.
pub fn body(dom: &ArenaDom) -> Option<ArenaNodeId> {
    let html = dom
        .children(dom.document())
        .find(|&id| dom.element_name(id).is_some_and(|n| n.as_ref() == "html"))?;
    dom.children(html)
        .find(|&id| dom.element_name(id).is_some_and(|n| n.as_ref() == "body"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_gets_body() {
        let dom = parse_html("<p>x</p>");
        let body = body(&dom).expect("body");
        assert_eq!(serialize_children(&dom, body), "<p>x</p>");
    }

    #[test]
    fn test_parse_windows_1252_bytes() {
        // 0x93/0x94 are curly quotes in Windows-1252 and invalid UTF-8
        let dom = parse_html_bytes(b"<p>\x93quoted\x94</p>");
        let p = dom.find_by_tag("p").unwrap();
        assert_eq!(dom.text_content(p), "\u{201c}quoted\u{201d}");
    }

    #[test]
    fn test_parse_declared_charset() {
        // 0xE9 is e-acute in Latin-1 and must not become U+FFFD
        let dom = parse_html_bytes(b"<meta charset=\"iso-8859-1\"><p>caf\xe9</p>");
        let p = dom.find_by_tag("p").unwrap();
        assert_eq!(dom.text_content(p), "caf\u{e9}");
    }
}
