//! HTML serialization of the arena DOM.
//!
//! Follows the HTML fragment serialization rules closely enough to
//! round-trip what html5ever parsed: void elements get no end tag, text in
//! raw-text elements is written verbatim, everything else is escaped.

use html5ever::ns;

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId, Attribute};

/// Elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are not escaped.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Serialize the whole document.
pub fn serialize_document(dom: &ArenaDom) -> String {
    serialize_children(dom, dom.document())
}

/// Serialize the children of `id` (the DOM's `innerHTML`).
pub fn serialize_children(dom: &ArenaDom, id: ArenaNodeId) -> String {
    let mut out = String::new();
    for child in dom.children(id) {
        write_node(dom, child, &mut out);
    }
    out
}

/// Serialize `id` itself (the DOM's `outerHTML`).
pub fn serialize_node(dom: &ArenaDom, id: ArenaNodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, &mut out);
    out
}

fn write_node(dom: &ArenaDom, id: ArenaNodeId, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        ArenaNodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, out);
            }
        }
        ArenaNodeData::Doctype(name) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        ArenaNodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        ArenaNodeData::Text(text) => {
            if parent_is_raw_text(dom, node.parent) {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        ArenaNodeData::Element { name, attrs, .. } => {
            let tag: &str = &name.local;
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                write_attr(attr, out);
            }
            out.push('>');

            if name.ns == ns!(html) && VOID_ELEMENTS.contains(&tag) {
                return;
            }

            for child in dom.children(id) {
                write_node(dom, child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn parent_is_raw_text(dom: &ArenaDom, parent: ArenaNodeId) -> bool {
    dom.element_namespace(parent) == Some(&ns!(html))
        && dom
            .element_name(parent)
            .is_some_and(|name| RAW_TEXT_ELEMENTS.contains(&name.as_ref()))
}

fn write_attr(attr: &Attribute, out: &mut String) {
    out.push(' ');
    if let Some(prefix) = &attr.name.prefix {
        out.push_str(prefix);
        out.push(':');
    }
    out.push_str(attr.name.local.as_ref());
    out.push_str("=\"");
    escape_attr(&attr.value, out);
    out.push('"');
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
