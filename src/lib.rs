//! # tidylinks
//!
//! Shorten the visible label of links whose label is just their own URL.
//!
//! ## Features
//!
//! - Prettify a URL for display: drop the scheme and the `www.`, `m.` and
//!   `amp.` families of host prefixes, plus a lone trailing slash
//! - Detect "URL-only" links, whose label restates their target
//! - Rewrite every URL-only link in an HTML document in place
//! - Settings stored as the same camelCase JSON editor plugins persist
//!
//! ## Quick Start
//!
//! ```
//! use tidylinks::{FormatterOptions, prettify};
//!
//! assert_eq!(prettify("https://www.example.com/", &FormatterOptions::DEFAULT), "example.com");
//! assert_eq!(prettify("https://m.example.com/a", &FormatterOptions::PROTOCOL_ONLY), "m.example.com/a");
//! ```
//!
//! ## Detecting URL-only links
//!
//! The detector works on any [`LinkNode`]. Parsed elements
//! ([`dom::ElementRef`]) and owned [`LinkSnapshot`]s both implement it:
//!
//! ```
//! use tidylinks::{LinkSnapshot, is_url_only_link};
//!
//! assert!(is_url_only_link(&LinkSnapshot::anchor("https://example.com/", "https://example.com")));
//! assert!(!is_url_only_link(&LinkSnapshot::anchor("https://example.com", "Example")));
//! ```
//!
//! ## Rewriting documents
//!
//! ```
//! use tidylinks::{Settings, rewrite_html};
//!
//! let (html, report) = rewrite_html(
//!     r#"<a href="https://www.rust-lang.org">https://www.rust-lang.org</a>"#,
//!     Settings::default(),
//! ).unwrap();
//! assert!(html.contains(">rust-lang.org</a>"));
//! assert_eq!(report.rewritten, 1);
//! ```

pub mod detect;
pub mod dom;
pub mod error;
pub mod format;
pub mod rewrite;
pub mod settings;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use detect::{
    LinkNode, LinkSnapshot, LinkVariant, NodeKind, is_url_only_link, is_url_only_metadata_link,
};
pub use error::{Error, Result};
pub use format::{FormatterOptions, is_external_url, prettify, prettify_default};
pub use rewrite::{RewriteReport, Rewriter, rewrite_fragment, rewrite_html};
pub use settings::Settings;
