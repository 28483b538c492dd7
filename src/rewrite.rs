//! Document pass: find URL-only links and shorten their labels.
//!
//! This is the glue between a parsed document and the pure core: candidate
//! nodes are found with CSS selectors, checked by the
//! [detector](crate::detect) and relabelled with the
//! [formatter](crate::format). Only the label text changes; targets and
//! every other attribute are left alone.
//!
//! # Example
//!
//! ```
//! use tidylinks::{Settings, rewrite_fragment};
//!
//! let html = r#"<p>See <a href="https://www.example.com/">https://www.example.com</a></p>"#;
//! let (out, report) = rewrite_fragment(html, Settings::default()).unwrap();
//!
//! assert_eq!(out, r#"<p>See <a href="https://www.example.com/">example.com</a></p>"#);
//! assert_eq!(report.rewritten, 1);
//! ```

use std::ops::AddAssign;

use crate::detect::{LinkNode, LinkVariant};
use crate::dom::{self, ArenaDom, ElementRef, Selector};
use crate::error::Result;
use crate::format::{FormatterOptions, prettify};
use crate::settings::Settings;

/// Anchors with a scheme-qualified target.
pub const LINK_SELECTOR: &str = r#"a[href*="://"]"#;

/// Metadata-panel links with a scheme-qualified target.
pub const METADATA_LINK_SELECTOR: &str = r#".metadata-link-inner[data-href*="://"]"#;

/// Container metadata-panel links are looked for in.
pub const METADATA_PANEL_SELECTOR: &str = ".metadata-property-value";

/// Counts from one or more passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Nodes matched by the candidate selector.
    pub candidates: usize,
    /// Candidates whose label restated their target.
    pub url_only: usize,
    /// URL-only links whose label actually changed.
    pub rewritten: usize,
}

impl AddAssign for RewriteReport {
    fn add_assign(&mut self, other: Self) {
        self.candidates += other.candidates;
        self.url_only += other.url_only;
        self.rewritten += other.rewritten;
    }
}

/// Applies [`Settings`] to parsed documents.
#[derive(Debug, Clone)]
pub struct Rewriter {
    settings: Settings,
    options: FormatterOptions,
    links: Selector,
    metadata_links: Selector,
}

impl Rewriter {
    /// Rewriter using the standard candidate selectors.
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_selectors(
            settings,
            LINK_SELECTOR,
            &format!("{METADATA_PANEL_SELECTOR} {METADATA_LINK_SELECTOR}"),
        )
    }

    /// Rewriter with custom candidate selectors.
    ///
    /// The selectors only narrow the search; a candidate is still rewritten
    /// only if the detector accepts it.
    pub fn with_selectors(settings: Settings, links: &str, metadata_links: &str) -> Result<Self> {
        Ok(Self {
            settings,
            options: settings.formatter_options(),
            links: Selector::parse(links)?,
            metadata_links: Selector::parse(metadata_links)?,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Rewrite anchors, plus metadata-panel links if enabled in settings.
    pub fn rewrite_document(&self, dom: &mut ArenaDom) -> RewriteReport {
        let mut report = self.rewrite_links(dom);
        if self.settings.format_metadata {
            report += self.rewrite_metadata_links(dom);
        }
        report
    }

    /// Rewrite URL-only anchors.
    pub fn rewrite_links(&self, dom: &mut ArenaDom) -> RewriteReport {
        self.rewrite(dom, &self.links, LinkVariant::Anchor)
    }

    /// Rewrite URL-only metadata-panel links, regardless of settings.
    pub fn rewrite_metadata_links(&self, dom: &mut ArenaDom) -> RewriteReport {
        self.rewrite(dom, &self.metadata_links, LinkVariant::Metadata)
    }

    fn rewrite(&self, dom: &mut ArenaDom, selector: &Selector, variant: LinkVariant) -> RewriteReport {
        let candidates = dom.select(selector);
        let mut report = RewriteReport {
            candidates: candidates.len(),
            ..RewriteReport::default()
        };

        for id in candidates {
            let label = {
                let node = ElementRef::new(dom, id);
                let Some(target) = variant.target(&node) else {
                    continue;
                };
                if !variant.is_url_only(&node) {
                    log::trace!("{variant:?} {target} has a custom label");
                    continue;
                }
                report.url_only += 1;

                let label = prettify(target, &self.options);
                if node.text_content().is_some_and(|current| current == label) {
                    continue;
                }
                log::debug!("{variant:?} {target} -> {label}");
                label
            };

            dom.set_text_content(id, &label);
            report.rewritten += 1;
        }

        log::debug!(
            "{variant:?} pass: {} candidates, {} URL-only, {} rewritten",
            report.candidates,
            report.url_only,
            report.rewritten
        );
        report
    }
}

/// Parse `html` as a document, rewrite it and serialize it back.
pub fn rewrite_html(html: &str, settings: Settings) -> Result<(String, RewriteReport)> {
    let rewriter = Rewriter::new(settings)?;
    let mut dom = dom::parse_html(html);
    let report = rewriter.rewrite_document(&mut dom);
    Ok((dom::serialize_document(&dom), report))
}

/// Like [`rewrite_html`], but return only the contents of `<body>`.
///
/// Suited to fragments such as a rendered Markdown block, which the parser
/// wraps in `<html><body>`.
pub fn rewrite_fragment(html: &str, settings: Settings) -> Result<(String, RewriteReport)> {
    let rewriter = Rewriter::new(settings)?;
    let mut dom = dom::parse_html(html);
    let report = rewriter.rewrite_document(&mut dom);
    let out = match dom::body(&dom) {
        Some(body) => dom::serialize_children(&dom, body),
        None => dom::serialize_document(&dom),
    };
    Ok((out, report))
}
