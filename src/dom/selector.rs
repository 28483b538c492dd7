//! Compiled CSS selectors.

use selectors::context::{MatchingContext, QuirksMode, SelectorCaches};
use selectors::matching::{
    MatchingForInvalidation, MatchingMode, NeedsSelectorFlags, matches_selector,
};

use super::arena::{ArenaDom, ArenaNodeId};
use super::element_ref::{ElementRef, LinkSelectors};
use crate::error::{Error, Result};

/// A single complex selector such as `.panel a[href*="://"]`.
#[derive(Debug, Clone)]
pub struct Selector {
    inner: selectors::parser::Selector<LinkSelectors>,
}

impl Selector {
    /// Parse a selector.
    ///
    /// Selector lists (`a, b`) are not supported; parse each part on its own.
    pub fn parse(source: &str) -> Result<Self> {
        let mut input = cssparser::ParserInput::new(source);
        let mut parser = cssparser::Parser::new(&mut input);
        let inner = selectors::parser::Selector::parse(&LinkSelectors, &mut parser)
            .map_err(|e| Error::Selector(format!("{source}: {:?}", e.kind)))?;
        if !parser.is_exhausted() {
            return Err(Error::Selector(format!("{source}: unexpected trailing input")));
        }
        Ok(Self { inner })
    }

    /// Whether `element` matches.
    pub fn matches(&self, element: ElementRef<'_>) -> bool {
        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            &mut caches,
            QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );
        matches_selector(&self.inner, 0, None, &element, &mut context)
    }
}

impl ArenaDom {
    /// All elements matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<ArenaNodeId> {
        self.descendants(self.document())
            .filter(|&id| self.is_element(id) && selector.matches(ElementRef::new(self, id)))
            .collect()
    }
}
