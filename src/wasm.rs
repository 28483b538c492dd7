//! WASM bindings for editor plugins.
//!
//! Plugins keep their own DOM, so the detector is exposed over plain values
//! (target, label, child element count) instead of nodes. Whole HTML strings
//! can also be rewritten in one call.

use wasm_bindgen::prelude::*;

use crate::detect::{self, LinkSnapshot};
use crate::format::{self, FormatterOptions};
use crate::rewrite;
use crate::settings::Settings;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Prettify a URL for display.
#[wasm_bindgen]
pub fn prettify_url(
    url: &str,
    strip_www: bool,
    strip_www_plus: bool,
    strip_mobile: bool,
    strip_amp: bool,
) -> String {
    let options = FormatterOptions {
        strip_www_subdomain: strip_www,
        strip_www_plus_subdomain: strip_www_plus,
        strip_mobile_subdomain: strip_mobile,
        strip_amp_subdomain: strip_amp,
    };
    format::prettify(url, &options)
}

/// Whether `url` contains a scheme separator.
#[wasm_bindgen]
pub fn is_external_url(url: &str) -> bool {
    format::is_external_url(url)
}

/// Whether an anchor with this `href` and label is URL-only.
#[wasm_bindgen]
pub fn is_url_only_link(href: &str, text: &str, child_count: usize) -> bool {
    let node = LinkSnapshot::anchor(href, text).with_child_elements(child_count);
    detect::is_url_only_link(&node)
}

/// Whether a metadata-panel link with this `data-href` and label is URL-only.
#[wasm_bindgen]
pub fn is_url_only_metadata_link(data_href: &str, text: &str, child_count: usize) -> bool {
    let node = LinkSnapshot::metadata(data_href, text).with_child_elements(child_count);
    detect::is_url_only_metadata_link(&node)
}

/// Rewrite an HTML fragment using settings JSON (`null` for defaults).
///
/// Returns the rewritten contents of `<body>`.
#[wasm_bindgen]
pub fn rewrite_html(html: &str, settings_json: &str) -> Result<String, JsValue> {
    let settings =
        Settings::from_json(settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let (out, _report) =
        rewrite::rewrite_fragment(html, settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(out)
}
