//! URL prettification.
//!
//! Turns a raw absolute URL into a shorter display string by removing the
//! protocol and, depending on [`FormatterOptions`], a closed set of "noise"
//! subdomains. The transform never fails: malformed input is treated as an
//! opaque string and comes back unchanged or partially stripped.
//!
//! Stages run in a fixed order, each one anchored at the start of what the
//! previous stage left:
//!
//! 1. [`strip_protocol`]: `http://`, `https://`
//! 2. [`strip_www`]: `www.`, optionally `www1.` .. `www9.`
//! 3. [`strip_mobile`]: `m.`, `mobile.`
//! 4. [`strip_amp`]: `amp.`, `wap.`
//! 5. [`strip_bare_trailing_slash`]: `example.com/` -> `example.com`

mod options;
mod strip;

pub use options::FormatterOptions;
pub use strip::{strip_amp, strip_bare_trailing_slash, strip_mobile, strip_protocol, strip_www};

use memchr::memmem;

/// Prettify `url` for display.
///
/// # Examples
///
/// ```
/// use tidylinks::{FormatterOptions, prettify};
///
/// let options = FormatterOptions::default();
/// assert_eq!(prettify("https://www.example.com/page", &options), "example.com/page");
/// assert_eq!(prettify("https://example.com/", &options), "example.com");
/// assert_eq!(prettify("https://example.com/path/", &options), "example.com/path/");
/// ```
pub fn prettify(url: &str, options: &FormatterOptions) -> String {
    let mut url = strip_protocol(url);

    if options.strip_www_subdomain {
        url = strip_www(url, options.strip_www_plus_subdomain);
    }
    if options.strip_mobile_subdomain {
        url = strip_mobile(url);
    }
    if options.strip_amp_subdomain {
        url = strip_amp(url);
    }

    strip_bare_trailing_slash(url).to_string()
}

/// [`prettify`] with [`FormatterOptions::DEFAULT`].
pub fn prettify_default(url: &str) -> String {
    prettify(url, &FormatterOptions::DEFAULT)
}

/// Whether `url` is scheme-qualified (contains `://`).
///
/// Relative paths, fragment-only links, plain text and `[[wiki links]]`
/// are not.
pub fn is_external_url(url: &str) -> bool {
    memmem::find(url.as_bytes(), b"://").is_some()
}
