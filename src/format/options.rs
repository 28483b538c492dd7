//! Formatter configuration.

/// Which subdomain prefixes [`prettify`](super::prettify) removes.
///
/// The protocol is always stripped; these switches only cover the
/// subdomain families. Each switch is independent of the others, except
/// that `strip_www_plus_subdomain` only widens `strip_www_subdomain` and
/// has no effect on its own.
///
/// # Examples
///
/// ```
/// use tidylinks::{FormatterOptions, prettify};
///
/// let options = FormatterOptions::default().with_mobile(false);
/// assert_eq!(prettify("https://m.example.com", &options), "m.example.com");
/// assert_eq!(prettify("https://www.example.com", &options), "example.com");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatterOptions {
    /// Strip a leading `www.`.
    pub strip_www_subdomain: bool,
    /// Also strip `www1.` through `www9.` (requires `strip_www_subdomain`).
    pub strip_www_plus_subdomain: bool,
    /// Strip a leading `m.` or `mobile.`.
    pub strip_mobile_subdomain: bool,
    /// Strip a leading `amp.` or `wap.`.
    pub strip_amp_subdomain: bool,
}

impl FormatterOptions {
    /// Every subdomain family enabled.
    pub const DEFAULT: FormatterOptions = FormatterOptions {
        strip_www_subdomain: true,
        strip_www_plus_subdomain: true,
        strip_mobile_subdomain: true,
        strip_amp_subdomain: true,
    };

    /// Only the protocol is stripped.
    pub const PROTOCOL_ONLY: FormatterOptions = FormatterOptions {
        strip_www_subdomain: false,
        strip_www_plus_subdomain: false,
        strip_mobile_subdomain: false,
        strip_amp_subdomain: false,
    };

    pub fn with_www(mut self, enabled: bool) -> Self {
        self.strip_www_subdomain = enabled;
        self
    }

    pub fn with_www_plus(mut self, enabled: bool) -> Self {
        self.strip_www_plus_subdomain = enabled;
        self
    }

    pub fn with_mobile(mut self, enabled: bool) -> Self {
        self.strip_mobile_subdomain = enabled;
        self
    }

    pub fn with_amp(mut self, enabled: bool) -> Self {
        self.strip_amp_subdomain = enabled;
        self
    }
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
