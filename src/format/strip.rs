//! Prefix-stripping stages of the URL formatter.
//!
//! Every stage takes the output of the previous one and returns a slice of
//! it, so a full [`prettify`](super::prettify) allocates exactly once. All
//! stages match at the very start of their input only.

use memchr::memchr;

/// Strip an ASCII `prefix` from `s`, ignoring ASCII case.
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    debug_assert!(prefix.is_ascii());
    let head = s.as_bytes().get(..prefix.len())?;
    // A non-ASCII byte never equals an ASCII one, so `prefix.len()` is a
    // char boundary whenever this matches.
    head.eq_ignore_ascii_case(prefix.as_bytes())
        .then(|| &s[prefix.len()..])
}

/// Strip the first of `prefixes` that matches.
fn strip_any_prefix<'a>(s: &'a str, prefixes: &[&str]) -> &'a str {
    prefixes
        .iter()
        .find_map(|prefix| strip_prefix_ignore_case(s, prefix))
        .unwrap_or(s)
}

/// Remove a leading `http://` or `https://`.
///
/// ```
/// use tidylinks::format::strip_protocol;
///
/// assert_eq!(strip_protocol("HTTPS://example.com"), "example.com");
/// assert_eq!(strip_protocol("ftp://example.com"), "ftp://example.com");
/// ```
pub fn strip_protocol(url: &str) -> &str {
    strip_any_prefix(url, &["http://", "https://"])
}

/// Remove a leading `www.`, or with `numbered` also `www0.` .. `www9.`.
pub fn strip_www(url: &str, numbered: bool) -> &str {
    let Some(rest) = strip_prefix_ignore_case(url, "www") else {
        return url;
    };
    if let Some(host) = rest.strip_prefix('.') {
        return host;
    }
    if numbered
        && let [digit, b'.', ..] = rest.as_bytes()
        && digit.is_ascii_digit()
    {
        return &rest[2..];
    }
    url
}

/// Remove a leading `m.` or `mobile.`.
pub fn strip_mobile(url: &str) -> &str {
    strip_any_prefix(url, &["m.", "mobile."])
}

/// Remove a leading `amp.` or `wap.`.
pub fn strip_amp(url: &str) -> &str {
    strip_any_prefix(url, &["amp.", "wap."])
}

/// Drop the slash of an authority-only string such as `example.com/`.
///
/// A slash closing a real path (`example.com/path/`) is kept.
pub fn strip_bare_trailing_slash(url: &str) -> &str {
    match url.strip_suffix('/') {
        Some(authority)
            if !authority.is_empty() && memchr(b'/', authority.as_bytes()).is_none() =>
        {
            authority
        }
        _ => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix_ignore_case() {
        assert_eq!(strip_prefix_ignore_case("WwW.x", "www."), Some("x"));
        assert_eq!(strip_prefix_ignore_case("ww", "www."), None);
        assert_eq!(strip_prefix_ignore_case("", "m."), None);
        // Multi-byte char straddling the prefix length must not panic
        assert_eq!(strip_prefix_ignore_case("m例.jp", "m."), None);
    }

    #[test]
    fn test_strip_protocol() {
        assert_eq!(strip_protocol("http://a.com"), "a.com");
        assert_eq!(strip_protocol("https://a.com"), "a.com");
        assert_eq!(strip_protocol("hTtPs://a.com"), "a.com");
        assert_eq!(strip_protocol("https:/a.com"), "https:/a.com");
        assert_eq!(strip_protocol("a.com/https://b.com"), "a.com/https://b.com");
        assert_eq!(strip_protocol("obsidian://open"), "obsidian://open");
    }

    #[test]
    fn test_strip_protocol_once() {
        assert_eq!(strip_protocol("https://http://a.com"), "http://a.com");
    }

    #[test]
    fn test_strip_www() {
        assert_eq!(strip_www("www.a.com", false), "a.com");
        assert_eq!(strip_www("www1.a.com", false), "www1.a.com");
        assert_eq!(strip_www("www1.a.com", true), "a.com");
        assert_eq!(strip_www("WWW9.a.com", true), "a.com");
        assert_eq!(strip_www("www12.a.com", true), "www12.a.com");
        assert_eq!(strip_www("wwwa.com", true), "wwwa.com");
        assert_eq!(strip_www("www", true), "www");
        assert_eq!(strip_www("www1", true), "www1");
    }

    #[test]
    fn test_strip_www_once() {
        assert_eq!(strip_www("www.www.a.com", true), "www.a.com");
    }

    #[test]
    fn test_strip_mobile() {
        assert_eq!(strip_mobile("m.a.com"), "a.com");
        assert_eq!(strip_mobile("Mobile.a.com"), "a.com");
        assert_eq!(strip_mobile("mobi.a.com"), "mobi.a.com");
        assert_eq!(strip_mobile("ma.com"), "ma.com");
    }

    #[test]
    fn test_strip_amp() {
        assert_eq!(strip_amp("amp.a.com"), "a.com");
        assert_eq!(strip_amp("WAP.a.com"), "a.com");
        assert_eq!(strip_amp("amps.a.com"), "amps.a.com");
    }

    #[test]
    fn test_strip_bare_trailing_slash() {
        assert_eq!(strip_bare_trailing_slash("a.com/"), "a.com");
        assert_eq!(strip_bare_trailing_slash("a.com:8080/"), "a.com:8080");
        assert_eq!(strip_bare_trailing_slash("a.com/path/"), "a.com/path/");
        assert_eq!(strip_bare_trailing_slash("a.com//"), "a.com//");
        assert_eq!(strip_bare_trailing_slash("/"), "/");
        assert_eq!(strip_bare_trailing_slash(""), "");
        assert_eq!(strip_bare_trailing_slash("a.com"), "a.com");
    }
}
