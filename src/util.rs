//! Text decoding helpers for HTML input.

use std::borrow::Cow;

/// How far into a document encoding declarations are searched.
const SNIFF_LEN: usize = 1024;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `<meta charset>` or
///    `<?xml encoding="..."?>`)
/// 3. Falls back to Windows-1252 (superset of ISO-8859-1)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Encoding declared near the start of `bytes`, if any.
///
/// An XML declaration wins over a `<meta charset>`.
pub fn sniff_encoding(bytes: &[u8]) -> Option<&str> {
    extract_xml_encoding(bytes).or_else(|| extract_meta_charset(bytes))
}

/// Extract the encoding from an XML declaration.
///
/// Looks for `<?xml ... encoding="..."?>` in the first 100 bytes.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(100)];

    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let (&quote, rest) = after_enc.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let value_end = rest.iter().position(|&b| b == quote)?;
    std::str::from_utf8(&rest[..value_end]).ok()
}

/// Extract the charset from `<meta charset="...">` or an `http-equiv`
/// content type (`content="text/html; charset=..."`).
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(SNIFF_LEN)];

    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let mut value = &prefix[pos + 8..];

    if let Some((&quote, rest)) = value.split_first()
        && (quote == b'"' || quote == b'\'')
    {
        value = rest;
    }

    let value_end = value
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(value.len());
    let name = std::str::from_utf8(&value[..value_end]).ok()?;
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_borrows() {
        let text = decode_text("https://例え.jp".as_bytes(), Some("windows-1252"));
        assert!(matches!(text, Cow::Borrowed("https://例え.jp")));
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_text(b"\xef\xbb\xbf<p>x</p>", None), "<p>x</p>");
    }

    #[test]
    fn test_decode_uses_hint() {
        // Shift_JIS for "あ"
        assert_eq!(decode_text(b"\x82\xa0", Some("shift_jis")), "あ");
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        assert_eq!(decode_text(b"caf\xe9", None), "café");
        assert_eq!(decode_text(b"caf\xe9", Some("not-an-encoding")), "café");
    }

    #[test]
    fn test_extract_xml_encoding() {
        assert_eq!(
            extract_xml_encoding(b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><html/>"),
            Some("ISO-8859-1")
        );
        assert_eq!(
            extract_xml_encoding(b"<?xml version='1.0' encoding='utf-8'?>"),
            Some("utf-8")
        );
        assert_eq!(extract_xml_encoding(b"<?xml version=\"1.0\"?>"), None);
        assert_eq!(extract_xml_encoding(b"<?xml encoding=utf-8?>"), None);
        assert_eq!(extract_xml_encoding(b"<html></html>"), None);
    }

    #[test]
    fn test_extract_meta_charset() {
        assert_eq!(
            extract_meta_charset(b"<meta charset=\"windows-1251\">"),
            Some("windows-1251")
        );
        assert_eq!(extract_meta_charset(b"<meta charset=utf-8>"), Some("utf-8"));
        assert_eq!(
            extract_meta_charset(
                b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=Shift_JIS\">"
            ),
            Some("Shift_JIS")
        );
        assert_eq!(extract_meta_charset(b"<meta charset=\"\">"), None);
        assert_eq!(extract_meta_charset(b"<p>no declaration</p>"), None);
    }

    #[test]
    fn test_sniff_prefers_xml_declaration() {
        let doc = b"<?xml version=\"1.0\" encoding=\"utf-8\"?><meta charset=\"koi8-r\">";
        assert_eq!(sniff_encoding(doc), Some("utf-8"));
        assert_eq!(sniff_encoding(b"<meta charset=\"koi8-r\">"), Some("koi8-r"));
    }
}
