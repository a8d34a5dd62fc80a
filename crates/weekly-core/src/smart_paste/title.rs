//! Page title extraction by lenient pattern search over raw markup.
//!
//! No HTML parse is attempted: malformed markup can produce a miss, never a panic.

use regex::Regex;
use std::sync::LazyLock;

static OG_TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+property=["']og:title["']\s+content=["']([^"']+)["'][^>]*>"#)
        .expect("valid og:title regex")
});

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex")
});

/// Entities decoded in titles, applied in this order. Anything else stays verbatim.
const ENTITIES: [(&str, &str); 5] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Decodes the fixed entity set and trims surrounding whitespace.
///
/// Replacements run sequentially, so `&amp;lt;` becomes `<`.
pub fn decode_html_entities(input: &str) -> String {
    let mut out = input.to_string();
    for (entity, replacement) in ENTITIES {
        out = out.replace(entity, replacement);
    }
    out.trim().to_string()
}

/// Returns the page title: `og:title` content first, else the `<title>` text.
///
/// `None` means no usable title was found, which is a normal outcome.
pub fn extract_title(html: &str) -> Option<String> {
    let raw = OG_TITLE_REGEX
        .captures(html)
        .or_else(|| TITLE_REGEX.captures(html))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())?;

    let decoded = decode_html_entities(raw);
    (!decoded.is_empty()).then_some(decoded)
}
