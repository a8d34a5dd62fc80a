//! Recognizes a clipboard payload that is exactly one bare URL.

use regex::Regex;
use std::sync::LazyLock;

static BARE_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://\S+$").expect("valid url regex"));

/// Returns the trimmed payload if it is a single `http(s)://` URL with no
/// whitespace or trailing content.
pub fn is_likely_url(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    BARE_URL_REGEX.is_match(trimmed).then_some(trimmed)
}
