//! Paste context: which section convention a pasted link should follow.

/// Heading that marks the featured-articles section of a weekly note.
pub const ARTICLE_HEADING: &str = "## 📕精选文章";

/// Bullet prefix used for entries in the featured-articles section.
pub const ARTICLE_BULLET_PREFIX: &str = "* 📄";

/// Section type inferred above the cursor at paste time. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteContext {
    /// Under `## 📕精选文章` or directly below a `* 📄` bullet.
    ArticleSection,
    /// Under any other level-2 heading.
    OtherSection,
    /// No recognized section, or unrelated content in between.
    None,
}

/// True for `##` followed by whitespace (a level-2 heading; `###` does not count).
fn is_level2_heading(trimmed: &str) -> bool {
    trimmed
        .strip_prefix("##")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

/// Scans upward from `cursor_line`, skipping blank lines, and returns the
/// first decision reached.
///
/// Non-heading content on the cursor line itself is skipped; on any line
/// above it, such content stops the scan with `None`. A cursor past the end
/// of the document starts from the last line, and every line counts as above it.
pub fn classify<S: AsRef<str>>(lines: &[S], cursor_line: usize) -> PasteContext {
    if lines.is_empty() {
        return PasteContext::None;
    }
    let start = cursor_line.min(lines.len() - 1);

    for line_num in (0..=start).rev() {
        let trimmed = lines[line_num].as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == ARTICLE_HEADING || trimmed.starts_with(ARTICLE_BULLET_PREFIX) {
            return PasteContext::ArticleSection;
        }
        if is_level2_heading(trimmed) {
            return PasteContext::OtherSection;
        }
        if line_num < cursor_line {
            return PasteContext::None;
        }
    }
    PasteContext::None
}
