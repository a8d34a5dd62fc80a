//! Markdown templates for a pasted link.
//!
//! Title and URL are inserted verbatim: `]`, `(` or newlines in a title are
//! not escaped.

use super::context::PasteContext;

/// Label shown for an accepted smart-paste edit.
pub const EDIT_LABEL: &str = "插入文章链接";

/// Renders the replacement text for `context`.
pub fn format_link(context: PasteContext, title: &str, url: &str) -> String {
    match context {
        PasteContext::ArticleSection => format!("* 📄[{}]({})", title, url),
        PasteContext::OtherSection => format!("**{}**  \n{}", title, url),
        PasteContext::None => format!("* [{}]({})", title, url),
    }
}

/// Human-readable shape of the template used for `context`.
pub fn template_shape(context: PasteContext) -> &'static str {
    match context {
        PasteContext::ArticleSection => "* 📄[Title](url)",
        PasteContext::OtherSection => "**Title**\\nurl",
        PasteContext::None => "* [Title](url)",
    }
}

/// Confirmation question shown before inserting.
pub fn confirm_message(context: PasteContext, title: &str) -> String {
    format!(
        "识别到 URL，标题为: {}，是否按 '{}' 插入？",
        title,
        template_shape(context)
    )
}
