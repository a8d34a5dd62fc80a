//! Smart paste: turn a pasted URL into a markdown link titled after the page.
//!
//! Pipeline: classify the section above the cursor, recognize a bare URL in
//! the clipboard, fetch the page, extract its title, format by context, and
//! ask the user before replacing the paste. Every failure along the way is a
//! pass-through to the host's default paste.

pub mod context;
pub mod fetch;
pub mod format;
mod paste;
pub mod title;
pub mod url_detect;

pub use context::{classify, PasteContext};
pub use fetch::{fetch_text, FetchError};
pub use format::{confirm_message, format_link, EDIT_LABEL};
pub use paste::{
    handle_paste, AutoAccept, Confirm, HttpTitleSource, PassThrough, PasteEdit, PasteOutcome,
    PasteRequest, TitleSource, MARKDOWN_LANGUAGE_ID,
};
pub use title::extract_title;
pub use url_detect::is_likely_url;
