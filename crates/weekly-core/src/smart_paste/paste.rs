//! Paste orchestration over one paste event.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::SmartPasteConfig;

use super::context::{classify, PasteContext};
use super::fetch::{fetch_text, FetchError};
use super::format::{confirm_message, format_link, EDIT_LABEL};
use super::title::extract_title;
use super::url_detect::is_likely_url;

/// Language id of documents the feature applies to.
pub const MARKDOWN_LANGUAGE_ID: &str = "markdown";

/// Everything the host hands over for one paste.
#[derive(Debug, Clone)]
pub struct PasteRequest<'a> {
    /// Language id of the target document (only `markdown` is handled).
    pub language_id: &'a str,
    /// Document text split into lines.
    pub lines: &'a [String],
    /// Zero-based line of the paste position.
    pub cursor_line: usize,
    /// `text/uri-list` clipboard representation, if any.
    pub uri_list: Option<&'a str>,
    /// `text/plain` clipboard representation, if any.
    pub plain_text: Option<&'a str>,
}

impl PasteRequest<'_> {
    /// The URI list wins over plain text; the two are never combined.
    fn payload(&self) -> &str {
        self.uri_list.or(self.plain_text).unwrap_or("")
    }
}

/// Replacement produced when the user accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEdit {
    pub insert_text: String,
    pub label: &'static str,
    pub context: PasteContext,
    pub url: String,
    pub title: String,
}

/// Why the default paste proceeds unmodified.
#[derive(Debug)]
pub enum PassThrough {
    Disabled,
    NotMarkdown,
    NoContext,
    NotAUrl,
    Fetch(FetchError),
    NoTitle,
    Declined,
    Cancelled,
    Panicked,
}

impl fmt::Display for PassThrough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassThrough::Disabled => write!(f, "smart paste disabled"),
            PassThrough::NotMarkdown => write!(f, "document is not markdown"),
            PassThrough::NoContext => write!(f, "no section context and fallback disabled"),
            PassThrough::NotAUrl => write!(f, "clipboard is not a bare URL"),
            PassThrough::Fetch(e) => write!(f, "fetch failed: {}", e),
            PassThrough::NoTitle => write!(f, "no title found"),
            PassThrough::Declined => write!(f, "user declined"),
            PassThrough::Cancelled => write!(f, "cancelled"),
            PassThrough::Panicked => write!(f, "internal fault"),
        }
    }
}

#[derive(Debug)]
pub enum PasteOutcome {
    Insert(PasteEdit),
    PassThrough(PassThrough),
}

impl PasteOutcome {
    pub fn edit(&self) -> Option<&PasteEdit> {
        match self {
            PasteOutcome::Insert(edit) => Some(edit),
            PasteOutcome::PassThrough(_) => None,
        }
    }
}

/// Source of page titles. `Ok(None)` means the page had no usable title.
pub trait TitleSource {
    fn fetch_title(
        &self,
        url: &str,
        timeout: Duration,
        abort: Option<&AtomicBool>,
    ) -> Result<Option<String>, FetchError>;
}

/// Fetches over HTTP(S) and extracts `og:title` / `<title>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpTitleSource;

impl TitleSource for HttpTitleSource {
    fn fetch_title(
        &self,
        url: &str,
        timeout: Duration,
        abort: Option<&AtomicBool>,
    ) -> Result<Option<String>, FetchError> {
        let html = fetch_text(url, timeout, abort)?;
        Ok(extract_title(&html))
    }
}

/// Yes/no prompt shown before inserting. Dismissing counts as "no".
///
/// Implementations that block on the user should also return once the abort
/// token passed to [`handle_paste`] is set.
pub trait Confirm {
    fn confirm(&mut self, message: &str, detail: &str) -> bool;
}

/// Accepts every prompt without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoAccept;

impl Confirm for AutoAccept {
    fn confirm(&mut self, _message: &str, _detail: &str) -> bool {
        true
    }
}

/// Runs one paste event to a terminal outcome. Never fails: faults, including
/// panics in the title source or prompt, become `PassThrough`.
pub fn handle_paste(
    cfg: &SmartPasteConfig,
    req: &PasteRequest<'_>,
    titles: &dyn TitleSource,
    confirm: &mut dyn Confirm,
    abort: Option<&AtomicBool>,
) -> PasteOutcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        run_paste(cfg, req, titles, confirm, abort)
    }));
    let outcome = match result {
        Ok(Ok(edit)) => PasteOutcome::Insert(edit),
        Ok(Err(reason)) => PasteOutcome::PassThrough(reason),
        Err(_) => PasteOutcome::PassThrough(PassThrough::Panicked),
    };
    match &outcome {
        PasteOutcome::Insert(edit) => {
            tracing::info!(url = %edit.url, context = ?edit.context, "smart paste inserted link")
        }
        PasteOutcome::PassThrough(reason) => {
            tracing::debug!(%reason, "smart paste pass-through")
        }
    }
    outcome
}

fn check_abort(abort: Option<&AtomicBool>) -> Result<(), PassThrough> {
    match abort {
        Some(a) if a.load(Ordering::Relaxed) => Err(PassThrough::Cancelled),
        _ => Ok(()),
    }
}

fn run_paste(
    cfg: &SmartPasteConfig,
    req: &PasteRequest<'_>,
    titles: &dyn TitleSource,
    confirm: &mut dyn Confirm,
    abort: Option<&AtomicBool>,
) -> Result<PasteEdit, PassThrough> {
    if !cfg.enabled {
        return Err(PassThrough::Disabled);
    }
    if req.language_id != MARKDOWN_LANGUAGE_ID {
        return Err(PassThrough::NotMarkdown);
    }

    let context = classify(req.lines, req.cursor_line);
    if context == PasteContext::None && !cfg.fallback_format {
        return Err(PassThrough::NoContext);
    }

    let url = is_likely_url(req.payload()).ok_or(PassThrough::NotAUrl)?;
    check_abort(abort)?;

    let title = match titles.fetch_title(url, cfg.request_timeout(), abort) {
        Ok(Some(title)) => title,
        Ok(None) => return Err(PassThrough::NoTitle),
        Err(FetchError::Cancelled) => return Err(PassThrough::Cancelled),
        Err(e) => return Err(PassThrough::Fetch(e)),
    };
    check_abort(abort)?;

    let insert_text = format_link(context, &title, url);
    let accepted = confirm.confirm(&confirm_message(context, &title), url);
    // A prompt dismissed by the abort token is a cancel, not a decline.
    check_abort(abort)?;
    if !accepted {
        return Err(PassThrough::Declined);
    }

    Ok(PasteEdit {
        insert_text,
        label: EDIT_LABEL,
        context,
        url: url.to_string(),
        title,
    })
}
