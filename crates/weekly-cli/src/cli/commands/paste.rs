//! `weeklytool paste` – smart paste hook for a host editor.
//!
//! Stdout receives exactly the text to insert: the formatted link when the
//! user accepts, otherwise the clipboard payload unchanged. A cancelled paste
//! (Ctrl-C) prints nothing. Ctrl-C also dismisses a pending confirmation
//! prompt without waiting for Enter.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use weekly_core::config::WeeklyConfig;
use weekly_core::smart_paste::{
    handle_paste, AutoAccept, Confirm, HttpTitleSource, PassThrough, PasteOutcome, PasteRequest,
    MARKDOWN_LANGUAGE_ID,
};

use super::input::read_stdin;

/// How often a pending prompt re-checks the abort token.
const PROMPT_POLL: Duration = Duration::from_millis(100);

/// Asks on stderr, answers from stdin. EOF, Ctrl-C or anything but yes declines.
struct TerminalConfirm {
    abort: Arc<AtomicBool>,
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, message: &str, detail: &str) -> bool {
        {
            let mut stderr = io::stderr().lock();
            let _ = write!(stderr, "{}\n  {}\n是/否 [y/N]: ", message, detail);
            let _ = stderr.flush();
        }
        let answers = spawn_answer_reader();
        await_answer(&answers, &self.abort, PROMPT_POLL)
    }
}

/// Reads one line from stdin on its own thread. `None` means stdin closed.
/// The thread is left blocked if the prompt is dismissed; it dies with the process.
fn spawn_answer_reader() -> Receiver<Option<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut answer = String::new();
        let line = match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(answer),
        };
        let _ = tx.send(line);
    });
    rx
}

/// Waits for a typed answer while watching `abort`; abort or a closed reader declines.
fn await_answer(answers: &Receiver<Option<String>>, abort: &AtomicBool, poll: Duration) -> bool {
    loop {
        if abort.load(Ordering::Relaxed) {
            return false;
        }
        match answers.recv_timeout(poll) {
            Ok(Some(answer)) => return is_yes(&answer),
            Ok(None) | Err(RecvTimeoutError::Disconnected) => return false,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "是"
    )
}

/// Splits a document the way an editor numbers lines: a trailing newline
/// starts one more (empty) line, and CRLF endings are stripped.
fn document_lines(document: &str) -> Vec<String> {
    document
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Language id from the file extension; only markdown matters to the hook.
fn infer_language(file: &Path) -> &'static str {
    match file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("md" | "markdown") => MARKDOWN_LANGUAGE_ID,
        _ => "plaintext",
    }
}

pub async fn run_paste(
    cfg: &WeeklyConfig,
    file: &Path,
    line: usize,
    uri_list: Option<String>,
    text: Option<String>,
    language: Option<String>,
    yes: bool,
) -> Result<()> {
    let document =
        std::fs::read_to_string(file).with_context(|| format!("read {}", file.display()))?;
    let lines = document_lines(&document);
    let language = language.unwrap_or_else(|| infer_language(file).to_string());
    let text = match (&uri_list, text) {
        (None, None) => Some(read_stdin()?),
        (_, text) => text,
    };

    let abort = Arc::new(AtomicBool::new(false));
    let abort_on_signal = Arc::clone(&abort);
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("ctrl-c: aborting paste");
            abort_on_signal.store(true, Ordering::Relaxed);
        }
    });

    let smart_paste = cfg.smart_paste.clone();
    let file_for_log: PathBuf = file.to_path_buf();
    let worker_abort = Arc::clone(&abort);
    let (outcome, payload) = tokio::task::spawn_blocking(move || {
        let req = PasteRequest {
            language_id: &language,
            lines: &lines,
            cursor_line: line,
            uri_list: uri_list.as_deref(),
            plain_text: text.as_deref(),
        };
        tracing::debug!("paste into {} at line {}", file_for_log.display(), line);
        let outcome = if yes {
            handle_paste(&smart_paste, &req, &HttpTitleSource, &mut AutoAccept, Some(&*worker_abort))
        } else {
            handle_paste(
                &smart_paste,
                &req,
                &HttpTitleSource,
                &mut TerminalConfirm {
                    abort: Arc::clone(&worker_abort),
                },
                Some(&*worker_abort),
            )
        };
        let payload = uri_list.or(text).unwrap_or_default();
        (outcome, payload)
    })
    .await
    .context("paste task panicked")?;
    signal_task.abort();

    let mut stdout = io::stdout().lock();
    match outcome {
        PasteOutcome::Insert(edit) => {
            eprintln!("{}", edit.label);
            write!(stdout, "{}", edit.insert_text)?;
        }
        PasteOutcome::PassThrough(PassThrough::Cancelled) => {}
        PasteOutcome::PassThrough(_) => write!(stdout, "{}", payload)?,
    }
    stdout.flush()?;
    Ok(())
}
