//! Integration test: full paste pipeline with the real HTTP title source.

mod common;

use weekly_core::config::SmartPasteConfig;
use weekly_core::smart_paste::{
    handle_paste, AutoAccept, HttpTitleSource, PassThrough, PasteOutcome, PasteRequest,
    MARKDOWN_LANGUAGE_ID,
};

fn doc(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

fn paste(lines: &[String], cursor: usize, text: &str) -> PasteOutcome {
    let req = PasteRequest {
        language_id: MARKDOWN_LANGUAGE_ID,
        lines,
        cursor_line: cursor,
        uri_list: None,
        plain_text: Some(text),
    };
    handle_paste(
        &SmartPasteConfig::default(),
        &req,
        &HttpTitleSource,
        &mut AutoAccept,
        None,
    )
}

#[test]
fn article_paste_through_redirect() {
    let base = common::page_server::start();
    let lines = doc(&["## 📕精选文章", "* 📄[Old](https://old.example)", ""]);
    let url = format!("{}/redirect", base);
    let out = paste(&lines, 2, &url);
    let edit = out.edit().expect("insert");
    assert_eq!(edit.insert_text, format!("* 📄[Plain Page]({})", url));
}

#[test]
fn other_section_uses_og_title() {
    let base = common::page_server::start();
    let lines = doc(&["## 🎮好玩有趣", ""]);
    let url = format!("{}/og", base);
    let out = paste(&lines, 1, &url);
    assert_eq!(
        out.edit().unwrap().insert_text,
        format!("**OG & Friends**  \n{}", url)
    );
}

#[test]
fn missing_title_and_http_errors_pass_through() {
    let base = common::page_server::start();
    let lines = doc(&["## Links", ""]);
    for path in ["/no-title", "/missing", "/server-error"] {
        let out = paste(&lines, 1, &format!("{}{}", base, path));
        assert!(
            matches!(
                out,
                PasteOutcome::PassThrough(PassThrough::NoTitle | PassThrough::Fetch(_))
            ),
            "{path}: {out:?}"
        );
    }
}
