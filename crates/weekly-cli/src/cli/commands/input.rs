//! Reading command input from an argument or stdin.

use anyhow::{Context, Result};
use std::io::Read;

/// Reads all of stdin as UTF-8.
pub fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("read stdin")?;
    Ok(buf)
}

/// Uses `arg` if given, else stdin with one trailing line break removed.
pub fn arg_or_stdin(arg: Option<String>) -> Result<String> {
    match arg {
        Some(text) => Ok(text),
        None => Ok(strip_line_break(read_stdin()?)),
    }
}

fn strip_line_break(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}
