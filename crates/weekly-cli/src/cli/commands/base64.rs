//! `weeklytool base64-encode|base64-decode [TEXT]`.

use anyhow::Result;
use weekly_core::base64_tools;

use super::input::arg_or_stdin;

pub fn run_base64_encode(text: Option<String>) -> Result<()> {
    let selection = arg_or_stdin(text)?;
    println!("{}", base64_tools::encode(&selection)?);
    Ok(())
}

pub fn run_base64_decode(text: Option<String>) -> Result<()> {
    let selection = arg_or_stdin(text)?;
    let decoded = base64_tools::decode(&selection)?;
    eprintln!("{}", base64_tools::DECODE_RESULT_TITLE);
    println!("{}", decoded);
    Ok(())
}
