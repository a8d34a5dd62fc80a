//! CLI host for weeklytool: each editor command is a subcommand.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use weekly_core::config;

use commands::{run_base64_decode, run_base64_encode, run_new_weekly, run_paste, run_title};

/// Top-level CLI for weeklytool.
#[derive(Debug, Parser)]
#[command(name = "weeklytool")]
#[command(about = "Helpers for a weekly-notes markdown repository", long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of ~/.config/weeklytool/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Handle a paste into a document: print the replacement text, or the
    /// clipboard text unchanged when smart paste does not apply.
    Paste {
        /// Document being pasted into.
        #[arg(long)]
        file: PathBuf,
        /// Zero-based line of the paste position.
        #[arg(long)]
        line: usize,
        /// `text/uri-list` clipboard content (preferred over --text).
        #[arg(long, value_name = "URIS")]
        uri_list: Option<String>,
        /// `text/plain` clipboard content. Read from stdin when neither this nor --uri-list is given.
        #[arg(long)]
        text: Option<String>,
        /// Language id of the document (inferred from the file extension if omitted).
        #[arg(long)]
        language: Option<String>,
        /// Insert without asking. Needed when the clipboard text comes from stdin.
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Create the next `NoXX` weekly folder with its seed markdown file.
    NewWeekly {
        /// Selected folder or file; defaults to the current directory.
        path: Option<PathBuf>,
    },

    /// Base64-encode text (stdin if omitted).
    #[command(name = "base64-encode")]
    Base64Encode {
        text: Option<String>,
    },

    /// Base64-decode text (stdin if omitted).
    #[command(name = "base64-decode")]
    Base64Decode {
        text: Option<String>,
    },

    /// Fetch a page and print its extracted title.
    Title {
        /// HTTP/HTTPS URL.
        url: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match cli.config.as_deref() {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Paste {
                file,
                line,
                uri_list,
                text,
                language,
                yes,
            } => run_paste(&cfg, &file, line, uri_list, text, language, yes).await?,
            CliCommand::NewWeekly { path } => run_new_weekly(path.as_deref())?,
            CliCommand::Base64Encode { text } => run_base64_encode(text)?,
            CliCommand::Base64Decode { text } => run_base64_decode(text)?,
            CliCommand::Title { url } => run_title(&cfg, &url).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
