//! `weeklytool title <url>` – print a page's extracted title.

use anyhow::{Context, Result};
use weekly_core::config::WeeklyConfig;
use weekly_core::smart_paste::{HttpTitleSource, TitleSource};

pub async fn run_title(cfg: &WeeklyConfig, url: &str) -> Result<()> {
    let timeout = cfg.smart_paste.request_timeout();
    let owned_url = url.to_string();
    let title = tokio::task::spawn_blocking(move || {
        HttpTitleSource.fetch_title(&owned_url, timeout, None)
    })
    .await
    .context("title task panicked")?
    .with_context(|| format!("fetch {}", url))?;

    match title {
        Some(title) => println!("{}", title),
        None => anyhow::bail!("no title found at {}", url),
    }
    Ok(())
}
