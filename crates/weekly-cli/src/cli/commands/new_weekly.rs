//! `weeklytool new-weekly [PATH]` – scaffold the next weekly folder.

use anyhow::Result;
use std::path::Path;
use weekly_core::weekly;

pub fn run_new_weekly(selected: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let dir = weekly::resolve_target_dir(selected, Some(cwd.as_path()))?;
    let created = weekly::create_next_weekly(&dir)?;
    let name = format!("No{}", created.number);
    println!("成功创建 {} 及 {}.md", name, name);
    println!("{}", created.file.display());
    Ok(())
}
