//! Weekly scaffold: create the next `NoXX` folder and its seed markdown file.

use regex::Regex;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WEEKLY_DIR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^No(\d+)$").expect("valid weekly dir regex"));

/// Section skeleton written into every new weekly file (no trailing newline).
pub const WEEKLY_TEMPLATE: &str = "## 📕精选文章\n\n## 🤖AI前沿\n\n## 🔨实用工具\n\n## 📚宝藏资源\n\n## 💡优秀作品\n\n## 🎮好玩有趣\n\n## 📝日常记录";

#[derive(Debug)]
pub enum WeeklyError {
    /// Neither a path nor a workspace root was given.
    NoTarget,
    /// No `NoXX` folder exists to number from.
    NoWeeklyFolders(PathBuf),
    /// The highest `NoXX` number has no successor.
    NumberOverflow(u64),
    /// The next folder is already there.
    AlreadyExists(String),
    Io(io::Error),
}

impl fmt::Display for WeeklyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeeklyError::NoTarget => write!(f, "无法确定目标目录"),
            WeeklyError::NoWeeklyFolders(dir) => write!(
                f,
                "未找到符合 \"NoXX\" 格式的文件夹，无法创建新周报 ({})",
                dir.display()
            ),
            WeeklyError::NumberOverflow(max) => write!(f, "No{} 之后无法继续编号", max),
            WeeklyError::AlreadyExists(name) => write!(f, "文件夹 {} 已存在", name),
            WeeklyError::Io(e) => write!(f, "创建失败: {}", e),
        }
    }
}

impl std::error::Error for WeeklyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WeeklyError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for WeeklyError {
    fn from(e: io::Error) -> Self {
        WeeklyError::Io(e)
    }
}

/// Paths of a freshly scaffolded week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyCreated {
    pub number: u64,
    pub folder: PathBuf,
    pub file: PathBuf,
}

/// Largest `N` among child directories named `NoN`. Unreadable dir or no match yields `None`.
/// Numbers beyond `u64` are ignored.
pub fn find_max_weekly_number(dir: &Path) -> Option<u64> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("read_dir {} failed: {}", dir.display(), e);
            return None;
        }
    };

    entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| {
            let name = entry.file_name();
            let caps = WEEKLY_DIR_REGEX.captures(name.to_str()?)?;
            caps[1].parse::<u64>().ok()
        })
        .max()
}

/// Picks the directory to scaffold in: a selected directory as-is, a selected
/// file's parent, else the workspace root.
pub fn resolve_target_dir(
    selected: Option<&Path>,
    workspace_root: Option<&Path>,
) -> Result<PathBuf, WeeklyError> {
    if let Some(path) = selected {
        let meta = fs::metadata(path)?;
        if meta.is_dir() {
            return Ok(path.to_path_buf());
        }
        return path
            .parent()
            .map(Path::to_path_buf)
            .ok_or(WeeklyError::NoTarget);
    }
    workspace_root
        .map(Path::to_path_buf)
        .ok_or(WeeklyError::NoTarget)
}

/// Creates `No{max+1}/No{max+1}.md` under `dir` seeded with [`WEEKLY_TEMPLATE`].
pub fn create_next_weekly(dir: &Path) -> Result<WeeklyCreated, WeeklyError> {
    let max = find_max_weekly_number(dir)
        .ok_or_else(|| WeeklyError::NoWeeklyFolders(dir.to_path_buf()))?;
    let number = max
        .checked_add(1)
        .ok_or(WeeklyError::NumberOverflow(max))?;
    let folder_name = format!("No{}", number);
    let folder = dir.join(&folder_name);

    if folder.exists() {
        return Err(WeeklyError::AlreadyExists(folder_name));
    }

    fs::create_dir(&folder)?;
    let file = folder.join(format!("{}.md", folder_name));
    fs::write(&file, WEEKLY_TEMPLATE)?;
    tracing::info!("created weekly {}", file.display());

    Ok(WeeklyCreated {
        number,
        folder,
        file,
    })
}
