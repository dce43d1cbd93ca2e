use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, ScheduleError};

/// Where run artifacts go and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    pub dir: PathBuf,
    /// Appended to every base name, e.g. `_20240105_221500`.
    pub stamp: Option<String>,
}

impl OutputNaming {
    pub fn fixed(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            stamp: None,
        }
    }

    pub fn timestamped(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            stamp: Some(chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()),
        }
    }

    pub fn new(dir: impl Into<PathBuf>, timestamped: bool) -> Self {
        if timestamped {
            Self::timestamped(dir)
        } else {
            Self::fixed(dir)
        }
    }

    pub fn path_for(&self, base: &str, extension: &str) -> PathBuf {
        let name = match &self.stamp {
            Some(stamp) => format!("{base}_{stamp}.{extension}"),
            None => format!("{base}.{extension}"),
        };
        self.dir.join(name)
    }
}

/// Replaces `path` with `bytes` in one step.
///
/// The data goes to a temp file next to the target which is then renamed
/// over it, so readers see either the old file or the new one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| ScheduleError::io(&dir, e))?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| ScheduleError::io(&dir, e))?;
    tmp.write_all(bytes).map_err(|e| ScheduleError::io(path, e))?;
    tmp.as_file().sync_all().map_err(|e| ScheduleError::io(path, e))?;
    tmp.persist(path).map_err(|e| ScheduleError::io(path, e.error))?;

    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
