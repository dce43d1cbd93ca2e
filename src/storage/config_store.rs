use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::models::ScheduleConfig;
use crate::storage::output::write_atomic;

pub fn load(path: &Path) -> Result<ScheduleConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ScheduleError::ConfigNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(ScheduleError::io(path, e)),
    };

    let config: ScheduleConfig =
        serde_json::from_str(&content).map_err(|e| ScheduleError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    config.validate(path)?;
    Ok(config)
}

/// Like [`load`], but a missing file yields an empty configuration so a new
/// schedule can be started from scratch.
pub fn load_or_default(path: &Path) -> Result<ScheduleConfig> {
    match load(path) {
        Err(ScheduleError::ConfigNotFound { path }) => {
            log::warn!("{} not found, starting from an empty config", path.display());
            Ok(ScheduleConfig::default())
        }
        other => other,
    }
}

/// Writes the whole config as 4-space indented JSON. Every state gets a
/// color entry, missing ones as white.
pub fn save(path: &Path, config: &ScheduleConfig) -> Result<()> {
    let mut full = config.clone();
    full.colors = config.colors.filled();

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    full.serialize(&mut ser)
        .map_err(|e| ScheduleError::io(path, e.into()))?;

    write_atomic(path, &buf)?;
    log::info!("saved config to {}", path.display());
    Ok(())
}
