use std::path::Path;

use crate::error::Result;
use crate::models::{ActivityState, Color, ScheduleConfig};
use crate::storage::config_store;

/// Loads the settings at `config_path`, starting empty if the file is missing.
pub fn get_settings(config_path: &Path) -> Result<ScheduleConfig> {
    config_store::load_or_default(config_path)
}

/// Saves edited settings. The background state is always stored as white.
pub fn update_settings(config_path: &Path, settings: &ScheduleConfig) -> Result<()> {
    let mut settings = settings.clone();
    settings.set_color(ActivityState::Empty, Color::WHITE);
    config_store::save(config_path, &settings)
}

pub fn pattern_titles(settings: &ScheduleConfig) -> Vec<String> {
    settings.titles()
}
