use std::path::PathBuf;

const ENV_CONFIG_FILE: &str = "SHIFTCLOCK_CONFIG";
const ENV_RESULTS_DIR: &str = "SHIFTCLOCK_RESULTS_DIR";

pub const DEFAULT_CONFIG_FILE: &str = "config-files/config.json";
pub const DEFAULT_RESULTS_DIR: &str = "results";

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn config_path_from_env() -> Option<PathBuf> {
    non_empty_env(ENV_CONFIG_FILE).map(PathBuf::from)
}

pub fn results_dir_from_env() -> Option<PathBuf> {
    non_empty_env(ENV_RESULTS_DIR).map(PathBuf::from)
}

/// An explicit path wins, then the environment, then the built-in default.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(config_path_from_env)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn resolve_results_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(results_dir_from_env)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR))
}
