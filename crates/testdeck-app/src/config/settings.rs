//! Settings loading and initialization

use std::path::{Path, PathBuf};

use testdeck_core::prelude::*;

use super::types::Settings;

/// Project-local configuration directory
pub const CONFIG_DIR: &str = ".testdeck";
/// Settings file name inside [`CONFIG_DIR`]
pub const CONFIG_FILENAME: &str = "config.toml";
/// Environment variable overriding `server.base_url`
pub const SERVER_URL_ENV: &str = "TESTDECK_SERVER_URL";

const DEFAULT_CONFIG: &str = r#"# testdeck configuration

[server]
base_url = "http://localhost:8080/api"   # Test execution service API root
request_timeout_secs = 10
execution_limit = 20                     # Rows requested for the history list

[polling]
dashboard_interval_ms = 3000             # Refresh while runs are in progress (min 500)

[ui]
default_view = "dashboard"               # dashboard | test_info | test_results
show_timestamps = true
"#;

/// Path of the project-local settings file
pub fn project_config_path(project_path: &Path) -> PathBuf {
    project_path.join(CONFIG_DIR).join(CONFIG_FILENAME)
}

/// Path of the per-user settings file, if the platform has a config dir
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("testdeck").join(CONFIG_FILENAME))
}

/// Load settings for a project.
///
/// Looks for `.testdeck/config.toml` in the project, then for the per-user
/// file. Returns defaults if neither exists or the file can't be parsed.
pub fn load_settings(project_path: &Path) -> Settings {
    let candidates = std::iter::once(project_config_path(project_path)).chain(user_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        return match load_settings_file(&path) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Settings::default()
            }
        };
    }

    debug!("No config file for {:?}, using defaults", project_path);
    Settings::default()
}

/// Load settings from an explicit file. A missing file is an error.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Apply environment overrides (currently only the server URL)
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(url) = std::env::var(SERVER_URL_ENV) {
        let url = url.trim();
        if !url.is_empty() {
            debug!("Server URL overridden by {}", SERVER_URL_ENV);
            settings.server.base_url = url.to_string();
        }
    }
}

/// Write a commented default `config.toml` unless one already exists.
///
/// Returns the path of the settings file.
pub fn init_config_dir(project_path: &Path) -> Result<PathBuf> {
    let dir = project_path.join(CONFIG_DIR);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::config(format!("Failed to create {CONFIG_DIR} dir: {e}")))?;
    }

    let config_path = dir.join(CONFIG_FILENAME);
    if config_path.exists() {
        info!("Keeping existing {:?}", config_path);
    } else {
        std::fs::write(&config_path, DEFAULT_CONFIG)?;
        info!("Created {:?}", config_path);
    }
    Ok(config_path)
}
