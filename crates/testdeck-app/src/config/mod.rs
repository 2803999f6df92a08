//! Configuration file parsing for testdeck
//!
//! Supports:
//! - `.testdeck/config.toml` - Project settings
//! - `<config_dir>/testdeck/config.toml` - Per-user fallback
//! - `TESTDECK_SERVER_URL` - Server URL override

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, init_config_dir, load_settings, load_settings_file, project_config_path,
    user_config_path, CONFIG_DIR, CONFIG_FILENAME, SERVER_URL_ENV,
};
pub use types::*;
