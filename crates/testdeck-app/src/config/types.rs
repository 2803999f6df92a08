//! Configuration types for testdeck
//!
//! Every section and field has a serde default so a partial (or empty)
//! `config.toml` is always valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::state::View;

/// Lower bound for the dashboard polling interval
pub const MIN_POLL_INTERVAL_MS: u64 = 500;

/// Global application settings from `.testdeck/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub polling: PollingSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Base URL of the test execution service API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How many executions the history list requests
    #[serde(default = "default_execution_limit")]
    pub execution_limit: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            execution_limit: default_execution_limit(),
        }
    }
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_execution_limit() -> usize {
    20
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PollingSettings {
    /// Dashboard refresh interval while executions are running
    #[serde(default = "default_dashboard_interval_ms")]
    pub dashboard_interval_ms: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            dashboard_interval_ms: default_dashboard_interval_ms(),
        }
    }
}

impl PollingSettings {
    /// The configured interval, clamped to [`MIN_POLL_INTERVAL_MS`]
    pub fn dashboard_interval(&self) -> Duration {
        Duration::from_millis(self.dashboard_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

fn default_dashboard_interval_ms() -> u64 {
    3000
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// View shown at startup
    #[serde(default)]
    pub default_view: View,

    /// Show start times in the execution list
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            default_view: View::default(),
            show_timestamps: true,
        }
    }
}

fn default_true() -> bool {
    true
}
