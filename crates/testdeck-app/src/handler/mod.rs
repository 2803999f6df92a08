//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `navigation`: View switching and cursor movement
//! - `catalog`: Sidebar tree, class detail and method code
//! - `run`: Run submission and its outcome
//! - `results`: Execution list, selection and filters
//! - `dashboard`: Dashboard loads and the auto-refresh poller

pub(crate) mod catalog;
pub(crate) mod dashboard;
pub(crate) mod keys;
pub(crate) mod navigation;
pub(crate) mod results;
pub(crate) mod run;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use std::time::Duration;

use crate::message::{FetchOrigin, Message};

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    FetchCatalog {
        generation: u64,
    },

    FetchClassDetail {
        generation: u64,
        class_name: String,
    },

    FetchMethodCode {
        unique_id: String,
    },

    /// POST a run request for the given classes
    SubmitRun {
        class_names: Vec<String>,
    },

    FetchExecutions {
        generation: u64,
        limit: usize,
    },

    FetchExecutionResults {
        generation: u64,
        execution_id: String,
    },

    FetchDashboard {
        generation: u64,
        origin: FetchOrigin,
    },

    /// Ask the service to rescan its test catalog
    RefreshCatalog,

    FetchServerToday,

    /// Arm the one-shot poll timer, replacing any armed one
    ScheduleDashboardPoll {
        generation: u64,
        interval: Duration,
    },

    /// Cancel the armed poll timer, if any
    StopDashboardPolling,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Actions for the event loop to perform, in order
    pub actions: Vec<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            actions: Vec::new(),
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self::actions(vec![action])
    }

    pub fn actions(actions: Vec<UpdateAction>) -> Self {
        Self {
            message: None,
            actions,
        }
    }
}
