//! Message types for the application (TEA pattern)
//!
//! Service failures are carried as display strings so messages stay `Clone`.

use chrono::NaiveDate;
use testdeck_client::{RefreshResponse, RunResponse};
use testdeck_core::{CatalogNode, ClassDetail, DashboardData, ExecutionResults, ExecutionSummary};

use crate::input_key::InputKey;
use crate::state::{CursorMove, FilterField, Focus, View};

/// Who asked for a dashboard fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Opening or reloading the view
    View,
    /// Auto-refresh timer
    Poll,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Leave the application
    Quit,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    SwitchView(View),
    SetFocus(Focus),
    MoveCursor(CursorMove),

    // ─────────────────────────────────────────────────────────
    // Catalog (sidebar)
    // ─────────────────────────────────────────────────────────
    LoadCatalog,
    CatalogLoaded {
        generation: u64,
        result: Result<Vec<CatalogNode>, String>,
    },
    TogglePackage(String),
    ToggleClassChecked(String),
    EnterSearchMode,
    SetSearch(String),
    /// Ask the service to rescan its classpath
    RefreshCatalog,
    CatalogRefreshed {
        result: Result<RefreshResponse, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Test Info
    // ─────────────────────────────────────────────────────────
    /// Open a class, or close it if it is already open
    OpenClass(String),
    ClassDetailLoaded {
        generation: u64,
        class_name: String,
        result: Result<ClassDetail, String>,
    },
    ToggleMethodCode(String),
    MethodCodeLoaded {
        unique_id: String,
        result: Result<String, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Runs
    // ─────────────────────────────────────────────────────────
    /// Submit every checked class
    RunSelected,
    /// Submit the classes of a past execution again
    RerunExecution(String),
    RunSubmitted {
        class_names: Vec<String>,
        result: Result<RunResponse, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Test Results
    // ─────────────────────────────────────────────────────────
    LoadExecutions,
    ExecutionsLoaded {
        generation: u64,
        result: Result<Vec<ExecutionSummary>, String>,
    },
    SelectExecution(String),
    /// Jump to the results view with an execution selected
    OpenExecution(String),
    ExecutionResultsLoaded {
        generation: u64,
        execution_id: String,
        result: Result<ExecutionResults, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Execution filter
    // ─────────────────────────────────────────────────────────
    CycleStatusFilter,
    EnterFilterInput(FilterField),
    SetInputBuffer(String),
    CommitFilterInput,
    ClearFilters,
    /// Set the date filter to the server's current date
    UseServerToday,
    ServerTodayLoaded {
        result: Result<NaiveDate, String>,
    },

    /// Leave search/filter input mode, discarding the edit
    CancelInput,
    /// Leave search/filter input mode, keeping the edit
    ExitInputMode,

    // ─────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────
    LoadDashboard,
    DashboardLoaded {
        generation: u64,
        origin: FetchOrigin,
        result: Result<DashboardData, String>,
    },
    DashboardPollTick {
        generation: u64,
    },

    // ─────────────────────────────────────────────────────────
    // Alerts
    // ─────────────────────────────────────────────────────────
    ShowAlert(String),
    DismissAlert,
}
