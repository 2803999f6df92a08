//! # testdeck-core - Core Domain Types
//!
//! Foundation crate for testdeck. Provides the domain model of the test
//! execution service, the pure transformation engines the views are built
//! from, error handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Catalog (`catalog`)
//! - [`CatalogNode`] - Package/class tree shown in the sidebar
//! - [`ClassDetail`] - A test class with its method tree
//! - [`MethodNode`] - Either a test method or a nested test class grouping
//!
//! ### Executions (`execution`)
//! - [`ExecutionSummary`] - One row of the execution history
//! - [`ExecutionStatus`] - RUNNING / COMPLETED / FAILED
//! - [`ResultNode`] - Recursive per-execution result tree
//! - [`ResultSummary`] - Total/success/failed/skipped/duration counts
//!
//! ### Result tree formatting (`result_tree`)
//! - [`group_by_test_class()`] - Unwrap the engine sentinel node
//! - [`aggregate()`] - Sum leaf outcomes of a subtree
//! - [`is_nested_class_node()`] - Nested class detection for display
//!
//! ### Filtering (`filter`)
//! - [`FilterState`], [`StatusFilter`] - Execution list filter value
//! - [`apply_filter()`] - Stable filtering of an execution list
//!
//! ### Dashboard (`dashboard`)
//! - [`DashboardData`] - Today's stats, recent executions, trend, failures
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum grouped by layer (transport, config, ...)
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use testdeck_core::prelude::*;
//! ```

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod execution;
pub mod filter;
pub mod logging;
pub mod result_tree;

/// Prelude for common imports used throughout all testdeck crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use catalog::{
    filter_catalog, CatalogNode, CatalogNodeKind, ClassDetail, MethodNode, TestMethod,
    NestedClassGroup,
};
pub use dashboard::{DashboardData, FailureEntry, TodayStats, TrendPoint};
pub use error::{Error, Result};
pub use execution::{
    ExecutionResults, ExecutionStatus, ExecutionSummary, ResultContainer, ResultLeaf, ResultNode,
    ResultStatus, ResultSummary,
};
pub use filter::{apply_filter, FilterState, StatusFilter};
pub use result_tree::{
    aggregate, group_by_test_class, is_nested_class_node, summarize, Counts, ENGINE_DISPLAY_NAME,
};
