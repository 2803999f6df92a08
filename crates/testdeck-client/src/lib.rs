//! # testdeck-client - Test Execution Service Client
//!
//! Talks HTTP+JSON to the backend service that discovers, runs and records
//! JUnit tests.
//!
//! Depends on [`testdeck_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! - [`TestService`] - Async operations offered by the service
//! - [`HttpTestService`] - reqwest implementation
//! - [`RunResponse`], [`RefreshResponse`] - Wire replies the app inspects
//!
//! With the `test-helpers` feature, `test_utils::FakeTestService` provides an
//! in-memory implementation that records every call.

pub mod http;
pub mod protocol;
pub mod service;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use http::{HttpTestService, DEFAULT_TIMEOUT};
pub use protocol::{CatalogTree, RefreshResponse, RunRequest, RunResponse};
pub use service::{LocalTestService, TestService};
