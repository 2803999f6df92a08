//! testdeck-app - Application state and orchestration for testdeck
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! dashboard: a single owned [`AppState`], a [`Message`] enum, the pure
//! `handler::update` function, and the action layer that runs service calls
//! as background tasks. The [`Engine`] ties them together for a frontend.

pub mod actions;
pub mod cache;
pub mod config;
pub mod engine;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod poller;
pub mod process;
pub mod signals;
pub mod state;

// Re-export primary types
pub use cache::{DashboardCache, ExecutionCache};
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use state::{AppState, View};
