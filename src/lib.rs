//! Zelda Codex - a caching REST gateway for a weapons service
//!
//! Sits in front of a remote weapon backend and serves reads cache-aside,
//! invalidating cached weapons and pages on every successful mutation.

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{BackendError, CacheError, CodexError};
pub use service::WeaponStore;
pub use tasks::spawn_cleanup_task;
