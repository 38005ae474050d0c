//! API Module
//!
//! HTTP handlers and routing for the codex gateway.
//!
//! # Endpoints
//! - `/api/v1/weapons` - Weapon CRUD with list paging and filtering
//! - `/cache/*` - Cache inspection and clearing
//! - `GET /health` - Health check endpoint

pub mod cache_handlers;
pub mod handlers;
pub mod links;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
