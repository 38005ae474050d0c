//! API Routes
//!
//! Configures the Axum router with the weapon, cache and health endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::cache_handlers::{cache_info, cache_stats, cache_status, clear_all, clear_region};
use super::handlers::{
    api_info, create_weapon, delete_weapon, get_weapon, health_handler, list_weapons,
    patch_weapon, replace_weapon, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/v1` - API name, version, links and endpoint index
/// - `GET /api/v1/cache/info` - Cache regions and configuration
/// - `GET|POST /api/v1/weapons` - List or create weapons
/// - `GET|PUT|PATCH|DELETE /api/v1/weapons/:id` - Single weapon
/// - `DELETE /cache/clear` - Clear every cache region
/// - `DELETE /cache/clear/:region` - Clear one region
/// - `GET /cache/status` - Regions and backends in use
/// - `GET /cache/stats` - Hit, miss and eviction counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1", get(api_info))
        .route("/api/v1/cache/info", get(cache_info))
        .route("/api/v1/weapons", get(list_weapons).post(create_weapon))
        .route(
            "/api/v1/weapons/:id",
            get(get_weapon)
                .put(replace_weapon)
                .patch(patch_weapon)
                .delete(delete_weapon),
        )
        .route("/cache/clear", delete(clear_all))
        .route("/cache/clear/:region", delete(clear_region))
        .route("/cache/status", get(cache_status))
        .route("/cache/stats", get(cache_stats))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
