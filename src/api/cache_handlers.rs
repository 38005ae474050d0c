//! Cache management handlers
//!
//! Operator endpoints for inspecting and clearing the weapon caches. Unlike
//! weapon operations, a cache failure here is reported to the caller.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use super::handlers::AppState;
use crate::cache::keys::{region_names, region_prefix, CACHE_REGIONS};
use crate::error::{CodexError, Result};
use crate::models::{
    CacheClearResponse, CacheConfiguration, CacheInfoResponse, CacheRegionInfo,
    CacheStatsResponse, CacheStatusResponse,
};

/// Handler for DELETE /cache/clear
pub async fn clear_all(State(state): State<AppState>) -> Result<Json<CacheClearResponse>> {
    let removed_entries = state.cache.clear().await?;

    info!(removed_entries, "all caches cleared");
    Ok(Json(CacheClearResponse {
        message: "All caches cleared".to_string(),
        cleared_caches: region_names(),
        removed_entries,
    }))
}

/// Handler for DELETE /cache/clear/:region
pub async fn clear_region(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Json<CacheClearResponse>> {
    let prefix =
        region_prefix(&region).ok_or_else(|| CodexError::UnknownCacheRegion(region.clone()))?;
    let removed_entries = state.cache.evict_namespace(prefix).await?;

    info!(region = %region, removed_entries, "cache region cleared");
    Ok(Json(CacheClearResponse {
        message: format!("Cache '{}' cleared", region),
        cleared_caches: vec![region],
        removed_entries,
    }))
}

/// Handler for GET /cache/status
pub async fn cache_status(State(state): State<AppState>) -> Result<Json<CacheStatusResponse>> {
    let stats = state.cache.stats().await?;
    let available_caches = region_names();

    Ok(Json(CacheStatusResponse {
        cache_backend: state.cache.name().to_string(),
        weapon_backend: state.store.backend_name().to_string(),
        total_caches: available_caches.len(),
        available_caches,
        total_entries: stats.total_entries,
    }))
}

/// Handler for GET /cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> Result<Json<CacheStatsResponse>> {
    let stats = state.cache.stats().await?;

    Ok(Json(CacheStatsResponse::new(stats, state.store.ttl().as_secs())))
}

/// Handler for GET /api/v1/cache/info
pub async fn cache_info(State(state): State<AppState>) -> Result<Json<CacheInfoResponse>> {
    let mut cache_types = BTreeMap::new();
    for (name, prefix, description) in CACHE_REGIONS {
        let entries = state.cache.count_namespace(prefix).await?;
        cache_types.insert(
            name.to_string(),
            CacheRegionInfo {
                description: description.to_string(),
                key_prefix: prefix.to_string(),
                entries,
            },
        );
    }
    let available_caches = region_names();

    Ok(Json(CacheInfoResponse {
        cache_backend: state.cache.name().to_string(),
        total_caches: available_caches.len(),
        available_caches,
        configuration: CacheConfiguration {
            default_ttl_seconds: state.store.ttl().as_secs(),
            serialization: "JSON".to_string(),
        },
        cache_types,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
