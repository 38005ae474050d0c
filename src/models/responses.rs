//! Response DTOs for the codex API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Page, Weapon};

/// Hypermedia link attached to API resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    pub method: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            method: method.into(),
        }
    }
}

/// A weapon plus its links.
#[derive(Debug, Clone, Serialize)]
pub struct WeaponResponse {
    #[serde(flatten)]
    pub weapon: Weapon,
    #[serde(rename = "_links")]
    pub links: Vec<Link>,
}

/// A page of weapons plus collection and navigation links.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponPageResponse {
    pub content: Vec<WeaponResponse>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    #[serde(rename = "_links")]
    pub links: Vec<Link>,
}

impl WeaponPageResponse {
    pub fn new(page: Page<WeaponResponse>, links: Vec<Link>) -> Self {
        let total_pages = page.total_pages();
        Self {
            content: page.items,
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages,
            links,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for GET /api/v1
#[derive(Debug, Clone, Serialize)]
pub struct ApiInfoResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub timestamp: String,
    #[serde(rename = "_links")]
    pub links: Vec<Link>,
    /// `"METHOD path"` to what the endpoint does
    pub endpoints: BTreeMap<String, String>,
}

impl ApiInfoResponse {
    pub fn new(links: Vec<Link>, endpoints: BTreeMap<String, String>) -> Self {
        Self {
            name: "Zelda Codex API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Weapons catalog with a read-through cache in front of the weapon service"
                .to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            links,
            endpoints,
        }
    }
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub hit_rate: f64,
    pub default_ttl_seconds: u64,
}

impl CacheStatsResponse {
    pub fn new(stats: CacheStats, default_ttl_seconds: u64) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
            default_ttl_seconds,
        }
    }
}

/// Response body for GET /cache/status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatusResponse {
    pub cache_backend: String,
    pub weapon_backend: String,
    pub available_caches: Vec<String>,
    pub total_caches: usize,
    pub total_entries: usize,
}

/// Response body for GET /api/v1/cache/info
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInfoResponse {
    pub cache_backend: String,
    pub available_caches: Vec<String>,
    pub total_caches: usize,
    pub configuration: CacheConfiguration,
    pub cache_types: BTreeMap<String, CacheRegionInfo>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfiguration {
    pub default_ttl_seconds: u64,
    /// Encoding of cached snapshots
    pub serialization: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRegionInfo {
    pub description: String,
    pub key_prefix: String,
    pub entries: usize,
}

/// Response body for the cache clear endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheClearResponse {
    pub message: String,
    pub cleared_caches: Vec<String>,
    pub removed_entries: usize,
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    /// Stable error code, e.g. `VALIDATION_ERROR`
    pub error: String,
    /// Human-readable message
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
            details: BTreeMap::new(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}
