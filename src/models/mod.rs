//! Domain types and DTOs for the codex API
//!
//! Weapons, query shapes and pages are shared by the store, the backends and
//! the HTTP layer. Response DTOs only exist at the HTTP edge.

pub mod query;
pub mod requests;
pub mod responses;
pub mod weapon;

// Re-export commonly used types
pub use query::{
    Page, QueryShape, Sort, SortDirection, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD, MAX_PAGE_SIZE,
};
pub use requests::parse_list_params;
pub use responses::{
    ApiInfoResponse, CacheClearResponse, CacheConfiguration, CacheInfoResponse, CacheRegionInfo,
    CacheStatsResponse, CacheStatusResponse, ErrorResponse, HealthResponse, Link,
    WeaponPageResponse, WeaponResponse,
};
pub use weapon::{Element, Weapon, WeaponInput, WeaponPatch, WeaponType};
