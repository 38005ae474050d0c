//! API Handlers
//!
//! Weapon endpoints under `/api/v1/weapons` plus the health check. Bodies
//! and path ids that fail to parse are answered with the same JSON error
//! envelope as domain validation failures.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::links::{api_links, page_links, weapon_href, weapon_links};
use crate::backend::WeaponBackend;
use crate::cache::CacheBackend;
use crate::error::{CodexError, Result};
use crate::models::{
    parse_list_params, ApiInfoResponse, HealthResponse, Weapon, WeaponInput, WeaponPageResponse,
    WeaponPatch, WeaponResponse,
};
use crate::service::WeaponStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<WeaponStore>,
    /// Same cache the store uses; the management endpoints work on it directly.
    pub cache: Arc<dyn CacheBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn WeaponBackend>, cache: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        let store = WeaponStore::new(backend, cache.clone(), ttl);
        Self {
            store: Arc::new(store),
            cache,
        }
    }
}

fn to_response(weapon: Weapon) -> WeaponResponse {
    WeaponResponse {
        links: weapon_links(weapon.id),
        weapon,
    }
}

fn weapon_id(path: std::result::Result<Path<Uuid>, PathRejection>) -> Result<Uuid> {
    path.map(|Path(id)| id)
        .map_err(|rejection| CodexError::validation("id", rejection.body_text()))
}

fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| CodexError::validation("body", rejection.body_text()))
}

/// Handler for GET /api/v1/weapons/:id
pub async fn get_weapon(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
) -> Result<Json<WeaponResponse>> {
    let id = weapon_id(path)?;
    let weapon = state.store.get_by_id(id).await?;
    Ok(Json(to_response(weapon)))
}

/// Handler for GET /api/v1/weapons
///
/// `page`, `pageSize`, `sort` and `direction` shape the page; every other
/// parameter is passed to the backend as a filter.
pub async fn list_weapons(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<WeaponPageResponse>> {
    let query = parse_list_params(&params)?;
    let page = state.store.list(&query).await?;

    let links = page_links(&page, &query);
    Ok(Json(WeaponPageResponse::new(page.map(to_response), links)))
}

/// Handler for POST /api/v1/weapons
pub async fn create_weapon(
    State(state): State<AppState>,
    body: std::result::Result<Json<WeaponInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let input = json_body(body)?;
    let weapon = state.store.create(&input).await?;

    let location = weapon_href(weapon.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(to_response(weapon)),
    ))
}

/// Handler for PUT /api/v1/weapons/:id
pub async fn replace_weapon(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
    body: std::result::Result<Json<WeaponInput>, JsonRejection>,
) -> Result<Json<WeaponResponse>> {
    let id = weapon_id(path)?;
    let input = json_body(body)?;
    let weapon = state.store.replace(id, &input).await?;
    Ok(Json(to_response(weapon)))
}

/// Handler for PATCH /api/v1/weapons/:id
pub async fn patch_weapon(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
    body: std::result::Result<Json<WeaponPatch>, JsonRejection>,
) -> Result<Json<WeaponResponse>> {
    let id = weapon_id(path)?;
    let patch = json_body(body)?;
    let weapon = state.store.update(id, &patch).await?;
    Ok(Json(to_response(weapon)))
}

/// Handler for DELETE /api/v1/weapons/:id
pub async fn delete_weapon(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode> {
    let id = weapon_id(path)?;
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Advertised on the API root as `"METHOD path"` and description.
const ENDPOINTS: [(&str, &str); 13] = [
    ("GET /api/v1", "API information"),
    ("GET /api/v1/weapons", "List weapons (page, pageSize, sort, direction, filters)"),
    ("POST /api/v1/weapons", "Create a weapon"),
    ("GET /api/v1/weapons/{id}", "Get a weapon by id"),
    ("PUT /api/v1/weapons/{id}", "Replace a weapon"),
    ("PATCH /api/v1/weapons/{id}", "Update some fields of a weapon"),
    ("DELETE /api/v1/weapons/{id}", "Delete a weapon"),
    ("GET /api/v1/cache/info", "Cache regions and configuration"),
    ("GET /cache/status", "Cache regions and backends in use"),
    ("GET /cache/stats", "Cache hit, miss and removal counters"),
    ("DELETE /cache/clear", "Clear every cache region"),
    ("DELETE /cache/clear/{region}", "Clear one cache region"),
    ("GET /health", "Health check"),
];

/// Handler for GET /api/v1
pub async fn api_info() -> Json<ApiInfoResponse> {
    let endpoints: BTreeMap<String, String> = ENDPOINTS
        .iter()
        .map(|(route, description)| (route.to_string(), description.to_string()))
        .collect();

    Json(ApiInfoResponse::new(api_links(), endpoints))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
