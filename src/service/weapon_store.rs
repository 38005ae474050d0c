//! Cache-aside weapon store
//!
//! Reads go to the cache first and fall through to the remote backend on a
//! miss. Mutations always go to the backend and then evict what they may
//! have made stale:
//!
//! | operation | on success                                          |
//! |-----------|-----------------------------------------------------|
//! | create    | evict list namespace, warm `weapon:{newId}`         |
//! | replace   | evict `weapon:{id}` and list namespace              |
//! | update    | evict `weapon:{id}` and list namespace              |
//! | delete    | evict `weapon:{id}` and list namespace              |
//!
//! Absence is never cached: neither a NotFound lookup nor an empty page.
//! Cache failures are logged and swallowed; the operation carries on against
//! the backend as if the cache had missed.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::WeaponBackend;
use crate::cache::keys::{list_key, weapon_key, WEAPON_LIST_PREFIX};
use crate::cache::CacheBackend;
use crate::error::{CodexError, Result};
use crate::models::{Page, QueryShape, Weapon, WeaponInput, WeaponPatch};

pub struct WeaponStore {
    backend: Arc<dyn WeaponBackend>,
    cache: Arc<dyn CacheBackend>,
    ttl: Duration,
}

impl WeaponStore {
    pub fn new(backend: Arc<dyn WeaponBackend>, cache: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self {
            backend,
            cache,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    // == Get By Id ==
    /// Cached snapshot when present, otherwise the backend's answer, which
    /// is then cached. A NotFound answer is passed through and not cached.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Weapon> {
        let key = weapon_key(&id);
        if let Some(weapon) = self.cache_read::<Weapon>(&key).await {
            debug!(%id, "weapon cache hit");
            return Ok(weapon);
        }

        info!(%id, "weapon cache miss, fetching from backend");
        let weapon = self.backend.get_by_id(id).await?;
        self.cache_write(&key, &weapon).await;
        Ok(weapon)
    }

    // == List ==
    /// Pages are cached per query shape. Empty pages are not cached so a
    /// growing catalog never stays hidden behind a stale "no results".
    pub async fn list(&self, query: &QueryShape) -> Result<Page<Weapon>> {
        query.validate()?;

        let key = list_key(query);
        if let Some(page) = self.cache_read::<Page<Weapon>>(&key).await {
            debug!(key = %key, "weapon list cache hit");
            return Ok(page);
        }

        info!(
            page = query.page,
            size = query.size,
            sort = %query.sort.field,
            filters = ?query.filters,
            "weapon list cache miss, fetching from backend"
        );
        let page = self.backend.list(query).await?;
        if !page.is_empty() {
            self.cache_write(&key, &page).await;
        }
        Ok(page)
    }

    // == Create ==
    pub async fn create(&self, input: &WeaponInput) -> Result<Weapon> {
        input.validate()?;

        info!(name = %input.name, "creating weapon");
        let weapon = self.backend.create(input).await?;

        self.evict_lists().await;
        // Warm the entry the caller is most likely to read next.
        self.cache_write(&weapon_key(&weapon.id), &weapon).await;
        Ok(weapon)
    }

    // == Replace ==
    pub async fn replace(&self, id: Uuid, input: &WeaponInput) -> Result<Weapon> {
        input.validate()?;

        info!(%id, "replacing weapon");
        let weapon = self.backend.replace(id, input).await?;

        self.evict_weapon(id).await;
        ensure_same_id(id, &weapon)?;
        Ok(weapon)
    }

    // == Update ==
    pub async fn update(&self, id: Uuid, patch: &WeaponPatch) -> Result<Weapon> {
        patch.validate()?;

        info!(%id, "updating weapon");
        let weapon = self.backend.update(id, patch).await?;

        self.evict_weapon(id).await;
        ensure_same_id(id, &weapon)?;
        Ok(weapon)
    }

    // == Delete ==
    /// Deleting a weapon the backend does not know is a NotFound, and leaves
    /// the cache as it was.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        info!(%id, "deleting weapon");
        if !self.backend.delete(id).await? {
            return Err(CodexError::NotFound(id));
        }

        self.evict_weapon(id).await;
        Ok(())
    }

    // == Cache Helpers ==
    /// A decode failure is treated like a miss; the next fill overwrites the
    /// unreadable entry.
    async fn cache_read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(key = %key, error = %err, "unreadable cache entry, continuing without cache");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(key = %key, error = %err, "cache get failed, continuing without cache");
                None
            }
        }
    }

    async fn cache_write<T: Serialize>(&self, key: &str, value: &T) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(key = %key, error = %err, "could not serialize cache entry");
                return;
            }
        };
        if let Err(err) = self.cache.put(key, bytes, self.ttl).await {
            warn!(key = %key, error = %err, "cache put failed, continuing without cache");
        }
    }

    async fn evict_weapon(&self, id: Uuid) {
        let key = weapon_key(&id);
        if let Err(err) = self.cache.evict(&key).await {
            warn!(key = %key, error = %err, "cache evict failed");
        }
        self.evict_lists().await;
    }

    async fn evict_lists(&self) {
        match self.cache.evict_namespace(WEAPON_LIST_PREFIX).await {
            Ok(removed) => debug!(removed, "weapon list cache invalidated"),
            Err(err) => warn!(error = %err, "cache namespace evict failed"),
        }
    }
}

fn ensure_same_id(id: Uuid, weapon: &Weapon) -> Result<()> {
    if weapon.id != id {
        return Err(CodexError::Backend(format!(
            "backend returned weapon {} for {}",
            weapon.id, id
        )));
    }
    Ok(())
}
