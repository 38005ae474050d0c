//! Remote weapon backend
//!
//! [`WeaponBackend`] is the source of truth the store sits in front of.
//! Two implementations ship with the gateway:
//! - [`HttpWeaponBackend`]: JSON over HTTP to a remote weapons service.
//! - [`InMemoryWeaponBackend`]: an embedded service for standalone runs.

mod http;
mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::BackendError;
use crate::models::{Page, QueryShape, Weapon, WeaponInput, WeaponPatch};

pub use http::HttpWeaponBackend;
pub use memory::InMemoryWeaponBackend;

/// Weapon persistence as seen by the gateway.
///
/// Every call may fail with [`BackendError::Unavailable`] on transport
/// problems, kept distinct from the domain outcomes.
#[async_trait]
pub trait WeaponBackend: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Weapon, BackendError>;

    /// Filtering, sorting and paging are interpreted here, not by callers.
    async fn list(&self, query: &QueryShape) -> Result<Page<Weapon>, BackendError>;

    /// Persists a new weapon under a freshly assigned id.
    async fn create(&self, input: &WeaponInput) -> Result<Weapon, BackendError>;

    async fn replace(&self, id: Uuid, input: &WeaponInput) -> Result<Weapon, BackendError>;

    async fn update(&self, id: Uuid, patch: &WeaponPatch) -> Result<Weapon, BackendError>;

    /// `Ok(false)` when there was nothing to delete.
    async fn delete(&self, id: Uuid) -> Result<bool, BackendError>;

    /// Short name for status reporting.
    fn name(&self) -> &'static str;
}
