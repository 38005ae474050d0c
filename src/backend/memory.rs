//! Embedded weapon service
//!
//! Keeps weapons in a map and answers the backend contract directly:
//! id assignment, unique names, validation, filtering, sorting and paging.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::backend::WeaponBackend;
use crate::error::BackendError;
use crate::models::{
    Element, Page, QueryShape, SortDirection, Weapon, WeaponInput, WeaponPatch, WeaponType,
};

/// Sort fields the embedded service understands.
pub const SORTABLE_FIELDS: [&str; 5] = ["name", "weaponType", "damage", "durability", "element"];

#[derive(Debug, Default)]
pub struct InMemoryWeaponBackend {
    weapons: RwLock<HashMap<Uuid, Weapon>>,
}

impl InMemoryWeaponBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WeaponBackend for InMemoryWeaponBackend {
    async fn get_by_id(&self, id: Uuid) -> Result<Weapon, BackendError> {
        self.weapons
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(BackendError::NotFound(id))
    }

    async fn list(&self, query: &QueryShape) -> Result<Page<Weapon>, BackendError> {
        if !SORTABLE_FIELDS.contains(&query.sort.field.as_str()) {
            return Err(BackendError::Rejected(format!(
                "unsupported sort field '{}'",
                query.sort.field
            )));
        }
        let filter = Filter::parse(query)?;

        let weapons = self.weapons.read().await;
        let mut matching: Vec<&Weapon> = weapons.values().filter(|w| filter.matches(w)).collect();
        matching.sort_by(|a, b| {
            let ord = compare_by(&query.sort.field, a, b);
            let ord = match query.sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            ord.then_with(|| a.id.cmp(&b.id))
        });

        let total = matching.len() as u64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let items: Vec<Weapon> = matching
            .into_iter()
            .skip(offset)
            .take(query.size as usize)
            .cloned()
            .collect();

        debug!(total, returned = items.len(), "listed weapons");
        Ok(Page::new(items, total, query.page, query.size))
    }

    async fn create(&self, input: &WeaponInput) -> Result<Weapon, BackendError> {
        input
            .validate()
            .map_err(|e| BackendError::Rejected(e.to_string()))?;

        let mut weapons = self.weapons.write().await;
        ensure_unique_name(&weapons, &input.name, None)?;

        let weapon = Weapon::from_input(Uuid::new_v4(), input);
        weapons.insert(weapon.id, weapon.clone());
        debug!(id = %weapon.id, name = %weapon.name, "weapon created");
        Ok(weapon)
    }

    async fn replace(&self, id: Uuid, input: &WeaponInput) -> Result<Weapon, BackendError> {
        input
            .validate()
            .map_err(|e| BackendError::Rejected(e.to_string()))?;

        let mut weapons = self.weapons.write().await;
        if !weapons.contains_key(&id) {
            return Err(BackendError::NotFound(id));
        }
        ensure_unique_name(&weapons, &input.name, Some(id))?;

        let weapon = Weapon::from_input(id, input);
        weapons.insert(id, weapon.clone());
        Ok(weapon)
    }

    async fn update(&self, id: Uuid, patch: &WeaponPatch) -> Result<Weapon, BackendError> {
        patch
            .validate()
            .map_err(|e| BackendError::Rejected(e.to_string()))?;

        let mut weapons = self.weapons.write().await;
        let mut weapon = weapons.get(&id).cloned().ok_or(BackendError::NotFound(id))?;
        if let Some(name) = &patch.name {
            ensure_unique_name(&weapons, name, Some(id))?;
        }

        patch.apply(&mut weapon);
        weapons.insert(id, weapon.clone());
        Ok(weapon)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BackendError> {
        Ok(self.weapons.write().await.remove(&id).is_some())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

fn ensure_unique_name(
    weapons: &HashMap<Uuid, Weapon>,
    name: &str,
    except: Option<Uuid>,
) -> Result<(), BackendError> {
    let wanted = name.trim();
    let taken = weapons
        .values()
        .any(|w| Some(w.id) != except && w.name.eq_ignore_ascii_case(wanted));
    if taken {
        Err(BackendError::AlreadyExists(wanted.to_string()))
    } else {
        Ok(())
    }
}

fn compare_by(field: &str, a: &Weapon, b: &Weapon) -> Ordering {
    match field {
        "weaponType" => a.weapon_type.cmp(&b.weapon_type),
        "damage" => a.damage.cmp(&b.damage),
        "durability" => a.durability.cmp(&b.durability),
        "element" => a.element.cmp(&b.element),
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    }
}

// == Filter ==
/// Recognized filters: `weaponType`, `element` (exact, case-insensitive) and
/// `name` (case-insensitive substring). Other keys are ignored.
#[derive(Debug, Default)]
struct Filter {
    weapon_type: Option<WeaponType>,
    element: Option<Element>,
    name: Option<String>,
}

impl Filter {
    fn parse(query: &QueryShape) -> Result<Self, BackendError> {
        let mut filter = Filter::default();
        for (key, value) in &query.filters {
            match key.as_str() {
                "weaponType" => {
                    let parsed = value.parse::<WeaponType>();
                    filter.weapon_type = Some(parsed.map_err(|e| BackendError::Rejected(e.to_string()))?);
                }
                "element" => {
                    let parsed = value.parse::<Element>();
                    filter.element = Some(parsed.map_err(|e| BackendError::Rejected(e.to_string()))?);
                }
                "name" => filter.name = Some(value.to_lowercase()),
                _ => {}
            }
        }
        Ok(filter)
    }

    fn matches(&self, weapon: &Weapon) -> bool {
        self.weapon_type.map_or(true, |t| weapon.weapon_type == t)
            && self.element.map_or(true, |e| weapon.element == Some(e))
            && self
                .name
                .as_ref()
                .map_or(true, |n| weapon.name.to_lowercase().contains(n))
    }
}
