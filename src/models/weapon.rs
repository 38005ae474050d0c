//! Weapon domain types
//!
//! Field names are camelCase and enum values SCREAMING_SNAKE_CASE on the
//! wire, matching the remote weapon service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CodexError, Result};

// == Limits ==
pub const MAX_NAME_LENGTH: usize = 100;
pub const MIN_DAMAGE: i32 = 1;
pub const MAX_DAMAGE: i32 = 999;
pub const MIN_DURABILITY: i32 = 1;
pub const MAX_DURABILITY: i32 = 9999;

// == Weapon Type ==
/// Closed set of weapon categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeaponType {
    Bat,
    Boomerang,
    Club,
    Hammer,
    Rod,
    Spear,
    OneHandedSword,
    TwoHandedSword,
    Other,
}

impl WeaponType {
    pub const ALL: [WeaponType; 9] = [
        WeaponType::Bat,
        WeaponType::Boomerang,
        WeaponType::Club,
        WeaponType::Hammer,
        WeaponType::Rod,
        WeaponType::Spear,
        WeaponType::OneHandedSword,
        WeaponType::TwoHandedSword,
        WeaponType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponType::Bat => "BAT",
            WeaponType::Boomerang => "BOOMERANG",
            WeaponType::Club => "CLUB",
            WeaponType::Hammer => "HAMMER",
            WeaponType::Rod => "ROD",
            WeaponType::Spear => "SPEAR",
            WeaponType::OneHandedSword => "ONE_HANDED_SWORD",
            WeaponType::TwoHandedSword => "TWO_HANDED_SWORD",
            WeaponType::Other => "OTHER",
        }
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeaponType {
    type Err = CodexError;

    /// Case-insensitive parse of the wire name.
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        WeaponType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| {
                CodexError::validation(
                    "weaponType",
                    format!("unknown weapon type '{}'", s),
                )
            })
    }
}

// == Element ==
/// Elemental affinity of a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Element {
    Fire,
    Ice,
    Shock,
    None,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Ice, Element::Shock, Element::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "FIRE",
            Element::Ice => "ICE",
            Element::Shock => "SHOCK",
            Element::None => "NONE",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Element {
    type Err = CodexError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Element::ALL
            .into_iter()
            .find(|e| e.as_str() == upper)
            .ok_or_else(|| CodexError::validation("element", format!("unknown element '{}'", s)))
    }
}

// == Weapon ==
/// A persisted weapon. The id is assigned by the backend on create and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: Uuid,
    pub name: String,
    pub weapon_type: WeaponType,
    pub damage: i32,
    pub durability: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Element>,
}

impl Weapon {
    /// Builds a weapon from an input under the given id.
    pub fn from_input(id: Uuid, input: &WeaponInput) -> Self {
        Self {
            id,
            name: input.name.trim().to_string(),
            weapon_type: input.weapon_type,
            damage: input.damage,
            durability: input.durability,
            element: input.element,
        }
    }
}

// == Weapon Input ==
/// Attributes of a weapon without its identity, used for create and full
/// replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponInput {
    pub name: String,
    pub weapon_type: WeaponType,
    pub damage: i32,
    pub durability: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Element>,
}

impl WeaponInput {
    pub fn new(name: impl Into<String>, weapon_type: WeaponType, damage: i32, durability: i32) -> Self {
        Self {
            name: name.into(),
            weapon_type,
            damage,
            durability,
            element: None,
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    /// Checks every field constraint, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_damage(self.damage)?;
        validate_durability(self.durability)
    }
}

// == Weapon Patch ==
/// Partial update. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_type: Option<WeaponType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Element>,
}

impl WeaponPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.weapon_type.is_none()
            && self.damage.is_none()
            && self.durability.is_none()
            && self.element.is_none()
    }

    /// Checks the present fields. An empty patch is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(CodexError::validation(
                "body",
                "at least one field must be provided",
            ));
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(damage) = self.damage {
            validate_damage(damage)?;
        }
        if let Some(durability) = self.durability {
            validate_durability(durability)?;
        }
        Ok(())
    }

    /// Applies the present fields onto `weapon`. The id is never touched.
    pub fn apply(&self, weapon: &mut Weapon) {
        if let Some(name) = &self.name {
            weapon.name = name.trim().to_string();
        }
        if let Some(weapon_type) = self.weapon_type {
            weapon.weapon_type = weapon_type;
        }
        if let Some(damage) = self.damage {
            weapon.damage = damage;
        }
        if let Some(durability) = self.durability {
            weapon.durability = durability;
        }
        if let Some(element) = self.element {
            weapon.element = Some(element);
        }
    }
}

// == Field Validators ==
fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CodexError::validation("name", "must not be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CodexError::validation(
            "name",
            format!("must be at most {} characters", MAX_NAME_LENGTH),
        ));
    }
    Ok(())
}

fn validate_damage(damage: i32) -> Result<()> {
    if !(MIN_DAMAGE..=MAX_DAMAGE).contains(&damage) {
        return Err(CodexError::validation(
            "damage",
            format!("must be between {} and {}", MIN_DAMAGE, MAX_DAMAGE),
        ));
    }
    Ok(())
}

fn validate_durability(durability: i32) -> Result<()> {
    if !(MIN_DURABILITY..=MAX_DURABILITY).contains(&durability) {
        return Err(CodexError::validation(
            "durability",
            format!("must be between {} and {}", MIN_DURABILITY, MAX_DURABILITY),
        ));
    }
    Ok(())
}
