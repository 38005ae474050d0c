//! Weapon service layer

mod weapon_store;

pub use weapon_store::WeaponStore;
