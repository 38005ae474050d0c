//! Cache key layout
//!
//! Two namespaces live side by side in one cache:
//! - `weapon:{id}` holds a single weapon snapshot.
//! - `weapon-list:{shape}` holds one page per distinct query shape.
//!
//! Neither prefix is a prefix of the other, so evicting one namespace never
//! touches the other.

use serde_json::json;
use uuid::Uuid;

use crate::models::QueryShape;

pub const WEAPON_PREFIX: &str = "weapon:";
pub const WEAPON_LIST_PREFIX: &str = "weapon-list:";

/// Named cache regions exposed on the management endpoints: name, the key
/// prefix the region owns, and what it holds.
pub const CACHE_REGIONS: [(&str, &str, &str); 2] = [
    ("weapons", WEAPON_PREFIX, "Single weapon snapshots keyed by id"),
    (
        "weaponsList",
        WEAPON_LIST_PREFIX,
        "Weapon pages keyed by paging, sort and filters",
    ),
];

pub fn region_prefix(name: &str) -> Option<&'static str> {
    CACHE_REGIONS
        .iter()
        .find(|(region, _, _)| *region == name)
        .map(|(_, prefix, _)| *prefix)
}

pub fn region_names() -> Vec<String> {
    CACHE_REGIONS
        .iter()
        .map(|(name, _, _)| name.to_string())
        .collect()
}

pub fn weapon_key(id: &Uuid) -> String {
    format!("{}{}", WEAPON_PREFIX, id)
}

/// Key for one list query.
///
/// The shape is rendered as a JSON object. Object keys come out sorted and
/// every string is escaped, so equal shapes always produce the same key and
/// distinct shapes can never collide.
pub fn list_key(query: &QueryShape) -> String {
    let canonical = json!({
        "page": query.page,
        "size": query.size,
        "sort": query.sort.field,
        "dir": query.sort.direction.as_str(),
        "filters": query.filters,
    });
    format!("{}{}", WEAPON_LIST_PREFIX, canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortDirection;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_weapon_key() {
        let id = Uuid::nil();
        assert_eq!(
            weapon_key(&id),
            "weapon:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_namespaces_disjoint() {
        assert!(!WEAPON_LIST_PREFIX.starts_with(WEAPON_PREFIX));
        assert!(!WEAPON_PREFIX.starts_with(WEAPON_LIST_PREFIX));
        assert!(list_key(&QueryShape::default()).starts_with(WEAPON_LIST_PREFIX));
    }

    #[test]
    fn test_region_lookup() {
        assert_eq!(region_prefix("weapons"), Some(WEAPON_PREFIX));
        assert_eq!(region_prefix("weaponsList"), Some(WEAPON_LIST_PREFIX));
        assert_eq!(region_prefix("characters"), None);
    }

    #[test]
    fn test_list_key_ignores_filter_insertion_order() {
        let a = QueryShape::new(0, 10)
            .with_filter("weaponType", "SPEAR")
            .with_filter("element", "FIRE");
        let b = QueryShape::new(0, 10)
            .with_filter("element", "FIRE")
            .with_filter("weaponType", "SPEAR");
        assert_eq!(list_key(&a), list_key(&b));
    }

    #[test]
    fn test_list_key_escapes_separators() {
        // A filter value that mimics another filter must not collide.
        let a = QueryShape::new(0, 10).with_filter("a", "1\",\"b\":\"2");
        let b = QueryShape::new(0, 10)
            .with_filter("a", "1")
            .with_filter("b", "2");
        assert_ne!(list_key(&a), list_key(&b));
    }

    fn shape_strategy() -> impl Strategy<Value = QueryShape> {
        (
            0u32..50,
            1u32..100,
            "[a-zA-Z]{1,12}",
            any::<bool>(),
            prop::collection::btree_map("[a-zA-Z]{1,8}", "[a-zA-Z0-9_ ]{0,8}", 0..4),
        )
            .prop_map(|(page, size, field, desc, filters)| {
                let direction = if desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                QueryShape {
                    filters,
                    ..QueryShape::new(page, size).sorted_by(field, direction)
                }
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        // Identical shapes always map to the same key, and the key changes
        // whenever any single component changes.
        #[test]
        fn prop_list_key_determinism(shape in shape_strategy()) {
            let key = list_key(&shape);
            prop_assert_eq!(&key, &list_key(&shape.clone()));

            let mut other = shape.clone();
            other.page += 1;
            prop_assert_ne!(&key, &list_key(&other));

            let mut other = shape.clone();
            other.size += 1;
            prop_assert_ne!(&key, &list_key(&other));

            let mut other = shape.clone();
            other.sort.field.push('x');
            prop_assert_ne!(&key, &list_key(&other));

            let mut other = shape.clone();
            other.sort.direction = match shape.sort.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
            prop_assert_ne!(&key, &list_key(&other));

            let mut other = shape.clone();
            other.filters.insert("extra_filter".to_string(), "1".to_string());
            prop_assert_ne!(&key, &list_key(&other));
        }

        // Key equality coincides with shape equality.
        #[test]
        fn prop_list_key_injective(a in shape_strategy(), b in shape_strategy()) {
            prop_assert_eq!(a == b, list_key(&a) == list_key(&b));
        }

        #[test]
        fn prop_filter_order_irrelevant(
            pairs in prop::collection::vec(("[a-z]{1,6}", "[a-z0-9]{0,6}"), 0..6)
        ) {
            let forward: BTreeMap<String, String> = pairs.iter().cloned().collect();
            let mut reversed = QueryShape::new(0, 10);
            for (k, v) in forward.iter().rev() {
                reversed = reversed.with_filter(k.clone(), v.clone());
            }
            let shape = QueryShape { filters: forward, ..QueryShape::new(0, 10) };
            prop_assert_eq!(list_key(&shape), list_key(&reversed));
        }
    }
}
