//! Request parsing for the weapons API
//!
//! Create, replace and patch bodies deserialize straight into
//! [`WeaponInput`](super::WeaponInput) and [`WeaponPatch`](super::WeaponPatch).
//! The list endpoint takes free-form query parameters, handled here.

use std::collections::{BTreeMap, HashMap};

use crate::error::{CodexError, Result};
use crate::models::{QueryShape, Sort, SortDirection, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD};

/// Query parameters with a paging or sorting meaning. Everything else is a
/// filter.
pub const RESERVED_PARAMS: [&str; 4] = ["page", "pageSize", "sort", "direction"];

/// Builds a [`QueryShape`] from raw list query parameters.
///
/// Defaults: page 0, pageSize 10, sort `name`, direction `asc`.
pub fn parse_list_params(params: &HashMap<String, String>) -> Result<QueryShape> {
    let page = parse_number(params, "page", 0)?;
    let size = parse_number(params, "pageSize", DEFAULT_PAGE_SIZE)?;

    let field = params
        .get("sort")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SORT_FIELD.to_string());
    let direction = match params.get("direction") {
        Some(raw) => raw.parse::<SortDirection>()?,
        None => SortDirection::Asc,
    };

    let filters: BTreeMap<String, String> = params
        .iter()
        .filter(|(key, _)| !RESERVED_PARAMS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let shape = QueryShape {
        page,
        size,
        sort: Sort { field, direction },
        filters,
    };
    shape.validate()?;
    Ok(shape)
}

fn parse_number(params: &HashMap<String, String>, name: &str, default: u32) -> Result<u32> {
    match params.get(name) {
        Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
            CodexError::validation(name, format!("expected a non-negative integer, got '{}'", raw))
        }),
        None => Ok(default),
    }
}
