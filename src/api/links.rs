//! Hypermedia links for weapon resources and pages

use reqwest::Url;
use uuid::Uuid;

use crate::models::{Link, Page, QueryShape};

pub const API_ROOT: &str = "/api/v1";
pub const WEAPONS_PATH: &str = "/api/v1/weapons";

/// Entry points advertised on the API root.
pub fn api_links() -> Vec<Link> {
    vec![
        Link::new("self", API_ROOT, "GET"),
        Link::new("weapons", WEAPONS_PATH, "GET"),
        Link::new("create-weapon", WEAPONS_PATH, "POST"),
    ]
}

pub fn weapon_href(id: Uuid) -> String {
    format!("{}/{}", WEAPONS_PATH, id)
}

pub fn weapon_links(id: Uuid) -> Vec<Link> {
    let href = weapon_href(id);
    vec![
        Link::new("self", href.clone(), "GET"),
        Link::new("update", href.clone(), "PUT"),
        Link::new("patch", href.clone(), "PATCH"),
        Link::new("delete", href, "DELETE"),
        Link::new("collection", WEAPONS_PATH, "GET"),
    ]
}

/// Self and create links, plus navigation for whichever neighbours exist.
/// `first` and `last` only appear when there is more than one page.
pub fn page_links<T>(page: &Page<T>, query: &QueryShape) -> Vec<Link> {
    let mut links = vec![
        Link::new("self", page_href(query, query.page), "GET"),
        Link::new("create", WEAPONS_PATH, "POST"),
    ];

    let total_pages = page.total_pages();
    if total_pages > 1 {
        links.push(Link::new("first", page_href(query, 0), "GET"));
    }
    if page.has_previous() {
        links.push(Link::new("prev", page_href(query, page.page - 1), "GET"));
    }
    if page.has_next() {
        links.push(Link::new("next", page_href(query, page.page + 1), "GET"));
    }
    if total_pages > 1 {
        let last = u32::try_from(total_pages - 1).unwrap_or(u32::MAX);
        links.push(Link::new("last", page_href(query, last), "GET"));
    }
    links
}

fn page_href(query: &QueryShape, page: u32) -> String {
    let mut pairs = vec![
        ("page".to_string(), page.to_string()),
        ("pageSize".to_string(), query.size.to_string()),
        ("sort".to_string(), query.sort.field.clone()),
        ("direction".to_string(), query.sort.direction.as_str().to_lowercase()),
    ];
    pairs.extend(query.filters.iter().map(|(k, v)| (k.clone(), v.clone())));

    // Only used for its form encoder; the origin is discarded.
    match Url::parse_with_params("http://localhost", &pairs) {
        Ok(url) => format!("{}?{}", WEAPONS_PATH, url.query().unwrap_or_default()),
        Err(_) => WEAPONS_PATH.to_string(),
    }
}
