//! Integration Tests for the HTTP weapon backend
//!
//! Each test stands up a [`MockServer`] playing the remote weapons service
//! and points [`HttpWeaponBackend`] at it.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zelda_codex::backend::{HttpWeaponBackend, WeaponBackend};
use zelda_codex::cache::MemoryCache;
use zelda_codex::models::{
    Element, Page, QueryShape, SortDirection, Weapon, WeaponInput, WeaponPatch, WeaponType,
};
use zelda_codex::{BackendError, CodexError, WeaponStore};

// == Fixtures ==

fn client_for(server: &MockServer) -> HttpWeaponBackend {
    HttpWeaponBackend::new(server.uri(), Duration::from_secs(1), Duration::from_secs(2)).unwrap()
}

fn master_sword() -> WeaponInput {
    WeaponInput::new("Master Sword", WeaponType::OneHandedSword, 30, 200)
}

fn stored(input: &WeaponInput) -> Weapon {
    Weapon::from_input(Uuid::new_v4(), input)
}

fn weapon_path(id: Uuid) -> String {
    format!("/weapons/{}", id)
}

// == Contract Tests ==

#[tokio::test]
async fn test_get_by_id_decodes_weapon() {
    let server = MockServer::start().await;
    let weapon = stored(&master_sword().with_element(Element::Shock));
    Mock::given(method("GET"))
        .and(path(weapon_path(weapon.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(&weapon))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert_eq!(client.get_by_id(weapon.id).await.unwrap(), weapon);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let server = MockServer::start().await;
    let missing = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(weapon_path(missing)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client_for(&server).get_by_id(missing).await;

    assert_eq!(result, Err(BackendError::NotFound(missing)));
}

#[tokio::test]
async fn test_create_posts_input_as_json() {
    let server = MockServer::start().await;
    let input = master_sword();
    let weapon = stored(&input);
    Mock::given(method("POST"))
        .and(path("/weapons"))
        .and(body_json(json!({
            "name": "Master Sword",
            "weaponType": "ONE_HANDED_SWORD",
            "damage": 30,
            "durability": 200,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(&weapon))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server).create(&input).await.unwrap();

    assert_eq!(created, weapon);
}

#[tokio::test]
async fn test_create_conflict_is_already_exists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/weapons"))
        .respond_with(ResponseTemplate::new(409).set_body_string("duplicate name"))
        .mount(&server)
        .await;

    let result = client_for(&server).create(&master_sword()).await;

    assert_eq!(
        result,
        Err(BackendError::AlreadyExists("Master Sword".into()))
    );
}

#[tokio::test]
async fn test_rejections_carry_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/weapons"))
        .respond_with(ResponseTemplate::new(400).set_body_string("damage out of range"))
        .mount(&server)
        .await;
    let id = Uuid::new_v4();
    Mock::given(method("PUT"))
        .and(path(weapon_path(id)))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;
    let client = client_for(&server);

    assert_eq!(
        client.create(&master_sword()).await,
        Err(BackendError::Rejected("damage out of range".into()))
    );
    assert!(matches!(
        client.replace(id, &master_sword()).await,
        Err(BackendError::Rejected(_))
    ));
}

#[tokio::test]
async fn test_list_sends_shape_and_filters() {
    let server = MockServer::start().await;
    let claymore = stored(&WeaponInput::new(
        "Knight's Claymore",
        WeaponType::TwoHandedSword,
        38,
        35,
    ));
    let page = Page::new(vec![claymore.clone()], 2, 0, 1);
    Mock::given(method("GET"))
        .and(path("/weapons"))
        .and(query_param("page", "0"))
        .and(query_param("pageSize", "1"))
        .and(query_param("sort", "damage"))
        .and(query_param("direction", "desc"))
        .and(query_param("name", "claymore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page))
        .expect(1)
        .mount(&server)
        .await;

    let query = QueryShape::new(0, 1)
        .sorted_by("damage", SortDirection::Desc)
        .with_filter("name", "claymore");
    let result = client_for(&server).list(&query).await.unwrap();

    assert_eq!(result.total_elements, 2);
    assert_eq!(result.items, vec![claymore]);
}

#[tokio::test]
async fn test_replace_and_update_map_not_found() {
    let server = MockServer::start().await;
    let missing = Uuid::new_v4();
    Mock::given(path(weapon_path(missing)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = client_for(&server);
    let patch = WeaponPatch {
        damage: Some(40),
        ..Default::default()
    };

    assert_eq!(
        client.replace(missing, &master_sword()).await,
        Err(BackendError::NotFound(missing))
    );
    assert_eq!(
        client.update(missing, &patch).await,
        Err(BackendError::NotFound(missing))
    );
}

#[tokio::test]
async fn test_update_sends_only_present_fields() {
    let server = MockServer::start().await;
    let weapon = stored(&master_sword());
    let patched = Weapon {
        damage: 40,
        ..weapon.clone()
    };
    Mock::given(method("PATCH"))
        .and(path(weapon_path(weapon.id)))
        .and(body_json(json!({ "damage": 40 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&patched))
        .expect(1)
        .mount(&server)
        .await;
    let patch = WeaponPatch {
        damage: Some(40),
        ..Default::default()
    };

    let result = client_for(&server).update(weapon.id, &patch).await.unwrap();

    assert_eq!(result, patched);
}

#[tokio::test]
async fn test_update_conflict_without_name_uses_service_detail() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("PATCH"))
        .and(path(weapon_path(id)))
        .respond_with(ResponseTemplate::new(409).set_body_string("Royal Claymore"))
        .mount(&server)
        .await;
    let patch = WeaponPatch {
        durability: Some(10),
        ..Default::default()
    };

    let result = client_for(&server).update(id, &patch).await;

    assert_eq!(
        result,
        Err(BackendError::AlreadyExists("Royal Claymore".into()))
    );
}

#[tokio::test]
async fn test_update_conflict_with_empty_body_names_the_id() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("PATCH"))
        .and(path(weapon_path(id)))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let without_name = WeaponPatch {
        damage: Some(12),
        ..Default::default()
    };
    assert_eq!(
        client.update(id, &without_name).await,
        Err(BackendError::AlreadyExists(id.to_string()))
    );

    let with_name = WeaponPatch {
        name: Some(" Master Sword ".into()),
        ..Default::default()
    };
    assert_eq!(
        client.update(id, &with_name).await,
        Err(BackendError::AlreadyExists("Master Sword".into()))
    );
}

#[tokio::test]
async fn test_delete_reports_whether_weapon_existed() {
    let server = MockServer::start().await;
    let present = Uuid::new_v4();
    let missing = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(weapon_path(present)))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(weapon_path(missing)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = client_for(&server);

    assert!(client.delete(present).await.unwrap());
    assert!(!client.delete(missing).await.unwrap());
}

#[tokio::test]
async fn test_store_over_http_backend() {
    let server = MockServer::start().await;
    let input = master_sword();
    let weapon = stored(&input);
    Mock::given(method("POST"))
        .and(path("/weapons"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&weapon))
        .mount(&server)
        .await;
    // The warm cache answers reads after a create.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(weapon_path(weapon.id)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = WeaponStore::new(
        Arc::new(client_for(&server)),
        Arc::new(MemoryCache::new(100)),
        Duration::from_secs(600),
    );

    let created = store.create(&input).await.unwrap();
    assert_eq!(store.get_by_id(created.id).await.unwrap(), weapon);
    assert_eq!(
        store.delete(created.id).await,
        Err(CodexError::NotFound(created.id))
    );
}

// == Transport Failures ==

#[tokio::test]
async fn test_slow_service_times_out_as_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    let client =
        HttpWeaponBackend::new(server.uri(), Duration::from_secs(1), Duration::from_millis(200))
            .unwrap();

    let result = client.get_by_id(Uuid::new_v4()).await;

    assert!(matches!(result, Err(BackendError::Unavailable(_))));
}

#[tokio::test]
async fn test_overloaded_service_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .mount(&server)
        .await;

    let result = client_for(&server).list(&QueryShape::default()).await;

    assert_eq!(result, Err(BackendError::Unavailable("try later".into())));
}

#[tokio::test]
async fn test_server_error_is_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client_for(&server).get_by_id(Uuid::new_v4()).await;

    assert!(matches!(result, Err(BackendError::Fault(_))));
}

#[tokio::test]
async fn test_garbage_body_is_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client_for(&server).get_by_id(Uuid::new_v4()).await;

    assert!(matches!(result, Err(BackendError::Fault(_))));
}
