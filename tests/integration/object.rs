//! Business-object flows against the mock platform.

use std::sync::Arc;

use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use bizobj_api::{GetOptions, Item, LoginOptions, SearchOptions};

use crate::common::{mock_platform, session_for};

fn envelope(response: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({"type": "object", "response": response}))
}

#[tokio::test]
async fn test_search_then_get_then_save_round_trip() {
    let server = mock_platform().await;

    Mock::given(method("POST"))
        .and(path("/api/json/obj"))
        .and(query_param("object", "Product"))
        .and(query_param("inst", "api_Product"))
        .and(query_param("action", "search"))
        .and(body_string("prd_name=Widget"))
        .respond_with(envelope(serde_json::json!({
            "list": [{"row_id": "4", "prd_name": "Widget", "prd_price": "10.0"}],
            "count": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/json/obj"))
        .and(query_param("action", "get"))
        .and(query_param("row_id", "4"))
        .respond_with(envelope(serde_json::json!({
            "row_id": "4",
            "prd_name": "Widget",
            "prd_price": "10.0"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/json/obj"))
        .and(query_param("action", "update"))
        .and(body_string("prd_name=Widget&prd_price=12.5&row_id=4"))
        .respond_with(envelope(serde_json::json!({
            "row_id": "4",
            "prd_name": "Widget",
            "prd_price": "12.5"
        })))
        .mount(&server)
        .await;

    let session = session_for(&server);
    session.login(LoginOptions::default()).await.unwrap();

    let products = session.get_business_object("Product", None);

    let mut filters = Item::new();
    filters.insert("prd_name".to_string(), "Widget".into());
    let list = products.search(Some(filters), SearchOptions::default()).await.unwrap();
    assert_eq!(list.len(), 1);
    // Row IDs stay strings end to end.
    assert_eq!(list[0]["row_id"], "4");

    let item = products.get("4", GetOptions::default()).await.unwrap();
    assert_eq!(item["prd_price"], "10.0");

    let mut edited = products.item().unwrap();
    edited.insert("prd_price".to_string(), "12.5".into());
    let saved = products.save(edited).await.unwrap();
    assert_eq!(saved["prd_price"], "12.5");
    assert_eq!(products.item().unwrap()["prd_price"], "12.5");
}

#[tokio::test]
async fn test_save_without_row_id_creates() {
    let server = mock_platform().await;

    Mock::given(method("POST"))
        .and(path("/api/json/obj"))
        .and(query_param("action", "create"))
        .and(body_string("prd_name=Gadget&row_id=0"))
        .respond_with(envelope(serde_json::json!({
            "row_id": "21",
            "prd_name": "Gadget"
        })))
        .mount(&server)
        .await;

    let session = session_for(&server);
    session.login(LoginOptions::default()).await.unwrap();

    let products = session.get_business_object("Product", None);
    let mut draft = Item::new();
    draft.insert("prd_name".to_string(), "Gadget".into());

    let created = products.save(draft).await.unwrap();
    assert_eq!(created["row_id"], "21");
}

#[tokio::test]
async fn test_handles_share_state_until_logout() {
    let server = mock_platform().await;

    Mock::given(method("POST"))
        .and(path("/api/json/obj"))
        .and(query_param("action", "search"))
        .respond_with(envelope(serde_json::json!({
            "list": [{"row_id": "1"}]
        })))
        .mount(&server)
        .await;

    let session = session_for(&server);
    session.login(LoginOptions::default()).await.unwrap();

    let first = session.get_business_object("Product", None);
    let second = session.get_business_object("Product", None);
    assert!(Arc::ptr_eq(&first, &second));

    first.search(None, SearchOptions::default()).await.unwrap();
    // The cached handle is the same object, so its state is visible through
    // either reference.
    assert_eq!(second.list().len(), 1);

    session.logout().await.unwrap();
    let fresh = session.get_business_object("Product", None);
    assert!(!Arc::ptr_eq(&first, &fresh));
    assert!(fresh.list().is_empty());
}
