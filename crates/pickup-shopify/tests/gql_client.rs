//! Integration tests for `ShopifyGqlClient` using wiremock HTTP mocks.
//!
//! The client accepts an `http://` origin in place of a shop domain, so each
//! test points it at a local `MockServer` and matches on the POSTed GraphQL
//! body.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pickup_shopify::{ShopifyError, ShopifyGqlClient};

const GRAPHQL_PATH: &str = "/admin/api/2024-10/graphql.json";

fn test_client(server: &MockServer) -> ShopifyGqlClient {
    ShopifyGqlClient::new(&server.uri(), "test-token", "2024-10", 5, "pickup-test/0.1")
        .expect("failed to build test ShopifyGqlClient")
}

fn location_node(id: u64, name: &str, is_active: bool) -> serde_json::Value {
    json!({
        "id": format!("gid://shopify/Location/{id}"),
        "name": name,
        "isActive": is_active,
        "fulfillsOnlineOrders": true,
        "address": {
            "address1": "12 High St",
            "address2": null,
            "city": "Springfield",
            "province": null,
            "country": "IN",
            "zip": "110001"
        }
    })
}

fn locations_page(nodes: &[serde_json::Value], has_next_page: bool) -> serde_json::Value {
    let edges: Vec<serde_json::Value> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| json!({ "cursor": format!("cursor-{i}"), "node": node }))
        .collect();
    json!({
        "data": {
            "locations": {
                "pageInfo": { "hasNextPage": has_next_page },
                "edges": edges
            }
        }
    })
}

#[tokio::test]
async fn list_active_locations_returns_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Access-Token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&locations_page(
            &[location_node(1, "Downtown", true)],
            false,
        )))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let locations = client
        .list_active_locations()
        .await
        .expect("should list locations");

    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].id, "gid://shopify/Location/1");
    assert_eq!(locations[0].name, "Downtown");
    assert_eq!(locations[0].address.zip.as_deref(), Some("110001"));
}

#[tokio::test]
async fn list_active_locations_follows_cursor_pagination() {
    let server = MockServer::start().await;

    // First page: no cursor in the variables, reports another page.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "after": null } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&locations_page(
            &[location_node(1, "Downtown", true)],
            true,
        )))
        .mount(&server)
        .await;

    // Second page: requested with the last cursor of page one.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "after": "cursor-0" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&locations_page(
            &[location_node(2, "Harbourside", true)],
            false,
        )))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let locations = client
        .list_active_locations()
        .await
        .expect("should follow pagination");

    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].name, "Downtown");
    assert_eq!(locations[1].name, "Harbourside");
}

#[tokio::test]
async fn inactive_locations_are_filtered_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&locations_page(
            &[
                location_node(1, "Open Store", true),
                location_node(2, "Closed Store", false),
            ],
            false,
        )))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let locations = client
        .list_active_locations()
        .await
        .expect("should list locations");

    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].name, "Open Store");
}

#[tokio::test]
async fn graphql_errors_fail_the_whole_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "errors": [
                { "message": "Throttled" },
                { "message": "Field 'locations' doesn't exist" }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.list_active_locations().await;

    match result {
        Err(ShopifyError::Gql { messages }) => {
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[0], "Throttled");
        }
        other => panic!("expected Gql error, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_2xx_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.list_active_locations().await;

    assert!(
        matches!(result, Err(ShopifyError::UnexpectedStatus { status: 401, .. })),
        "expected UnexpectedStatus(401), got: {result:?}"
    );
}

#[tokio::test]
async fn resolve_inventory_item_normalizes_raw_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({
            "variables": { "id": "gid://shopify/ProductVariant/7001" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "data": {
                "productVariant": {
                    "id": "gid://shopify/ProductVariant/7001",
                    "inventoryItem": { "id": "gid://shopify/InventoryItem/9001" }
                }
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let item_id = client
        .resolve_inventory_item("7001")
        .await
        .expect("should resolve inventory item");

    assert_eq!(item_id, "gid://shopify/InventoryItem/9001");
}

#[tokio::test]
async fn resolve_inventory_item_fails_when_variant_is_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({ "data": { "productVariant": null } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.resolve_inventory_item("404404").await;

    assert!(
        matches!(result, Err(ShopifyError::InventoryItemNotFound { ref variant }) if variant == "404404"),
        "expected InventoryItemNotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn quantities_by_location_extracts_available_and_defaults_to_zero() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({
            "variables": { "id": "gid://shopify/InventoryItem/9001", "first": 250 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "data": {
                "inventoryItem": {
                    "inventoryLevels": {
                        "edges": [
                            {
                                "node": {
                                    "location": { "id": "gid://shopify/Location/1" },
                                    "quantities": [
                                        { "name": "available", "quantity": 5 },
                                        { "name": "on_hand", "quantity": 7 }
                                    ]
                                }
                            },
                            {
                                "node": {
                                    "location": { "id": "gid://shopify/Location/2" },
                                    "quantities": [
                                        { "name": "committed", "quantity": 2 }
                                    ]
                                }
                            }
                        ]
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let quantities = client
        .quantities_by_location("gid://shopify/InventoryItem/9001")
        .await
        .expect("should fetch quantities");

    assert_eq!(quantities.len(), 2);
    assert_eq!(quantities.get("gid://shopify/Location/1"), Some(&5));
    assert_eq!(quantities.get("gid://shopify/Location/2"), Some(&0));
}

#[tokio::test]
async fn quantities_by_location_handles_missing_item_as_empty_map() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({ "data": { "inventoryItem": null } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let quantities = client
        .quantities_by_location("gid://shopify/InventoryItem/1")
        .await
        .expect("missing item should not be an error");

    assert!(quantities.is_empty());
}
