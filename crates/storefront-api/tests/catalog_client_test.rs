// Integration tests for `CatalogClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_api::{CatalogClient, Error};

const RESOURCE: &str = "catalog";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CatalogClient) {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri()).parse().expect("mock server URL");
    let client = CatalogClient::new(reqwest::Client::new(), base_url, RESOURCE);
    (server, client)
}

fn product_json(id: u32, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "price": 9.99,
        "rating": "4.5",
        "imageUrl": format!("http://images.example/{id}.png"),
        "description": format!("description of {name}"),
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn fetch_products_preserves_server_order() {
    let (server, client) = setup().await;

    let body = json!([
        product_json(3, "Charlie"),
        product_json(1, "Alpha"),
        product_json(2, "Bravo"),
    ]);

    Mock::given(method("GET"))
        .and(path(format!("/{RESOURCE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let products = client.fetch_products().await.expect("fetch should succeed");

    assert_eq!(products.len(), 3);
    let ids: Vec<u32> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert_eq!(products[1].name, "Alpha");
    assert_eq!(products[1].rating, "4.5");
    assert_eq!(products[1].image_url, "http://images.example/1.png");
}

#[tokio::test]
async fn fetch_products_empty_catalog() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/{RESOURCE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let products = client.fetch_products().await.expect("fetch should succeed");
    assert!(products.is_empty());
}

// ── Network errors ──────────────────────────────────────────────────

#[tokio::test]
async fn non_success_status_is_network_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/{RESOURCE}")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.fetch_products().await.expect_err("503 should fail");
    assert!(matches!(err, Error::Status { status: 503 }));
    assert!(err.is_network());
    assert!(err.is_transient());
}

#[tokio::test]
async fn not_found_is_network_error_not_transient() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/{RESOURCE}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.fetch_products().await.expect_err("404 should fail");
    assert!(matches!(err, Error::Status { status: 404 }));
    assert!(err.is_network());
    assert!(!err.is_transient());
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    let (server, client) = setup().await;
    drop(server); // port is now closed

    let err = client
        .fetch_products()
        .await
        .expect_err("dead server should fail");
    assert!(err.is_network());
}

// ── Decode errors ───────────────────────────────────────────────────

#[tokio::test]
async fn non_array_body_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/{RESOURCE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    let err = client.fetch_products().await.expect_err("object body should fail");
    assert!(err.is_decode());
}

#[tokio::test]
async fn missing_field_is_decode_error() {
    let (server, client) = setup().await;

    let mut record = product_json(1, "Alpha");
    record
        .as_object_mut()
        .expect("record is an object")
        .remove("price");

    Mock::given(method("GET"))
        .and(path(format!("/{RESOURCE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record])))
        .mount(&server)
        .await;

    let err = client.fetch_products().await.expect_err("missing field should fail");
    let Error::Decode { message, body } = err else {
        panic!("expected decode error");
    };
    assert!(message.contains("price"), "message: {message}");
    assert!(body.contains("Alpha"));
}

#[tokio::test]
async fn unknown_field_is_decode_error() {
    let (server, client) = setup().await;

    let mut record = product_json(1, "Alpha");
    record
        .as_object_mut()
        .expect("record is an object")
        .insert("stockLevel".into(), json!(12));

    Mock::given(method("GET"))
        .and(path(format!("/{RESOURCE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record])))
        .mount(&server)
        .await;

    let err = client.fetch_products().await.expect_err("unknown field should fail");
    assert!(err.is_decode());
    assert!(!err.is_transient());
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/{RESOURCE}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.fetch_products().await.expect_err("html body should fail");
    assert!(err.is_decode());
}
