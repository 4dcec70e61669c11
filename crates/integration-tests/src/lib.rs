//! Integration tests for the RocketShoes cart engine.
//!
//! The tests drive a real `CartStore` against a `wiremock` catalog
//! server and `tempfile`-backed storage, so the full path from mutation
//! through HTTP lookup to the persisted document is exercised.
//!
//! # Test Files
//!
//! - `cart_operations` - end-to-end add/remove/update flows
//! - `catalog_client` - HTTP client behavior (errors, caching, auth)

use std::time::Duration;

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rocket_shoes_cart::CatalogConfig;

/// Catalog configuration pointed at a mock server.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid URL.
#[must_use]
pub fn catalog_config(server: &MockServer) -> CatalogConfig {
    CatalogConfig {
        base_url: Url::parse(&server.uri()).expect("mock server URI is a valid URL"),
        api_token: None,
        timeout: Duration::from_secs(5),
    }
}

/// Catalog product document as served by `GET products/{id}`.
#[must_use]
pub fn product_body(id: i32, title: &str, price: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "image": format!("https://cdn.rocketshoes.dev/images/shoes-{id}.jpg"),
    })
}

/// Catalog stock document as served by `GET stock/{id}`.
#[must_use]
pub fn stock_body(id: i32, amount: u32) -> Value {
    json!({ "id": id, "amount": amount })
}

/// Serve a product document for `id`.
pub async fn mount_product(server: &MockServer, id: i32, title: &str, price: f64) {
    Mock::given(method("GET"))
        .and(path(format!("/products/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_body(id, title, price)))
        .mount(server)
        .await;
}

/// Serve a stock document for `id`.
pub async fn mount_stock(server: &MockServer, id: i32, amount: u32) {
    Mock::given(method("GET"))
        .and(path(format!("/stock/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_body(id, amount)))
        .mount(server)
        .await;
}
