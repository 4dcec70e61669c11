//! Catalog client behavior: error discrimination, product caching, and
//! bearer auth.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rocket_shoes_cart::{Catalog, CatalogClient, CatalogConfig, CatalogError};
use rocket_shoes_core::ProductId;
use rocket_shoes_integration_tests::{catalog_config, product_body};

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = CatalogClient::new(&catalog_config(&server)).unwrap();
    let err = client.get_product(ProductId::new(9)).await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = CatalogClient::new(&catalog_config(&server)).unwrap();
    let err = client.get_stock(ProductId::new(1)).await.unwrap_err();

    match err {
        CatalogError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = CatalogClient::new(&catalog_config(&server)).unwrap();
    let err = client.get_stock(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, CatalogError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_catalog_is_http_error() {
    // Bind a port, then drop the listener so connecting is refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = CatalogConfig {
        base_url: Url::parse(&format!("http://{addr}/")).unwrap(),
        api_token: None,
        timeout: Duration::from_secs(1),
    };

    let client = CatalogClient::new(&config).unwrap();
    let err = client.get_stock(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, CatalogError::Http(_)));
}

#[tokio::test]
async fn test_product_metadata_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_body(1, "Tênis de Corrida", 139.9)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = CatalogClient::new(&catalog_config(&server)).unwrap();
    let first = client.get_product(ProductId::new(1)).await.unwrap();
    let second = client.get_product(ProductId::new(1)).await.unwrap();

    assert_eq!(first, second);
    server.verify().await;
}

#[tokio::test]
async fn test_invalidated_product_is_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_body(1, "Tênis de Corrida", 139.9)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = CatalogClient::new(&catalog_config(&server)).unwrap();
    client.get_product(ProductId::new(1)).await.unwrap();
    client.invalidate_product(ProductId::new(1)).await;
    client.get_product(ProductId::new(1)).await.unwrap();
    client.invalidate_all().await;

    server.verify().await;
}

#[tokio::test]
async fn test_stock_is_never_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(rocket_shoes_integration_tests::stock_body(1, 4)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = CatalogClient::new(&catalog_config(&server)).unwrap();
    client.get_stock(ProductId::new(1)).await.unwrap();
    client.get_stock(ProductId::new(1)).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_api_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock/2"))
        .and(header("authorization", "Bearer catalog-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(rocket_shoes_integration_tests::stock_body(2, 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = CatalogConfig {
        api_token: Some(SecretString::from("catalog-token")),
        ..catalog_config(&server)
    };

    let client = CatalogClient::new(&config).unwrap();
    let stock = client.get_stock(ProductId::new(2)).await.unwrap();

    assert_eq!(stock.amount, 1);
    server.verify().await;
}
