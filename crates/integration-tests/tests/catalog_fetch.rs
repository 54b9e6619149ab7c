//! Catalog client against a local HTTP server.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use rust_decimal::Decimal;
use technova_core::ProductId;
use technova_integration_tests::{endpoint, sample_catalog_json, serve};
use technova_storefront::catalog::{
    CatalogClient, CatalogStatus, FETCH_FAILED_MESSAGE, FetchError,
};
use technova_storefront::storage::{KeyValueStore, MemoryStore};
use technova_storefront::{Storefront, StorefrontConfig};

fn catalog_router() -> Router {
    Router::new()
        .route("/products", get(|| async { Json(sample_catalog_json()) }))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
        )
        .route("/garbage", get(|| async { "<html>not json</html>" }))
}

fn storefront() -> Storefront {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    Storefront::new(store, &StorefrontConfig::defaults().unwrap())
}

#[tokio::test]
async fn test_fetch_decodes_products() {
    let addr = serve(catalog_router()).await.unwrap();
    let client = CatalogClient::new(endpoint(addr, "/products").unwrap());

    let products = client.fetch().await.unwrap();

    assert_eq!(products.len(), 4);
    let shirt = products.iter().find(|p| p.id == ProductId::new(2)).unwrap();
    assert_eq!(shirt.price, Decimal::new(223, 1));
    assert_eq!(shirt.rating.count, 259);
    assert_eq!(shirt.rating.stars(), "\u{2605}\u{2605}\u{2605}\u{2605}\u{2606}");
}

#[tokio::test]
async fn test_fetch_non_success_status() {
    let addr = serve(catalog_router()).await.unwrap();
    let client = CatalogClient::new(endpoint(addr, "/broken").unwrap());

    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500 }));
}

#[tokio::test]
async fn test_fetch_malformed_body() {
    let addr = serve(catalog_router()).await.unwrap();
    let client = CatalogClient::new(endpoint(addr, "/garbage").unwrap());

    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CatalogClient::new(endpoint(addr, "/products").unwrap());
    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}

#[tokio::test]
async fn test_load_catalog_ready() {
    let addr = serve(catalog_router()).await.unwrap();
    let client = CatalogClient::new(endpoint(addr, "/products").unwrap());
    let mut app = storefront();

    let status = app.load_catalog(&client).await.clone();

    assert_eq!(status, CatalogStatus::Ready { count: 4 });
    assert_eq!(app.visible_products().len(), 4);
    assert_eq!(
        app.catalog().categories(),
        vec!["men's clothing", "jewelery", "electronics"]
    );
}

#[tokio::test]
async fn test_load_catalog_failure_sets_message() {
    let addr = serve(catalog_router()).await.unwrap();
    let client = CatalogClient::new(endpoint(addr, "/broken").unwrap());
    let mut app = storefront();

    let status = app.load_catalog(&client).await.clone();

    assert_eq!(
        status,
        CatalogStatus::Failed {
            message: FETCH_FAILED_MESSAGE.to_string()
        }
    );
    assert!(app.visible_products().is_empty());
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_products() {
    let addr = serve(catalog_router()).await.unwrap();
    let mut app = storefront();

    let good = CatalogClient::new(endpoint(addr, "/products").unwrap());
    app.load_catalog(&good).await;
    let bad = CatalogClient::new(endpoint(addr, "/broken").unwrap());
    app.load_catalog(&bad).await;

    assert!(matches!(app.catalog_status(), CatalogStatus::Failed { .. }));
    assert_eq!(app.catalog().len(), 4);
}
