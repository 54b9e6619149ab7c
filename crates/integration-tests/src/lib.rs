//! Integration test fixtures for the TechNova storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p technova-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_fetch` - Catalog client against a local HTTP server
//! - `storefront_flow` - Intent flows over the memory and file stores
//!
//! No external services are needed; the catalog server binds an ephemeral
//! port on the loopback interface.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::Router;
use serde_json::{Value, json};
use technova_storefront::catalog::Product;
use url::Url;

/// Four products in the catalog API's wire format.
#[must_use]
pub fn sample_catalog_json() -> Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Fits 15 inch laptops",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/1.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 2,
            "title": "Slim Fit T-Shirt",
            "price": 22.3,
            "description": "Slim-fitting style",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/2.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        },
        {
            "id": 5,
            "title": "Dragon Bracelet",
            "price": 695,
            "description": "Silver dragon station chain bracelet",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/5.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        },
        {
            "id": 9,
            "title": "Portable External Hard Drive",
            "price": 64,
            "description": "USB 3.0 and USB 2.0 compatible",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/9.jpg",
            "rating": { "rate": 3.3, "count": 203 }
        }
    ])
}

/// The sample catalog, decoded.
///
/// # Errors
///
/// Returns an error if the sample no longer matches the product model.
pub fn sample_products() -> serde_json::Result<Vec<Product>> {
    serde_json::from_value(sample_catalog_json())
}

/// Serve `router` on an ephemeral loopback port for the rest of the test.
///
/// # Errors
///
/// Returns an error if the listener could not be bound.
pub async fn serve(router: Router) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(addr)
}

/// URL of `path` on a server started by [`serve`].
///
/// # Errors
///
/// Returns an error if `path` does not form a valid URL.
pub fn endpoint(addr: SocketAddr, path: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("http://{addr}{path}"))
}

/// A fresh, empty directory under the system temp dir.
#[must_use]
pub fn scratch_dir(name: &str) -> PathBuf {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "technova-it-{name}-{}-{n}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
