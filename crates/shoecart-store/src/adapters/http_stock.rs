//! HTTP implementation of [`StockService`] against the storefront API.
//!
//! ```text
//! GET {base_url}/stock/{id}     → { "id": 1, "amount": 3 }
//! GET {base_url}/products/{id}  → { "id": 1, "title": "...", "price": 179.9, "image": "..." }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shoecart_core::{Product, ProductId, Stock};
use tracing::debug;
use url::Url;

use crate::config::ApiSettings;
use crate::error::{StoreError, StoreResult};
use crate::ports::StockService;

/// Stock and catalog lookups over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStockService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpStockService {
    /// Creates a client for `base_url` with no request timeout.
    pub fn new(base_url: &str) -> StoreResult<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client from the `[api]` config section.
    pub fn from_settings(settings: &ApiSettings) -> StoreResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;

        Self::with_client(client, &settings.base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> StoreResult<Self> {
        // Without a trailing slash Url::join would replace the last segment.
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(HttpStockService { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, resource: &str, id: ProductId) -> StoreResult<Url> {
        Ok(self.base_url.join(&format!("{}/{}", resource, id))?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> StoreResult<T> {
        debug!(url = %url, "GET");

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl StockService for HttpStockService {
    async fn stock(&self, id: ProductId) -> StoreResult<Stock> {
        let url = self.endpoint("stock", id)?;
        self.get_json(url).await
    }

    async fn product(&self, id: ProductId) -> StoreResult<Product> {
        let url = self.endpoint("products", id)?;
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn stock_handler(Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
        match id {
            1 => Ok(Json(json!({ "id": 1, "amount": 3 }))),
            2 => Ok(Json(json!({ "id": 2, "quantity": 3 }))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn product_handler(Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
        match id {
            1 => Ok(Json(json!({
                "id": 1,
                "title": "Tênis de Caminhada Leve Confortável",
                "price": 179.9,
                "image": "https://example.com/shoe1.jpg"
            }))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn spawn_api() -> String {
        let app = Router::new()
            .route("/api/stock/{id}", get(stock_handler))
            .route("/api/products/{id}", get(product_handler));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/api", addr)
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let service = HttpStockService::new("http://localhost:3333/api").unwrap();
        assert_eq!(
            service.endpoint("stock", ProductId::new(4)).unwrap().as_str(),
            "http://localhost:3333/api/stock/4"
        );

        let service = HttpStockService::new("http://localhost:3333").unwrap();
        assert_eq!(
            service.endpoint("products", ProductId::new(2)).unwrap().as_str(),
            "http://localhost:3333/products/2"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            HttpStockService::new("localhost"),
            Err(StoreError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_fetches_stock_and_product() {
        let base = spawn_api().await;
        let service = HttpStockService::new(&base).unwrap();

        let stock = service.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock, Stock::new(3));

        let product = service.product(ProductId::new(1)).await.unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.attributes["price"], json!(179.9));
    }

    #[tokio::test]
    async fn test_not_found_is_status_error() {
        let base = spawn_api().await;
        let service = HttpStockService::new(&base).unwrap();

        let err = service.stock(ProductId::new(99)).await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 404, .. }));

        let err = service.product(ProductId::new(99)).await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_malformed_stock_is_deserialization_error() {
        let base = spawn_api().await;
        let service = HttpStockService::new(&base).unwrap();

        let err = service.stock(ProductId::new(2)).await.unwrap_err();
        assert!(matches!(err, StoreError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_error() {
        // Bind then drop to get a port nobody is listening on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service = HttpStockService::new(&format!("http://{}", addr)).unwrap();
        let err = service.stock(ProductId::new(1)).await.unwrap_err();
        assert!(err.is_remote());
    }
}
