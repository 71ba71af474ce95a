//! # Ports
//!
//! The three collaborators `CartStore` depends on. Concrete implementations
//! live in [`crate::adapters`]; tests supply their own.
//!
//! ```text
//! ┌──────────────┐   stock(id), product(id)   ┌──────────────────────┐
//! │              │ ─────────────────────────► │ StockService (async) │
//! │              │                            └──────────────────────┘
//! │  CartStore   │   get(key) / set(key, v)   ┌──────────────────────┐
//! │              │ ─────────────────────────► │ Persistence (sync)   │
//! │              │                            └──────────────────────┘
//! │              │   notify(Notice)           ┌──────────────────────┐
//! │              │ ─────────────────────────► │ Notifier (fire&forget)│
//! └──────────────┘                            └──────────────────────┘
//! ```

use async_trait::async_trait;
use shoecart_core::{Notice, Product, ProductId, Stock};

use crate::error::StoreResult;

/// Answers availability and catalog questions by product id.
#[async_trait]
pub trait StockService: Send + Sync {
    /// `GET stock/{id}`: units available.
    async fn stock(&self, id: ProductId) -> StoreResult<Stock>;

    /// `GET products/{id}`: the catalog record.
    async fn product(&self, id: ProductId) -> StoreResult<Product>;
}

/// Synchronous string key-value storage that outlives the session.
pub trait Persistence: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrites the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Fire-and-forget sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
