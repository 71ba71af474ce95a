//! # shoecart-store: Cart Store for shoecart
//!
//! Session cart state with stock-checked mutations, snapshot persistence and
//! user notices.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Store Architecture                          │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                     CartStore (one per session)                  │  │
//! │  │                                                                  │  │
//! │  │  add_product · remove_product · update_product_amount           │  │
//! │  │  cart() · totals()                                               │  │
//! │  └──────────┬───────────────────┬───────────────────┬───────────────┘  │
//! │             ▼                   ▼                   ▼                   │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │  StockService    │ │  Persistence     │ │  Notifier            │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │ HttpStockService │ │ FileStorage      │ │ TracingNotifier      │    │
//! │  │ GET stock/{id}   │ │ MemoryStorage    │ │ ChannelNotifier      │    │
//! │  │ GET products/{id}│ │ key → JSON array │ │ OutOfStock, *Failed  │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! │                                                                         │
//! │  CONFIG: TOML file + SHOECART_* environment overrides                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`store`] - `CartStore` and its operations
//! - [`ports`] - `StockService`, `Persistence`, `Notifier` traits
//! - [`adapters`] - HTTP, file, memory, tracing and channel implementations
//! - [`config`] - Configuration loading
//! - [`error`] - Store error types
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use shoecart_store::{CartConfig, CartStore, TracingNotifier};
//! use shoecart_core::ProductId;
//!
//! # async fn run() -> shoecart_store::StoreResult<()> {
//! let config = CartConfig::load(None)?;
//! let store = CartStore::from_config(&config, Arc::new(TracingNotifier))?;
//!
//! store.add_product(ProductId::new(1)).await;
//! println!("{:?}", store.totals());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod ports;
pub mod store;

pub use adapters::{ChannelNotifier, FileStorage, HttpStockService, MemoryStorage, TracingNotifier};
pub use config::{CartConfig, MutationPolicy};
pub use error::{StoreError, StoreResult};
pub use ports::{Notifier, Persistence, StockService};
pub use store::{CartStore, StoreOptions};
