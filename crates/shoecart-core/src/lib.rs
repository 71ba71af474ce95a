//! # shoecart-core: Pure Cart Domain
//!
//! This crate holds the cart model and every rule that can be checked without
//! touching the network or the disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        shoecart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Storefront UI / shoecart-cli                       │   │
//! │  │    Product list ──► Cart page ──► Quantity picker              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shoecart-store (CartStore)                      │   │
//! │  │    add_product, remove_product, update_product_amount           │   │
//! │  │    StockService ◄──► Persistence ◄──► Notifier                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shoecart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ ProductId │  │   Money   │  │   Cart    │  │  amounts  │  │   │
//! │  │   │  Product  │  │           │  │ CartItem  │  │  snapshot │  │   │
//! │  │   │  Notice   │  │           │  │CartTotals │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Identifiers, catalog records, requests, notices
//! - [`cart`] - `Cart`, `CartItem`, `CartTotals`
//! - [`money`] - Integer-cents money type
//! - [`error`] - Domain error types
//! - [`validation`] - Amount and snapshot checks
//!
//! ## Example Usage
//!
//! ```rust
//! use shoecart_core::{Cart, Product, ProductId};
//!
//! let product: Product = serde_json::from_str(r#"{"id":1,"name":"X"}"#).unwrap();
//!
//! let mut cart = Cart::new();
//! cart.push_product(product).unwrap();
//!
//! assert_eq!(cart.get(ProductId::new(1)).map(|i| i.amount), Some(1));
//! assert_eq!(serde_json::to_string(&cart).unwrap(), r#"[{"id":1,"name":"X","amount":1}]"#);
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartItem, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Storage key the storefront has always used for the cart snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Catalog attribute holding the unit price (a decimal number).
pub const PRICE_ATTRIBUTE: &str = "price";
