//! # Domain Types
//!
//! Identifiers, catalog records and user-facing notices shared across shoecart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductId     │   │    Product      │   │     Stock       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  i64            │   │  id             │   │  amount         │       │
//! │  │                 │   │  attributes {…} │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────────────┐   ┌─────────────────────────────────┐     │
//! │  │  UpdateProductAmount    │   │            Notice               │     │
//! │  │  ─────────────────────  │   │  ─────────────────────────────  │     │
//! │  │  product_id             │   │  OutOfStock   AddFailed         │     │
//! │  │  amount (absolute)      │   │  RemoveFailed UpdateFailed      │     │
//! │  └─────────────────────────┘   └─────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// Product Identifier
// =============================================================================

/// Catalog identifier of a product. Serialized as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Catalog Records
// =============================================================================

/// A catalog record as returned by `GET products/{id}`.
///
/// Only `id` is interpreted. Everything else (name, price, image, …) is kept
/// verbatim so the cart can hand it back to the UI untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// Creates a product with no attributes besides its id.
    pub fn new(id: ProductId) -> Self {
        Product {
            id,
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Availability record as returned by `GET stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Units available for this product.
    pub amount: i64,
}

impl Stock {
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Stock { amount }
    }

    /// Checks whether `requested` units fit in the available stock.
    #[inline]
    pub const fn covers(&self, requested: i64) -> bool {
        requested <= self.amount
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Request to set a cart line to an absolute quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,

    /// Absolute amount, not a delta.
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: impl Into<ProductId>, amount: i64) -> Self {
        UpdateProductAmount {
            product_id: product_id.into(),
            amount,
        }
    }
}

// =============================================================================
// Notices
// =============================================================================

/// A user-facing condition reported through the notifier.
///
/// The wording of each message is fixed; callers match on the variant, not
/// on the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Requested quantity exceeds what the stock service reports.
    OutOfStock,
    /// Adding a product failed for any reason other than stock.
    AddFailed,
    /// Removing a product failed unexpectedly.
    RemoveFailed,
    /// Changing a product quantity failed for any reason other than stock.
    UpdateFailed,
}

impl Notice {
    /// The message shown to the shopper.
    pub const fn message(&self) -> &'static str {
        match self {
            Notice::OutOfStock => "Requested quantity is out of stock",
            Notice::AddFailed => "Could not add the product to the cart",
            Notice::RemoveFailed => "Could not remove the product from the cart",
            Notice::UpdateFailed => "Could not change the product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
