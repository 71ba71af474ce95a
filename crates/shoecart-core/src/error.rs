//! # Error Types
//!
//! Domain-specific error types for shoecart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shoecart-core errors (this file)                                      │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input / snapshot validation failures           │
//! │                                                                         │
//! │  shoecart-store errors (separate crate)                                │
//! │  └── StoreError       - Stock API, storage, config failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Notice → shopper     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart already holds a line for this product.
    #[error("Product {0} is already in the cart")]
    DuplicateItem(ProductId),

    /// The product has no line in the cart.
    #[error("Product {0} is not in the cart")]
    ItemNotInCart(ProductId),

    /// One more unit would not fit in an `i64` amount.
    #[error("Amount of product {0} cannot grow any further")]
    AmountOverflow(ProductId),

    #[error("Invalid cart: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A cart line (or a requested amount) that breaks the cart invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount must be at least 1, got {0}")]
    AmountNotPositive(i64),

    /// Two lines share an id, which only a corrupted snapshot can produce.
    #[error("product {0} appears more than once")]
    DuplicateProduct(ProductId),
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;
