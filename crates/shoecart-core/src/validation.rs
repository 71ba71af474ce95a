//! # Validation Module
//!
//! Checks that keep the cart invariants intact.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Session start                                                          │
//! │  └── validate_items(snapshot) ── bad snapshot → empty cart             │
//! │                                                                         │
//! │  update_product_amount                                                  │
//! │  └── validate_amount(n) ──────── n <= 0 → silent no-op                 │
//! │                                                                         │
//! │  Stock checks live in the store: they need the network.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::cart::CartItem;
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a cart amount.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ```rust
/// use shoecart_core::validation::validate_amount;
///
/// assert!(validate_amount(1).is_ok());
/// assert!(validate_amount(0).is_err());
/// assert!(validate_amount(-2).is_err());
/// ```
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::AmountNotPositive(amount));
    }

    Ok(())
}

/// Validates a sequence of cart lines.
///
/// ## Rules
/// - Every amount is positive
/// - No id appears twice
pub fn validate_items(items: &[CartItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        validate_amount(item.amount)?;

        if !seen.insert(item.id) {
            return Err(ValidationError::DuplicateProduct(item.id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Product, ProductId};

    fn line(id: i64, amount: i64) -> CartItem {
        let mut item = CartItem::from_product(Product::new(ProductId::new(id)));
        item.amount = amount;
        item
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(999).is_ok());
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(-1).is_err());
    }

    #[test]
    fn test_validate_items() {
        assert!(validate_items(&[]).is_ok());
        assert!(validate_items(&[line(1, 1), line(2, 4)]).is_ok());

        let err = validate_items(&[line(1, 1), line(2, 1), line(1, 3)]).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateProduct(ProductId::new(1)));

        assert_eq!(
            validate_items(&[line(1, 2), line(2, 0)]),
            Err(ValidationError::AmountNotPositive(0))
        );
    }
}
