//! # Cart Model
//!
//! The cart value owned by `CartStore`, and the pure operations on it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Store Operation              Cart Method            Change             │
//! │  ───────────────              ───────────            ──────             │
//! │                                                                         │
//! │  add_product (new) ─────────► push_product() ──────► items.push(item)  │
//! │                                                                         │
//! │  add_product (present) ─────► increment() ─────────► items[i].amount+1 │
//! │                                                                         │
//! │  update_product_amount ─────► set_amount() ────────► items[i].amount=n │
//! │                                                                         │
//! │  remove_product ────────────► remove() ────────────► items.remove(i)   │
//! │                                                                         │
//! │  NOTE: Stock checks happen in the store. The cart only guards its own   │
//! │        invariants: unique ids, amount >= 1.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::{validate_amount, validate_items};
use crate::PRICE_ATTRIBUTE;

/// A line in the cart.
///
/// Serialized flat: `{"id": 1, "title": "...", "price": 139.9, "amount": 2}`.
/// The catalog attributes are a frozen copy of the record fetched when the
/// product was first added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,

    /// Catalog attributes at time of adding (frozen).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,

    /// Quantity in cart, always >= 1.
    pub amount: i64,
}

impl CartItem {
    /// Creates a line with amount 1 from a catalog record.
    ///
    /// An `amount` attribute on the record would collide with the quantity
    /// field, so it is dropped.
    pub fn from_product(product: Product) -> Self {
        let Product { id, mut attributes } = product;
        attributes.remove("amount");

        CartItem {
            id,
            attributes,
            amount: 1,
        }
    }

    /// Unit price from the `price` attribute, if present and numeric.
    pub fn unit_price(&self) -> Option<Money> {
        self.attributes
            .get(PRICE_ATTRIBUTE)
            .and_then(Value::as_f64)
            .and_then(Money::from_decimal)
    }

    /// Unit price × amount. Lines without a usable price count as zero.
    pub fn line_total(&self) -> Money {
        self.unit_price()
            .unwrap_or_default()
            .multiply_quantity(self.amount)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id`
/// - Every `amount` is >= 1
/// - Order is insertion order
///
/// Serialized as a bare JSON array of [`CartItem`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from existing lines, checking the invariants.
    pub fn from_items(items: Vec<CartItem>) -> CoreResult<Self> {
        validate_items(&items)?;
        Ok(Cart { items })
    }

    /// Re-checks the invariants. Used on snapshots read back from storage,
    /// since deserialization alone does not enforce them.
    pub fn validate(&self) -> CoreResult<()> {
        validate_items(&self.items)?;
        Ok(())
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a new line with amount 1.
    ///
    /// ## Returns
    /// - `Err(CoreError::DuplicateItem)` if the product already has a line
    pub fn push_product(&mut self, product: Product) -> CoreResult<()> {
        if self.contains(product.id) {
            return Err(CoreError::DuplicateItem(product.id));
        }

        self.items.push(CartItem::from_product(product));
        Ok(())
    }

    /// Adds one unit to an existing line and returns the new amount.
    ///
    /// A line already at `i64::MAX` is left alone and gives `AmountOverflow`.
    pub fn increment(&mut self, id: ProductId) -> CoreResult<i64> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CoreError::ItemNotInCart(id))?;

        item.amount = item
            .amount
            .checked_add(1)
            .ok_or(CoreError::AmountOverflow(id))?;
        Ok(item.amount)
    }

    /// Sets an existing line to an absolute amount.
    ///
    /// ## Behavior
    /// - amount <= 0: rejected (there is no set-to-zero removal path)
    /// - product not found: `ItemNotInCart`
    pub fn set_amount(&mut self, id: ProductId, amount: i64) -> CoreResult<()> {
        validate_amount(amount)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CoreError::ItemNotInCart(id))?;

        item.amount = amount;
        Ok(())
    }

    /// Removes the whole line for `id`, returning it if it existed.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all amounts, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.amount))
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

/// Cart totals summary for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: cart.subtotal().cents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_product(id: i64, price: f64) -> Product {
        Product::new(ProductId::new(id))
            .with_attribute("title", format!("Product {}", id))
            .with_attribute("price", price)
    }

    #[test]
    fn test_push_product_starts_at_one() {
        let mut cart = Cart::new();
        cart.push_product(test_product(1, 99.9)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 1);
    }

    #[test]
    fn test_push_product_rejects_duplicate() {
        let mut cart = Cart::new();
        cart.push_product(test_product(1, 99.9)).unwrap();

        let err = cart.push_product(test_product(1, 99.9)).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateItem(id) if id == ProductId::new(1)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_catalog_amount_attribute_is_dropped() {
        let product = test_product(5, 10.0).with_attribute("amount", 40);
        let item = CartItem::from_product(product);

        assert_eq!(item.amount, 1);
        assert!(!item.attributes.contains_key("amount"));
    }

    #[test]
    fn test_increment_and_set_amount() {
        let mut cart = Cart::new();
        cart.push_product(test_product(1, 10.0)).unwrap();

        assert_eq!(cart.increment(ProductId::new(1)).unwrap(), 2);
        cart.set_amount(ProductId::new(1), 7).unwrap();
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 7);

        assert!(cart.set_amount(ProductId::new(1), 0).is_err());
        assert!(cart.set_amount(ProductId::new(1), -3).is_err());
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 7);

        assert!(matches!(
            cart.increment(ProductId::new(2)),
            Err(CoreError::ItemNotInCart(_))
        ));
    }

    #[test]
    fn test_increment_at_largest_amount_overflows_cleanly() {
        let mut cart = Cart::new();
        cart.push_product(test_product(1, 10.0)).unwrap();
        cart.set_amount(ProductId::new(1), i64::MAX).unwrap();

        assert!(matches!(
            cart.increment(ProductId::new(1)),
            Err(CoreError::AmountOverflow(id)) if id == ProductId::new(1)
        ));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, i64::MAX);
        assert!(cart.validate().is_ok());
    }

    #[test]
    fn test_total_quantity_saturates() {
        let mut cart = Cart::new();
        cart.push_product(test_product(1, 0.0)).unwrap();
        cart.push_product(test_product(2, 0.0)).unwrap();
        cart.set_amount(ProductId::new(1), i64::MAX).unwrap();

        assert_eq!(cart.total_quantity(), i64::MAX);
        assert_eq!(CartTotals::from(&cart).total_quantity, i64::MAX);
    }

    #[test]
    fn test_remove_only_touches_target() {
        let mut cart = Cart::new();
        cart.push_product(test_product(1, 10.0)).unwrap();
        cart.push_product(test_product(2, 20.0)).unwrap();
        cart.push_product(test_product(3, 30.0)).unwrap();

        let removed = cart.remove(ProductId::new(2)).unwrap();
        assert_eq!(removed.id, ProductId::new(2));

        let ids: Vec<i64> = cart.items().iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(cart.remove(ProductId::new(2)).is_none());
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_serializes_as_flat_array() {
        let mut cart = Cart::new();
        cart.push_product(Product::new(ProductId::new(1)).with_attribute("name", "X"))
            .unwrap();

        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(value, json!([{"id": 1, "name": "X", "amount": 1}]));

        let back: Cart = serde_json::from_value(value).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_from_items_checks_invariants() {
        let item = CartItem::from_product(test_product(1, 1.0));
        let dup = vec![item.clone(), item.clone()];
        assert!(Cart::from_items(dup).is_err());

        let mut zero = item.clone();
        zero.amount = 0;
        assert!(Cart::from_items(vec![zero]).is_err());

        assert!(Cart::from_items(vec![item]).is_ok());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.push_product(test_product(1, 139.9)).unwrap();
        cart.push_product(test_product(2, 0.1)).unwrap();
        cart.push_product(Product::new(ProductId::new(3))).unwrap(); // no price
        cart.set_amount(ProductId::new(1), 2).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.total_quantity, 4);
        assert_eq!(totals.subtotal_cents, 27990);
    }

    #[test]
    fn test_non_numeric_price_counts_as_zero() {
        let item = CartItem::from_product(
            Product::new(ProductId::new(1)).with_attribute("price", "R$ 10,00"),
        );
        assert!(item.unit_price().is_none());
        assert!(item.line_total().is_zero());
    }
}
