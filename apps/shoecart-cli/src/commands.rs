//! # Cart Commands
//!
//! Runs one command against a [`CartStore`] and shapes the result for output.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command          Store call                       Output               │
//! │  ───────          ──────────                       ──────               │
//! │  show             (none)                           CartResponse         │
//! │  add ID           add_product(ID)                  CartResponse         │
//! │  remove ID        remove_product(ID)               CartResponse         │
//! │  update ID N      update_product_amount({ID, N})   CartResponse         │
//! │                                                                         │
//! │  Notices raised on the way are drained from the channel afterwards.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use shoecart_core::{Cart, CartItem, CartTotals, Notice, ProductId, UpdateProductAmount};
use shoecart_store::CartStore;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

/// Cart contents plus totals, as printed by every command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// A single cart action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartCommand {
    Show,
    Add(ProductId),
    Remove(ProductId),
    Update(UpdateProductAmount),
}

/// Runs `command` and returns the cart as it stands afterwards.
pub async fn execute(store: &CartStore, command: CartCommand) -> CartResponse {
    debug!(?command, "Executing cart command");

    match command {
        CartCommand::Show => {}
        CartCommand::Add(id) => store.add_product(id).await,
        CartCommand::Remove(id) => store.remove_product(id).await,
        CartCommand::Update(request) => store.update_product_amount(request).await,
    }

    CartResponse::from(&store.cart())
}

/// Collects every notice already sent, without waiting for more.
pub fn drain_notices(notices: &mut UnboundedReceiver<Notice>) -> Vec<Notice> {
    let mut drained = Vec::new();
    while let Ok(notice) = notices.try_recv() {
        drained.push(notice);
    }
    drained
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shoecart_core::{Product, Stock, DEFAULT_STORAGE_KEY};
    use shoecart_store::{
        ChannelNotifier, MemoryStorage, StockService, StoreError, StoreOptions, StoreResult,
    };
    use std::sync::Arc;

    /// Every product has the same stock and a bare catalog record.
    struct UniformStock(i64);

    #[async_trait]
    impl StockService for UniformStock {
        async fn stock(&self, _id: ProductId) -> StoreResult<Stock> {
            if self.0 < 0 {
                return Err(StoreError::Request("offline".into()));
            }
            Ok(Stock::new(self.0))
        }

        async fn product(&self, id: ProductId) -> StoreResult<Product> {
            Ok(Product::new(id).with_attribute("price", 10.5))
        }
    }

    fn store(stock: i64, stored: &str) -> (CartStore, UnboundedReceiver<Notice>) {
        let (notifier, rx) = ChannelNotifier::channel();
        let store = CartStore::load(
            Arc::new(UniformStock(stock)),
            Arc::new(MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, stored)),
            Arc::new(notifier),
            StoreOptions::default(),
        );
        (store, rx)
    }

    #[tokio::test]
    async fn test_show_returns_stored_cart() {
        let (store, mut rx) = store(1, r#"[{"id":4,"price":20.0,"amount":3}]"#);

        let response = execute(&store, CartCommand::Show).await;

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.total_quantity, 3);
        assert_eq!(response.totals.subtotal_cents, 6000);
        assert!(drain_notices(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_add_then_update() {
        let (store, mut rx) = store(3, "[]");

        execute(&store, CartCommand::Add(ProductId::new(1))).await;
        let response = execute(
            &store,
            CartCommand::Update(UpdateProductAmount::new(1, 3)),
        )
        .await;

        assert_eq!(response.items[0].amount, 3);
        assert_eq!(response.totals.subtotal_cents, 3150);
        assert!(drain_notices(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_notices_are_drained() {
        let (store, mut rx) = store(-1, r#"[{"id":1,"amount":1}]"#);

        execute(&store, CartCommand::Add(ProductId::new(1))).await;
        execute(&store, CartCommand::Remove(ProductId::new(1))).await;

        assert_eq!(drain_notices(&mut rx), vec![Notice::AddFailed]);
        assert!(drain_notices(&mut rx).is_empty());
    }

    #[test]
    fn test_response_wire_shape() {
        let cart: Cart = serde_json::from_str(r#"[{"id":2,"amount":1}]"#).unwrap();
        let value = serde_json::to_value(CartResponse::from(&cart)).unwrap();

        assert_eq!(value["items"][0]["id"], 2);
        assert_eq!(value["totals"]["itemCount"], 1);
    }
}
