//! # Cart Store
//!
//! Owns the session's cart, validates mutations against the stock service and
//! writes the full cart to storage after every change.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │   caller ──► add_product(id)                                            │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │            snapshot cart ──► await stock(id) ──► compute new cart      │
//! │                                     │                  │                │
//! │                                     │            ┌─────┴──────┐         │
//! │                                     │            ▼            ▼         │
//! │                                     │       committed      rejected     │
//! │                                     │    (replace cart,  (OutOfStock)   │
//! │                                     │     persist)            │         │
//! │                                     ▼                         ▼         │
//! │                              Err(StoreError) ──► Notice ──► Notifier   │
//! │                                                                         │
//! │  Callers never see a Result: every outcome is either silent or a       │
//! │  Notice.                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Interleaving
//! Under [`MutationPolicy::Concurrent`] the cart lock is only held to take a
//! snapshot and to commit, never across the stock query. Two
//! `add_product(1)` calls in flight together can both start from `amount=2`
//! and both commit `amount=3`; whichever commits last wins, including over
//! changes to other lines made in between. [`MutationPolicy::Serialized`]
//! holds an operation lock for the whole call instead.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shoecart_core::validation::validate_amount;
use shoecart_core::{Cart, CartTotals, Notice, ProductId, UpdateProductAmount, DEFAULT_STORAGE_KEY};
use tracing::{debug, error, info, warn};

use crate::adapters::{FileStorage, HttpStockService};
use crate::config::{CartConfig, MutationPolicy};
use crate::error::{StoreError, StoreResult};
use crate::ports::{Notifier, Persistence, StockService};

/// Store construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub storage_key: String,
    pub mutation_policy: MutationPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            mutation_policy: MutationPolicy::default(),
        }
    }
}

impl From<&CartConfig> for StoreOptions {
    fn from(config: &CartConfig) -> Self {
        StoreOptions {
            storage_key: config.storage_key().to_string(),
            mutation_policy: config.mutation_policy(),
        }
    }
}

/// What an operation did, before it is turned into (or not into) a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Committed,
    OutOfStock,
    Unchanged,
}

/// The session cart.
///
/// Construct one per session with [`CartStore::load`] and share it as
/// `Arc<CartStore>`; it is never a global.
pub struct CartStore {
    cart: Mutex<Cart>,
    op_lock: tokio::sync::Mutex<()>,
    options: StoreOptions,
    stock: Arc<dyn StockService>,
    persistence: Arc<dyn Persistence>,
    notifier: Arc<dyn Notifier>,
}

impl CartStore {
    /// Starts a session: reads the stored snapshot and builds the store.
    ///
    /// ## Fallback
    /// A missing snapshot gives an empty cart. So does one that cannot be
    /// read, does not parse, or breaks the cart invariants (duplicate ids,
    /// amount < 1); that case is logged at `warn`. The bad value stays in
    /// storage until the first commit overwrites it.
    pub fn load(
        stock: Arc<dyn StockService>,
        persistence: Arc<dyn Persistence>,
        notifier: Arc<dyn Notifier>,
        options: StoreOptions,
    ) -> Self {
        let cart = match Self::read_snapshot(persistence.as_ref(), &options.storage_key) {
            Ok(Some(cart)) => {
                info!(items = cart.len(), key = %options.storage_key, "Cart restored from storage");
                cart
            }
            Ok(None) => {
                debug!(key = %options.storage_key, "No stored cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(error = %e, key = %options.storage_key, "Stored cart unusable, starting empty");
                Cart::new()
            }
        };

        CartStore {
            cart: Mutex::new(cart),
            op_lock: tokio::sync::Mutex::new(()),
            options,
            stock,
            persistence,
            notifier,
        }
    }

    /// Wires the default adapters from config: HTTP stock service and a
    /// storage file at `[storage] path`.
    pub fn from_config(config: &CartConfig, notifier: Arc<dyn Notifier>) -> StoreResult<Self> {
        let stock = HttpStockService::from_settings(&config.api)?;
        let path = config.storage.resolved_path().ok_or_else(|| {
            StoreError::InvalidConfig("no storage path and no platform data directory".into())
        })?;
        let storage = FileStorage::new(path);

        Ok(Self::load(
            Arc::new(stock),
            Arc::new(storage),
            notifier,
            StoreOptions::from(config),
        ))
    }

    fn read_snapshot(persistence: &dyn Persistence, key: &str) -> StoreResult<Option<Cart>> {
        let Some(raw) = persistence.get(key)? else {
            return Ok(None);
        };

        let cart: Cart = serde_json::from_str(&raw)?;
        cart.validate()?;
        Ok(Some(cart))
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    /// A copy of the current cart.
    pub fn cart(&self) -> Cart {
        self.cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Totals for the current cart.
    pub fn totals(&self) -> CartTotals {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        CartTotals::from(&*cart)
    }

    pub fn storage_key(&self) -> &str {
        &self.options.storage_key
    }

    pub fn mutation_policy(&self) -> MutationPolicy {
        self.options.mutation_policy
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Already in cart: +1 if the current amount is below the stock,
    ///   otherwise `Notice::OutOfStock`
    /// - Not in cart: needs stock >= 1, then fetches the catalog record and
    ///   appends it with amount 1
    /// - Any failure: `Notice::AddFailed`, cart untouched
    pub async fn add_product(&self, id: ProductId) {
        debug!(product_id = %id, "add_product");
        let _serial = self.serial_guard().await;

        let result = self.try_add_product(id).await;
        self.report(result, Notice::AddFailed, id);
    }

    /// Removes a product's line entirely. Absent products are ignored.
    ///
    /// Failure (`Notice::RemoveFailed`) only happens if the cart lock was
    /// poisoned; there is no remote call on this path.
    pub async fn remove_product(&self, id: ProductId) {
        debug!(product_id = %id, "remove_product");
        let _serial = self.serial_guard().await;

        let result = self.try_remove_product(id);
        self.report(result, Notice::RemoveFailed, id);
    }

    /// Sets a line to an absolute amount.
    ///
    /// ## Behavior
    /// - amount <= 0: ignored
    /// - product not in cart: ignored
    /// - amount above stock: `Notice::OutOfStock`
    /// - any failure: `Notice::UpdateFailed`, cart untouched
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        let UpdateProductAmount { product_id, amount } = request;
        debug!(product_id = %product_id, amount, "update_product_amount");
        let _serial = self.serial_guard().await;

        let result = self.try_update_product_amount(product_id, amount).await;
        self.report(result, Notice::UpdateFailed, product_id);
    }

    async fn try_add_product(&self, id: ProductId) -> StoreResult<Outcome> {
        let mut updated = self.snapshot()?;
        let current = updated.get(id).map(|item| item.amount);

        let stock = self.stock.stock(id).await?;

        match current {
            Some(amount) => {
                if amount >= stock.amount {
                    return Ok(Outcome::OutOfStock);
                }
                updated.increment(id)?;
            }
            None => {
                if !stock.covers(1) {
                    return Ok(Outcome::OutOfStock);
                }
                let product = self.stock.product(id).await?;
                if product.id != id {
                    return Err(StoreError::Deserialization(format!(
                        "catalog returned product {} for id {}",
                        product.id, id
                    )));
                }
                updated.push_product(product)?;
            }
        }

        self.commit(updated)?;
        Ok(Outcome::Committed)
    }

    fn try_remove_product(&self, id: ProductId) -> StoreResult<Outcome> {
        let mut cart = self.lock_cart()?;

        if cart.remove(id).is_none() {
            return Ok(Outcome::Unchanged);
        }

        self.persist(&cart);
        Ok(Outcome::Committed)
    }

    async fn try_update_product_amount(&self, id: ProductId, amount: i64) -> StoreResult<Outcome> {
        if validate_amount(amount).is_err() {
            return Ok(Outcome::Unchanged);
        }

        let mut updated = self.snapshot()?;
        if !updated.contains(id) {
            return Ok(Outcome::Unchanged);
        }

        let stock = self.stock.stock(id).await?;
        if !stock.covers(amount) {
            return Ok(Outcome::OutOfStock);
        }

        updated.set_amount(id, amount)?;
        self.commit(updated)?;
        Ok(Outcome::Committed)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn serial_guard(&self) -> Option<tokio::sync::MutexGuard<'_, ()>> {
        match self.options.mutation_policy {
            MutationPolicy::Serialized => Some(self.op_lock.lock().await),
            MutationPolicy::Concurrent => None,
        }
    }

    fn lock_cart(&self) -> StoreResult<MutexGuard<'_, Cart>> {
        self.cart.lock().map_err(|_| StoreError::StatePoisoned)
    }

    fn snapshot(&self) -> StoreResult<Cart> {
        Ok(self.lock_cart()?.clone())
    }

    /// Replaces the cart and runs the post-commit hook.
    fn commit(&self, updated: Cart) -> StoreResult<()> {
        let mut cart = self.lock_cart()?;
        *cart = updated;
        self.persist(&cart);
        Ok(())
    }

    /// Post-commit hook: writes the full cart under the storage key.
    ///
    /// Runs with the cart lock held so storage sees commits in the same order
    /// memory does. A failed write is logged; the in-memory commit stands.
    fn persist(&self, cart: &Cart) {
        let key = &self.options.storage_key;

        let json = match serde_json::to_string(cart) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        match self.persistence.set(key, &json) {
            Ok(()) => info!(items = cart.len(), key = %key, "Cart committed"),
            Err(e) => error!(error = %e, key = %key, "Failed to persist cart"),
        }
    }

    fn report(&self, result: StoreResult<Outcome>, on_failure: Notice, id: ProductId) {
        match result {
            Ok(Outcome::Committed) | Ok(Outcome::Unchanged) => {}
            Ok(Outcome::OutOfStock) => {
                warn!(product_id = %id, "Rejected: out of stock");
                self.notifier.notify(Notice::OutOfStock);
            }
            Err(e) if e.is_remote() => {
                warn!(product_id = %id, error = %e, "Stock API unavailable, cart unchanged");
                self.notifier.notify(on_failure);
            }
            Err(e) => {
                error!(product_id = %id, error = %e, "Cart operation failed");
                self.notifier.notify(on_failure);
            }
        }
    }
}
