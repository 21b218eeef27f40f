//! # Machine Store
//!
//! In-memory machine state shared by every request.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Shared Machine State                               │
//! │                                                                         │
//! │  MachineStore (Clone, cheap: one Arc)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<RwLock<MachineData>>                                              │
//! │       │                                                                 │
//! │       ├── read(|data| ...)   many readers, cloned snapshots out        │
//! │       │                                                                 │
//! │       └── write(|data| ...)  one writer; a whole order runs inside     │
//! │                              one closure, so a tentative stock         │
//! │                              reservation is never visible to others    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Poisoning
//! If a thread panics inside `write`, the lock is poisoned and every later
//! access returns `StoreError::LockPoisoned` instead of trusting state that
//! may be half-updated.

use std::sync::{Arc, RwLock};

use cafemat_core::{CoinReserve, ItemCatalog, ItemStock};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::MachineRepository;

// =============================================================================
// Machine Data
// =============================================================================

/// The three maps that make up machine state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineData {
    stock: ItemStock,
    prices: ItemCatalog,
    coins: CoinReserve,
}

impl MachineData {
    /// Builds machine state from already validated maps.
    pub fn new(prices: ItemCatalog, stock: ItemStock, coins: CoinReserve) -> Self {
        MachineData {
            stock,
            prices,
            coins,
        }
    }
}

impl MachineRepository for MachineData {
    fn item_stock(&self) -> &ItemStock {
        &self.stock
    }

    fn item_prices(&self) -> &ItemCatalog {
        &self.prices
    }

    fn coin_reserve(&self) -> &CoinReserve {
        &self.coins
    }

    fn set_item_stock(&mut self, item: &str, quantity: i64) -> StoreResult<()> {
        match self.stock.get_mut(item) {
            Some(current) => {
                debug!(item, from = *current, to = quantity, "Item stock updated");
                *current = quantity;
                Ok(())
            }
            None => Err(StoreError::not_found("Item", item)),
        }
    }

    fn replace_coin_reserve(&mut self, reserve: &CoinReserve) {
        for (denomination, count) in self.coins.iter_mut() {
            if let Some(&updated) = reserve.get(denomination) {
                *count = updated;
            }
        }
        debug!(coins = ?self.coins, "Coin reserve updated");
    }
}

// =============================================================================
// Machine Store
// =============================================================================

/// Process-wide machine state.
///
/// ## Thread Safety
/// `Arc<RwLock<_>>`: inventory and coin queries are reads and may run in
/// parallel; an order is one write.
#[derive(Debug, Clone)]
pub struct MachineStore {
    inner: Arc<RwLock<MachineData>>,
}

impl MachineStore {
    /// Wraps seeded machine state.
    pub fn new(data: MachineData) -> Self {
        MachineStore {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    /// Executes a function with read access to machine state.
    ///
    /// ## Usage
    /// ```rust
    /// use cafemat_store::{MachineRepository, MachineStore, SeedData};
    ///
    /// let store = MachineStore::new(SeedData::default().into_machine_data().unwrap());
    /// let lattes = store.read(|data| data.item_stock()["Latte"]).unwrap();
    /// assert_eq!(lattes, 10);
    /// ```
    pub fn read<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&MachineData) -> R,
    {
        let data = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned { operation: "read" })?;
        Ok(f(&data))
    }

    /// Executes a function with exclusive write access to machine state.
    pub fn write<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut MachineData) -> R,
    {
        let mut data = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { operation: "write" })?;
        Ok(f(&mut data))
    }

    /// Snapshot of item stock.
    pub fn inventory(&self) -> StoreResult<ItemStock> {
        self.read(|data| data.item_stock().clone())
    }

    /// Snapshot of item prices.
    pub fn prices(&self) -> StoreResult<ItemCatalog> {
        self.read(|data| data.item_prices().clone())
    }

    /// Snapshot of the coin reserve.
    pub fn available_change(&self) -> StoreResult<CoinReserve> {
        self.read(|data| data.coin_reserve().clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
