//! # Repository Module
//!
//! The read/write primitives the engine is allowed to use on machine state.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  InventoryService / ChangeCalculator (cafemat-engine)                  │
//! │       │                                                                 │
//! │       │  generic over R: MachineRepository                             │
//! │       ▼                                                                 │
//! │  MachineRepository                                                     │
//! │  ├── item_stock(&self)            read                                 │
//! │  ├── item_prices(&self)           read                                 │
//! │  ├── coin_reserve(&self)          read                                 │
//! │  ├── has_sufficient_stock(&self)  read                                 │
//! │  ├── set_item_stock(&mut self)    write, known items only              │
//! │  └── replace_coin_reserve(&mut)   write, known denominations only      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MachineData (store.rs), or a test double                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writers take `&mut self`, so whoever holds a `&mut R` holds the only
//! access path. `MachineStore::write` hands one out under the write lock.

use cafemat_core::{CoinReserve, ItemCatalog, ItemStock};

use crate::error::StoreResult;

/// Access to item stock, item prices and the coin reserve.
pub trait MachineRepository {
    /// Item name → quantity on hand.
    fn item_stock(&self) -> &ItemStock;

    /// Item name → unit price.
    fn item_prices(&self) -> &ItemCatalog;

    /// Denomination → coins available for change.
    fn coin_reserve(&self) -> &CoinReserve;

    /// Overwrites the stock of an existing item.
    ///
    /// ## Errors
    /// `StoreError::NotFound` if the item was never stocked.
    fn set_item_stock(&mut self, item: &str, quantity: i64) -> StoreResult<()>;

    /// Copies counts from `reserve` onto the stored reserve.
    ///
    /// Only denominations already in the store are updated; anything else in
    /// `reserve` is ignored.
    fn replace_coin_reserve(&mut self, reserve: &CoinReserve);

    /// True when `item` is stocked with at least `quantity` units.
    fn has_sufficient_stock(&self, item: &str, quantity: i64) -> bool {
        self.item_stock()
            .get(item)
            .is_some_and(|&available| available >= quantity)
    }
}
