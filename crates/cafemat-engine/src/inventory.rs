//! # Inventory Service
//!
//! Validates a basket against item stock and applies stock deltas.
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_stock(basket)                                                 │
//! │       │                                                                 │
//! │       ├── basket empty?            → EmptyOrder                        │
//! │       │                                                                 │
//! │       └── for each line, in item-name order:                           │
//! │            ├── not stocked?        → UnknownItem                       │
//! │            ├── quantity <= 0?      → InvalidQuantity                   │
//! │            └── quantity > stock?   → InsufficientStock                 │
//! │                                                                         │
//! │  First failing line wins; nothing is mutated either way.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use cafemat_core::{ItemCatalog, ItemStock, OrderBasket, OrderError};
use cafemat_store::MachineRepository;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

// =============================================================================
// Stock Delta
// =============================================================================

/// Direction of a stock change.
///
/// `Reserve` takes the basket out of stock, `Release` puts it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDelta {
    Reserve,
    Release,
}

impl StockDelta {
    /// +1 for a reservation, -1 for a release.
    pub fn sign(self) -> i64 {
        match self {
            StockDelta::Reserve => 1,
            StockDelta::Release => -1,
        }
    }
}

impl fmt::Display for StockDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockDelta::Reserve => write!(f, "reserve"),
            StockDelta::Release => write!(f, "release"),
        }
    }
}

// =============================================================================
// Inventory Service
// =============================================================================

/// Stock rules for baskets. Stateless; the state lives in the repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryService;

impl InventoryService {
    pub fn new() -> Self {
        InventoryService
    }

    /// Snapshot of item stock.
    pub fn inventory<R: MachineRepository>(&self, repo: &R) -> ItemStock {
        repo.item_stock().clone()
    }

    /// Snapshot of item prices.
    pub fn prices<R: MachineRepository>(&self, repo: &R) -> ItemCatalog {
        repo.item_prices().clone()
    }

    /// Checks every basket line against current stock.
    pub fn validate_stock<R: MachineRepository>(
        &self,
        repo: &R,
        basket: &OrderBasket,
    ) -> Result<(), OrderError> {
        if basket.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let stock = repo.item_stock();
        for (item, &requested) in basket {
            let Some(&available) = stock.get(item) else {
                return Err(OrderError::UnknownItem { item: item.clone() });
            };

            if requested <= 0 {
                return Err(OrderError::InvalidQuantity {
                    item: item.clone(),
                    requested,
                });
            }

            if requested > available {
                return Err(OrderError::InsufficientStock {
                    item: item.clone(),
                    available,
                    requested,
                });
            }
        }

        Ok(())
    }

    /// Moves every basket line in or out of stock.
    ///
    /// `new = current - sign × requested` for each stocked item. Lines naming
    /// an item that is not stocked are skipped without error.
    ///
    /// ## Errors
    /// `EngineError::Overflow` if a quantity does not fit, and whatever the
    /// repository returns from `set_item_stock`.
    pub fn apply_stock_delta<R: MachineRepository>(
        &self,
        repo: &mut R,
        basket: &OrderBasket,
        delta: StockDelta,
    ) -> EngineResult<()> {
        for (item, &requested) in basket {
            let Some(&current) = repo.item_stock().get(item) else {
                warn!(item = %item, %delta, "Skipping stock delta for unknown item");
                continue;
            };

            let updated = requested
                .checked_mul(delta.sign())
                .and_then(|change| current.checked_sub(change))
                .ok_or_else(|| EngineError::overflow("applying a stock delta"))?;

            repo.set_item_stock(item, updated)?;
            debug!(item = %item, %delta, from = current, to = updated, "Stock delta applied");
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
