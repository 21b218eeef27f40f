//! # Vending Machine
//!
//! The facade callers use: three snapshot queries and `place_order`.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  place_order(basket, payment)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  span "order" { order_id = <uuid v4> }                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.write(|data| OrderPipeline::run(data, ...))                     │
//! │       │            └── one critical section per order                  │
//! │       ▼                                                                 │
//! │  OrderOutcome ──► OrderResult                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use cafemat_core::{
    ChangeStrategy, CoinReserve, ItemCatalog, ItemStock, OrderBasket, OrderOutcome, OrderResult,
    Payment,
};
use cafemat_store::MachineStore;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::change_calculator::ChangeCalculator;
use crate::error::EngineResult;
use crate::inventory::InventoryService;
use crate::order::OrderPipeline;

/// A coffee machine: shared state plus the services that act on it.
///
/// Cloning is cheap and every clone works on the same store.
#[derive(Debug, Clone)]
pub struct VendingMachine {
    store: MachineStore,
    inventory: InventoryService,
    calculator: ChangeCalculator,
}

impl VendingMachine {
    pub fn new(store: MachineStore, strategy: Arc<dyn ChangeStrategy>) -> Self {
        VendingMachine {
            store,
            inventory: InventoryService::new(),
            calculator: ChangeCalculator::new(strategy),
        }
    }

    /// Item stock as of now.
    pub fn inventory(&self) -> EngineResult<ItemStock> {
        Ok(self.store.read(|data| self.inventory.inventory(data))?)
    }

    /// Item prices as of now.
    pub fn prices(&self) -> EngineResult<ItemCatalog> {
        Ok(self.store.read(|data| self.inventory.prices(data))?)
    }

    /// Coin reserve as of now.
    pub fn available_change(&self) -> EngineResult<CoinReserve> {
        Ok(self
            .store
            .read(|data| self.calculator.available_change(data))?)
    }

    /// Runs one order against the machine.
    ///
    /// Business failures come back as `Ok(OrderResult { success: false })`.
    /// `Err` means a fault; machine state is unchanged in that case.
    pub fn place_order(&self, basket: &OrderBasket, payment: &Payment) -> EngineResult<OrderResult> {
        let order_id = Uuid::new_v4();
        let span = info_span!("order", %order_id);
        let _enter = span.enter();

        info!(
            lines = basket.len(),
            tendered = %payment.total_amount,
            strategy = self.calculator.strategy_name(),
            "Order received"
        );

        let pipeline = OrderPipeline::new(&self.inventory, &self.calculator);
        let outcome = self
            .store
            .write(|data| pipeline.run(data, basket, payment))??;

        match &outcome {
            OrderOutcome::Committed {
                total_cost,
                change_amount,
                breakdown,
            } => info!(
                %total_cost,
                %change_amount,
                coins = breakdown.coin_count(),
                "Order committed"
            ),
            OrderOutcome::Rejected { error, .. } => {
                info!(code = ?error.code(), %error, "Order not completed")
            }
        }

        Ok(outcome.into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
