//! # cafemat-engine: Order Transactions for Cafemat
//!
//! Validates a basket against stock, prices it, checks the payment, reserves
//! stock, pays out exact change and rolls the reservation back if change
//! cannot be made.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  VendingMachine::place_order(basket, payment)                          │
//! │       │  one write lock on MachineStore for the whole order            │
//! │       ▼                                                                 │
//! │  OrderPipeline::run                                                    │
//! │       │                                                                 │
//! │       ├──► InventoryService::validate_stock      (read only)           │
//! │       ├──► price lookup                          (read only)           │
//! │       ├──► payment check                                               │
//! │       ├──► InventoryService::apply_stock_delta   Reserve               │
//! │       ├──► ChangeCalculator::calculate_change ──► Arc<dyn Strategy>    │
//! │       │                                                                 │
//! │       ├── change ok     ──► Committed                                  │
//! │       └── change failed ──► apply_stock_delta Release ──► RolledBack   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`machine`] - `VendingMachine` facade used by callers
//! - [`order`] - The order pipeline state machine
//! - [`inventory`] - Stock validation and stock deltas
//! - [`change_calculator`] - Runs a change strategy and commits the coins
//! - [`error`] - Engine fault types
//!
//! ## Usage
//!
//! ```rust
//! use cafemat_core::{ChangeStrategyKind, Money, OrderBasket, Payment};
//! use cafemat_engine::VendingMachine;
//! use cafemat_store::{MachineStore, SeedData};
//!
//! let store = MachineStore::new(SeedData::default().into_machine_data().unwrap());
//! let machine = VendingMachine::new(store, ChangeStrategyKind::Greedy.build());
//!
//! let basket: OrderBasket = [("Latte".to_string(), 1)].into_iter().collect();
//! let result = machine.place_order(&basket, &Payment::cash(Money::new(1500))).unwrap();
//!
//! assert!(result.success);
//! assert_eq!(result.change_amount, Money::new(150));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod change_calculator;
pub mod error;
pub mod inventory;
pub mod machine;
pub mod order;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use change_calculator::ChangeCalculator;
pub use error::{EngineError, EngineResult};
pub use inventory::{InventoryService, StockDelta};
pub use machine::VendingMachine;
pub use order::{OrderPipeline, PipelineState};
