//! # cafemat-core: Pure Business Logic for Cafemat
//!
//! This crate holds the vocabulary of the coffee machine: money, baskets,
//! coin reserves, the order error taxonomy and the change-making algorithms.
//! Everything here is a pure function over plain data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cafemat Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              apps/cafemat (config, logging, commands)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │      cafemat-engine (inventory, change calculator, pipeline)    │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────┐   ┌───────────▼───────────────────┐   │
//! │  │  cafemat-store (RwLock'd    │   │ ★ cafemat-core (THIS CRATE) ★ │   │
//! │  │  stock / prices / coins)    │──►│  Money, types, change, errors │   │
//! │  └─────────────────────────────┘   └───────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (basket, reserve, order result)
//! - [`money`] - Money type with integer arithmetic
//! - [`change`] - Change-making strategies (greedy, minimal coins)
//! - [`error`] - Order error taxonomy and validation errors
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use cafemat_core::change::{ChangeStrategy, GreedyChange};
//! use cafemat_core::{CoinReserve, Money};
//!
//! let reserve: CoinReserve = [(50, 3), (25, 5), (10, 10)].into_iter().collect();
//! let breakdown = GreedyChange.calculate(Money::new(85), &reserve).unwrap();
//!
//! assert_eq!(breakdown.count_of(50), 1);
//! assert_eq!(breakdown.count_of(25), 1);
//! assert_eq!(breakdown.count_of(10), 1);
//! assert_eq!(breakdown.total(), Money::new(85));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod change;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use change::{ChangeShortfall, ChangeStrategy, ChangeStrategyKind};
pub use error::{ErrorCode, OrderError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Message carried by a committed order before the boundary decorates it.
pub const ORDER_SUCCESS_MESSAGE: &str = "Order processed successfully";

/// Maximum length of an item name accepted into the catalogue.
pub const MAX_ITEM_NAME_LEN: usize = 64;
