//! # Change Calculator
//!
//! Runs the configured change strategy against the coin reserve and, when it
//! succeeds, takes the coins out of the reserve.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate_change(repo, amount)                                         │
//! │       │                                                                 │
//! │       ├── amount < 0  → Ok(Err(NegativeAmount))        no store access  │
//! │       ├── amount == 0 → Ok(Ok(empty))                  no store access  │
//! │       │                                                                 │
//! │       ├── read reserve, strategy.calculate(amount, &reserve)           │
//! │       │      └── shortfall → Ok(Err(InsufficientChange)) no write      │
//! │       │                                                                 │
//! │       └── reserve - breakdown → replace_coin_reserve (one write)       │
//! │              └── Ok(Ok(breakdown))                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The outer `Result` is for faults, the inner one for business outcomes the
//! pipeline turns into an order result.

use std::sync::Arc;

use cafemat_core::{ChangeBreakdown, ChangeStrategy, CoinReserve, Money, OrderError};
use cafemat_store::MachineRepository;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};

/// Pays out change from the machine's coin reserve.
#[derive(Debug, Clone)]
pub struct ChangeCalculator {
    strategy: Arc<dyn ChangeStrategy>,
}

impl ChangeCalculator {
    pub fn new(strategy: Arc<dyn ChangeStrategy>) -> Self {
        ChangeCalculator { strategy }
    }

    /// Name of the strategy in use, for logs.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Snapshot of the coin reserve.
    pub fn available_change<R: MachineRepository>(&self, repo: &R) -> CoinReserve {
        repo.coin_reserve().clone()
    }

    /// Computes a breakdown for `amount` and deducts it from the reserve.
    ///
    /// ## Errors
    /// `EngineError::ReserveUnderflow` if the strategy returned a breakdown
    /// the reserve cannot cover. The reserve is left untouched in that case.
    pub fn calculate_change<R: MachineRepository>(
        &self,
        repo: &mut R,
        amount: Money,
    ) -> EngineResult<Result<ChangeBreakdown, OrderError>> {
        if amount.is_negative() {
            warn!(%amount, "Negative change requested");
            return Ok(Err(OrderError::NegativeAmount { amount }));
        }
        if amount.is_zero() {
            return Ok(Ok(ChangeBreakdown::new()));
        }

        let available = repo.coin_reserve().clone();
        let breakdown = match self.strategy.calculate(amount, &available) {
            Ok(breakdown) => breakdown,
            Err(shortfall) => {
                info!(
                    %amount,
                    remaining = %shortfall.remaining,
                    strategy = self.strategy.name(),
                    "Exact change not possible"
                );
                return Ok(Err(OrderError::InsufficientChange { amount }));
            }
        };

        let mut updated = available;
        for (denomination, used) in breakdown.iter_descending() {
            let slot = updated
                .get_mut(&denomination)
                .ok_or(EngineError::ReserveUnderflow { denomination })?;
            *slot = slot
                .checked_sub(used)
                .ok_or(EngineError::ReserveUnderflow { denomination })?;
        }

        repo.replace_coin_reserve(&updated);
        debug!(%amount, coins = breakdown.coin_count(), "Change disbursed");

        Ok(Ok(breakdown))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
