//! # Order Pipeline
//!
//! One order, start to finish, as a small state machine.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Validating ──► Pricing ──► PaymentCheck ──► Reserving                 │
//! │      │             │             │               │                      │
//! │      ▼             ▼             ▼               ▼                      │
//! │   Rejected      Rejected      Rejected     ChangeCalculation           │
//! │  (stock rule)  (no price)   (underpaid)       │         │               │
//! │                                               ▼         ▼               │
//! │                                          Committed   RolledBack        │
//! │                                                      (stock released)  │
//! │                                                                         │
//! │  Every transition is logged at debug level with the state name.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! The pipeline runs against a `&mut R` repository. `VendingMachine` passes
//! the store's data from inside a single write lock, so the tentative
//! reservation made in `Reserving` is never visible outside this function.

use std::fmt;

use cafemat_core::{ItemCatalog, Money, OrderBasket, OrderError, OrderOutcome, Payment};
use cafemat_store::MachineRepository;
use tracing::{debug, error, info, warn};

use crate::change_calculator::ChangeCalculator;
use crate::error::{EngineError, EngineResult};
use crate::inventory::{InventoryService, StockDelta};

// =============================================================================
// Pipeline State
// =============================================================================

/// Where an order is in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Validating,
    Pricing,
    PaymentCheck,
    Reserving,
    ChangeCalculation,
    Committed,
    RolledBack,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Validating => "validating",
            PipelineState::Pricing => "pricing",
            PipelineState::PaymentCheck => "payment_check",
            PipelineState::Reserving => "reserving",
            PipelineState::ChangeCalculation => "change_calculation",
            PipelineState::Committed => "committed",
            PipelineState::RolledBack => "rolled_back",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// Σ price × quantity over the basket.
///
/// Items with no price, or a zero price, make the whole basket unpriceable.
/// The inner error lists them; the customer-facing message does not.
pub fn price_basket(
    prices: &ItemCatalog,
    basket: &OrderBasket,
) -> EngineResult<Result<Money, OrderError>> {
    let missing: Vec<String> = basket
        .keys()
        .filter(|item| prices.get(*item).map_or(true, |price| price.is_zero()))
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Ok(Err(OrderError::PriceUnavailable { items: missing }));
    }

    let mut total = Money::zero();
    for (item, &quantity) in basket {
        let line = prices
            .get(item)
            .and_then(|price| price.checked_mul_quantity(quantity))
            .ok_or_else(|| EngineError::overflow("pricing a basket line"))?;
        total = total
            .checked_add(line)
            .ok_or_else(|| EngineError::overflow("totalling a basket"))?;
    }

    Ok(Ok(total))
}

// =============================================================================
// Order Pipeline
// =============================================================================

/// Composes the inventory service and the change calculator into one order.
#[derive(Debug, Clone, Copy)]
pub struct OrderPipeline<'a> {
    inventory: &'a InventoryService,
    calculator: &'a ChangeCalculator,
}

impl<'a> OrderPipeline<'a> {
    pub fn new(inventory: &'a InventoryService, calculator: &'a ChangeCalculator) -> Self {
        OrderPipeline {
            inventory,
            calculator,
        }
    }

    fn enter(&self, state: PipelineState) {
        debug!(%state, "Order pipeline transition");
    }

    /// Runs one order and returns exactly one outcome.
    ///
    /// ## Errors
    /// Only faults: store failures, arithmetic overflow, a strategy that
    /// overdraws the reserve. If a fault happens after stock was reserved,
    /// the reservation is released before the error is returned.
    pub fn run<R: MachineRepository>(
        &self,
        repo: &mut R,
        basket: &OrderBasket,
        payment: &Payment,
    ) -> EngineResult<OrderOutcome> {
        self.enter(PipelineState::Validating);
        if let Err(error) = self.inventory.validate_stock(&*repo, basket) {
            info!(%error, "Order rejected by stock validation");
            return Ok(OrderOutcome::rejected(error));
        }

        self.enter(PipelineState::Pricing);
        let total_cost = match price_basket(repo.item_prices(), basket)? {
            Ok(total) => total,
            Err(error) => {
                if let OrderError::PriceUnavailable { items } = &error {
                    warn!(?items, "Stocked items without a usable price");
                }
                return Ok(OrderOutcome::rejected(error));
            }
        };

        self.enter(PipelineState::PaymentCheck);
        let tendered = payment.total_amount;
        if tendered < total_cost {
            info!(%total_cost, %tendered, "Order rejected for underpayment");
            return Ok(OrderOutcome::Rejected {
                error: OrderError::InsufficientPayment {
                    required: total_cost,
                    provided: tendered,
                },
                total_cost,
                change_amount: Money::zero(),
            });
        }

        self.enter(PipelineState::Reserving);
        self.inventory
            .apply_stock_delta(repo, basket, StockDelta::Reserve)?;

        self.enter(PipelineState::ChangeCalculation);
        let change_amount = tendered - total_cost;
        match self.calculator.calculate_change(repo, change_amount) {
            Ok(Ok(breakdown)) => {
                self.enter(PipelineState::Committed);
                Ok(OrderOutcome::Committed {
                    total_cost,
                    change_amount,
                    breakdown,
                })
            }
            Ok(Err(error)) => {
                self.inventory
                    .apply_stock_delta(repo, basket, StockDelta::Release)?;
                self.enter(PipelineState::RolledBack);
                info!(%error, "Order rolled back");
                Ok(OrderOutcome::Rejected {
                    error,
                    total_cost,
                    change_amount,
                })
            }
            Err(fault) => {
                if let Err(release_fault) =
                    self.inventory
                        .apply_stock_delta(repo, basket, StockDelta::Release)
                {
                    error!(%release_fault, "Failed to release reserved stock");
                }
                self.enter(PipelineState::RolledBack);
                Err(fault)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{basket, sample_data};
    use cafemat_core::{
        ChangeBreakdown, ChangeShortfall, ChangeStrategy, ChangeStrategyKind, CoinReserve,
    };
    use cafemat_store::MachineData;
    use std::sync::Arc;

    fn run(
        data: &mut MachineData,
        lines: &[(&str, i64)],
        tendered: i64,
    ) -> EngineResult<OrderOutcome> {
        let inventory = InventoryService::new();
        let calculator = ChangeCalculator::new(ChangeStrategyKind::Greedy.build());
        OrderPipeline::new(&inventory, &calculator).run(
            data,
            &basket(lines),
            &Payment::cash(Money::new(tendered)),
        )
    }

    #[test]
    fn test_committed_order() {
        let mut data = sample_data();
        let outcome = run(
            &mut data,
            &[("Espresso", 3), ("Latte", 2), ("Cappuccino", 1)],
            500,
        )
        .unwrap();

        let expected: ChangeBreakdown = [(100, 1), (25, 1), (5, 1)].into_iter().collect();
        assert_eq!(
            outcome,
            OrderOutcome::Committed {
                total_cost: Money::new(370),
                change_amount: Money::new(130),
                breakdown: expected,
            }
        );
        assert_eq!(data.item_stock()["Espresso"], 7);
        assert_eq!(data.item_stock()["Latte"], 8);
        assert_eq!(data.item_stock()["Cappuccino"], 9);
        assert_eq!(data.coin_reserve()[&100], 4);
        assert_eq!(data.coin_reserve()[&25], 4);
        assert_eq!(data.coin_reserve()[&5], 4);
    }

    #[test]
    fn test_exact_payment_has_empty_breakdown() {
        let mut data = sample_data();
        let coins_before = data.coin_reserve().clone();
        let outcome = run(&mut data, &[("Latte", 2)], 150).unwrap();

        match outcome {
            OrderOutcome::Committed {
                change_amount,
                breakdown,
                ..
            } => {
                assert!(change_amount.is_zero());
                assert!(breakdown.is_empty());
            }
            other => panic!("expected commit, got {:?}", other),
        }
        assert_eq!(data.coin_reserve(), &coins_before);
    }

    #[test]
    fn test_stock_failure_mutates_nothing() {
        let mut data = sample_data();
        let before = data.clone();
        let outcome = run(&mut data, &[("Latte", 11)], 5_000).unwrap();

        assert!(matches!(
            outcome,
            OrderOutcome::Rejected {
                error: OrderError::InsufficientStock { .. },
                ..
            }
        ));
        assert_eq!(data, before);
    }

    #[test]
    fn test_missing_and_zero_prices() {
        let mut data = MachineData::new(
            [("Latte".to_string(), Money::zero())].into_iter().collect(),
            [("Latte".to_string(), 5), ("Espresso".to_string(), 5)]
                .into_iter()
                .collect(),
            CoinReserve::new(),
        );
        let before = data.clone();

        let outcome = run(&mut data, &[("Latte", 1), ("Espresso", 1)], 500).unwrap();
        match outcome {
            OrderOutcome::Rejected {
                error: OrderError::PriceUnavailable { items },
                total_cost,
                ..
            } => {
                assert_eq!(items, vec!["Espresso".to_string(), "Latte".to_string()]);
                assert!(total_cost.is_zero());
            }
            other => panic!("expected price failure, got {:?}", other),
        }
        assert_eq!(data, before);
    }

    #[test]
    fn test_underpayment_carries_total() {
        let mut data = sample_data();
        let before = data.clone();
        let outcome = run(&mut data, &[("Espresso", 2)], 60).unwrap();

        assert_eq!(
            outcome,
            OrderOutcome::Rejected {
                error: OrderError::InsufficientPayment {
                    required: Money::new(100),
                    provided: Money::new(60),
                },
                total_cost: Money::new(100),
                change_amount: Money::zero(),
            }
        );
        assert_eq!(data, before);
    }

    #[test]
    fn test_change_failure_rolls_back_stock() {
        let mut data = MachineData::new(
            [("Espresso".to_string(), Money::new(50))].into_iter().collect(),
            [("Espresso".to_string(), 10)].into_iter().collect(),
            [(25, 1)].into_iter().collect(),
        );
        let before = data.clone();

        let outcome = run(&mut data, &[("Espresso", 1)], 100).unwrap();
        assert_eq!(
            outcome,
            OrderOutcome::Rejected {
                error: OrderError::InsufficientChange {
                    amount: Money::new(50)
                },
                total_cost: Money::new(50),
                change_amount: Money::new(50),
            }
        );
        assert_eq!(data, before);
    }

    #[derive(Debug)]
    struct BrokenStrategy;

    impl ChangeStrategy for BrokenStrategy {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn calculate(
            &self,
            _amount: Money,
            _available: &CoinReserve,
        ) -> Result<ChangeBreakdown, ChangeShortfall> {
            Ok([(1_000, 1)].into_iter().collect())
        }
    }

    #[test]
    fn test_fault_after_reservation_releases_stock() {
        let mut data = sample_data();
        let before = data.clone();
        let inventory = InventoryService::new();
        let calculator = ChangeCalculator::new(Arc::new(BrokenStrategy));

        let result = OrderPipeline::new(&inventory, &calculator).run(
            &mut data,
            &basket(&[("Latte", 1)]),
            &Payment::cash(Money::new(1_075)),
        );

        assert!(matches!(
            result,
            Err(EngineError::ReserveUnderflow { denomination: 1_000 })
        ));
        assert_eq!(data, before);
    }

    #[test]
    fn test_price_basket_overflow() {
        let prices: ItemCatalog = [("Gold".to_string(), Money::new(i64::MAX))]
            .into_iter()
            .collect();
        let result = price_basket(&prices, &basket(&[("Gold", 2)]));
        assert!(matches!(result, Err(EngineError::Overflow { .. })));
    }

    #[test]
    fn test_state_names() {
        assert_eq!(PipelineState::PaymentCheck.to_string(), "payment_check");
        assert_eq!(PipelineState::RolledBack.to_string(), "rolled_back");
    }
}
