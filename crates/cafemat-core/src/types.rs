//! # Domain Types
//!
//! Core domain types used throughout Cafemat.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Machine state (process-wide, lives in cafemat-store)                  │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ItemCatalog   │   │    ItemStock    │   │   CoinReserve   │       │
//! │  │  name → Money   │   │  name → i64     │   │  denom → count  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Per request (transient)                                               │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderBasket   │   │     Payment     │   │   OrderResult   │       │
//! │  │  name → qty     │   │  total_amount   │   │  success        │       │
//! │  └─────────────────┘   │  coins, bills   │   │  message        │       │
//! │                        └─────────────────┘   │  total_cost     │       │
//! │  ┌─────────────────┐                         │  change_amount  │       │
//! │  │ ChangeBreakdown │◄────────────────────────│  breakdown?     │       │
//! │  │  denom → count  │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All maps are `BTreeMap`s so iteration order (and therefore which basket
//! line is reported first, and log output) is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ErrorCode, OrderError};
use crate::money::Money;
use crate::ORDER_SUCCESS_MESSAGE;

// =============================================================================
// Machine State Maps
// =============================================================================

/// Face value of a coin, in the smallest currency unit.
pub type Denomination = u32;

/// Number of coins of one denomination.
pub type CoinCount = u32;

/// Item name → unit price.
pub type ItemCatalog = BTreeMap<String, Money>;

/// Item name → quantity on hand.
pub type ItemStock = BTreeMap<String, i64>;

/// Denomination → coins available for change.
pub type CoinReserve = BTreeMap<Denomination, CoinCount>;

/// Item name → requested quantity. Quantities are signed because the basket
/// arrives from the outside world; non-positive lines are a business error.
pub type OrderBasket = BTreeMap<String, i64>;

/// Total face value of a reserve, saturating at `i64::MAX`.
pub fn reserve_value(reserve: &CoinReserve) -> Money {
    face_value(reserve)
}

fn face_value(coins: &BTreeMap<Denomination, CoinCount>) -> Money {
    coins
        .iter()
        .map(|(&denomination, &count)| Money::from_coins(denomination, count))
        .fold(Money::zero(), |total, value| total.saturating_add(value))
}

// =============================================================================
// Change Breakdown
// =============================================================================

/// Coins handed back to the customer: denomination → count.
///
/// ## Invariant
/// Only positive counts are stored, and when attached to a successful order
/// `total()` equals the order's change amount exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangeBreakdown(BTreeMap<Denomination, CoinCount>);

impl ChangeBreakdown {
    /// Creates an empty breakdown (exact payment).
    pub fn new() -> Self {
        ChangeBreakdown(BTreeMap::new())
    }

    /// Records `count` coins of `denomination`. Zero counts are ignored.
    pub fn insert(&mut self, denomination: Denomination, count: CoinCount) {
        if count > 0 {
            self.0.insert(denomination, count);
        }
    }

    /// Coins of `denomination` in this breakdown (0 if absent).
    pub fn count_of(&self, denomination: Denomination) -> CoinCount {
        self.0.get(&denomination).copied().unwrap_or(0)
    }

    /// Sum of denomination × count.
    pub fn total(&self) -> Money {
        face_value(&self.0)
    }

    /// Total number of coins handed out.
    pub fn coin_count(&self) -> u64 {
        self.0.values().map(|&count| u64::from(count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in descending denomination order, the order coins are paid out.
    pub fn iter_descending(&self) -> impl Iterator<Item = (Denomination, CoinCount)> + '_ {
        self.0.iter().rev().map(|(&d, &c)| (d, c))
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &BTreeMap<Denomination, CoinCount> {
        &self.0
    }
}

impl FromIterator<(Denomination, CoinCount)> for ChangeBreakdown {
    fn from_iter<I: IntoIterator<Item = (Denomination, CoinCount)>>(iter: I) -> Self {
        let mut breakdown = ChangeBreakdown::new();
        for (denomination, count) in iter {
            breakdown.insert(denomination, count);
        }
        breakdown
    }
}

// =============================================================================
// Payment
// =============================================================================

/// Cash handed over by the customer.
///
/// `coins` and `bills` describe what was inserted, for display only. They are
/// not reconciled against `total_amount`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Payment {
    /// Total tendered amount.
    pub total_amount: Money,

    /// Coins inserted (informational).
    #[serde(default)]
    pub coins: Vec<Denomination>,

    /// Bills inserted (informational).
    #[serde(default)]
    pub bills: Vec<u32>,
}

impl Payment {
    /// A cash payment with no coin/bill detail.
    pub fn cash(total_amount: Money) -> Self {
        Payment {
            total_amount,
            coins: Vec::new(),
            bills: Vec::new(),
        }
    }
}

// =============================================================================
// Order Outcome
// =============================================================================

/// Terminal state of one run of the order pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// Stock decremented, coins paid out.
    Committed {
        total_cost: Money,
        change_amount: Money,
        breakdown: ChangeBreakdown,
    },

    /// Nothing changed in the machine. `total_cost` and `change_amount` are
    /// zero when the pipeline stopped before computing them.
    Rejected {
        error: OrderError,
        total_cost: Money,
        change_amount: Money,
    },
}

impl OrderOutcome {
    /// Rejection that happened before pricing.
    pub fn rejected(error: OrderError) -> Self {
        OrderOutcome::Rejected {
            error,
            total_cost: Money::zero(),
            change_amount: Money::zero(),
        }
    }
}

// =============================================================================
// Order Result
// =============================================================================

/// What the caller gets back for every order, success or not.
///
/// ## Serialization
/// ```json
/// {
///   "success": true,
///   "message": "Order processed successfully",
///   "totalCost": 370,
///   "changeAmount": 130,
///   "changeBreakdown": { "25": 1, "100": 1, "5": 1 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderResult {
    pub success: bool,
    pub message: String,
    pub total_cost: Money,
    pub change_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_breakdown: Option<ChangeBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

impl OrderResult {
    /// A failed result carrying only a code and a message.
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        OrderResult {
            success: false,
            message: message.into(),
            total_cost: Money::zero(),
            change_amount: Money::zero(),
            change_breakdown: None,
            error_code: Some(code),
        }
    }
}

impl From<OrderOutcome> for OrderResult {
    fn from(outcome: OrderOutcome) -> Self {
        match outcome {
            OrderOutcome::Committed {
                total_cost,
                change_amount,
                breakdown,
            } => OrderResult {
                success: true,
                message: ORDER_SUCCESS_MESSAGE.to_string(),
                total_cost,
                change_amount,
                change_breakdown: Some(breakdown),
                error_code: None,
            },
            OrderOutcome::Rejected {
                error,
                total_cost,
                change_amount,
            } => OrderResult {
                success: false,
                message: error.to_string(),
                total_cost,
                change_amount,
                change_breakdown: None,
                error_code: Some(error.code()),
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_ignores_zero_counts() {
        let breakdown: ChangeBreakdown = [(100, 1), (50, 0), (25, 1)].into_iter().collect();
        assert_eq!(breakdown.as_map().len(), 2);
        assert_eq!(breakdown.count_of(50), 0);
        assert_eq!(breakdown.total(), Money::new(125));
        assert_eq!(breakdown.coin_count(), 2);
    }

    #[test]
    fn test_breakdown_descending_order() {
        let breakdown: ChangeBreakdown = [(25, 1), (100, 2), (50, 1)].into_iter().collect();
        let order: Vec<Denomination> = breakdown.iter_descending().map(|(d, _)| d).collect();
        assert_eq!(order, vec![100, 50, 25]);
    }

    #[test]
    fn test_breakdown_json_uses_denomination_keys() {
        let breakdown: ChangeBreakdown = [(100, 1), (25, 1)].into_iter().collect();
        let json = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(json, r#"{"25":1,"100":1}"#);

        let back: ChangeBreakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(back, breakdown);
    }

    #[test]
    fn test_reserve_value() {
        let reserve: CoinReserve = [(500, 2), (100, 3), (25, 4)].into_iter().collect();
        assert_eq!(reserve_value(&reserve), Money::new(1400));
    }

    #[test]
    fn test_reserve_value_saturates() {
        let reserve: CoinReserve = [(u32::MAX, u32::MAX), (u32::MAX - 1, u32::MAX)]
            .into_iter()
            .collect();
        assert_eq!(reserve_value(&reserve), Money::new(i64::MAX));
    }

    #[test]
    fn test_committed_outcome_to_result() {
        let breakdown: ChangeBreakdown = [(100, 1), (25, 1), (5, 1)].into_iter().collect();
        let result = OrderResult::from(OrderOutcome::Committed {
            total_cost: Money::new(370),
            change_amount: Money::new(130),
            breakdown: breakdown.clone(),
        });

        assert!(result.success);
        assert_eq!(result.message, ORDER_SUCCESS_MESSAGE);
        assert_eq!(result.change_breakdown, Some(breakdown));
        assert_eq!(result.error_code, None);
    }

    #[test]
    fn test_rejected_outcome_to_result() {
        let result = OrderResult::from(OrderOutcome::Rejected {
            error: OrderError::InsufficientPayment {
                required: Money::new(100),
                provided: Money::new(50),
            },
            total_cost: Money::new(100),
            change_amount: Money::zero(),
        });

        assert!(!result.success);
        assert!(result.message.contains("Insufficient payment"));
        assert_eq!(result.total_cost, Money::new(100));
        assert_eq!(result.change_breakdown, None);
        assert_eq!(result.error_code, Some(ErrorCode::InsufficientPayment));
    }

    #[test]
    fn test_result_json_shape() {
        let result = OrderResult::from(OrderOutcome::rejected(OrderError::EmptyOrder));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Order is empty");
        assert_eq!(json["totalCost"], 0);
        assert_eq!(json["errorCode"], "EMPTY_ORDER");
        assert!(json.get("changeBreakdown").is_none());
    }

    #[test]
    fn test_payment_defaults_coin_detail() {
        let payment: Payment = serde_json::from_str(r#"{"totalAmount": 500}"#).unwrap();
        assert_eq!(payment, Payment::cash(Money::new(500)));
    }
}
