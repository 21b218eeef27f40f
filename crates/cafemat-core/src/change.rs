//! # Change-Making Strategies
//!
//! Pure functions from (amount, finite coin reserve) to an exact breakdown.
//!
//! ## Where Strategies Sit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ChangeCalculator (cafemat-engine)                                     │
//! │     │  reads CoinReserve from the store                                │
//! │     ▼                                                                   │
//! │  Arc<dyn ChangeStrategy> ← THIS MODULE                                 │
//! │     │                                                                   │
//! │     ├── GreedyChange        largest coin first, may miss solutions     │
//! │     └── MinimalCoinsChange  bounded DP, fewest coins if any exist      │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Ok(ChangeBreakdown)  or  Err(ChangeShortfall)                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Strategies never mutate anything. Committing the coins is the
//! calculator's job.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{reserve_value, ChangeBreakdown, CoinCount, CoinReserve, Denomination};

// =============================================================================
// Strategy Trait
// =============================================================================

/// The reserve cannot pay out the requested amount exactly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("change short by {remaining}")]
pub struct ChangeShortfall {
    /// Amount left unpaid when the strategy gave up.
    pub remaining: Money,
}

/// An exact change-making algorithm over a finite coin reserve.
///
/// ## Contract
/// - `Ok(b)` implies `b.total() == amount` and `b.count_of(d) <= available[d]`
/// - zero amount is always `Ok(empty)`
/// - the reserve is only read
pub trait ChangeStrategy: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn calculate(
        &self,
        amount: Money,
        available: &CoinReserve,
    ) -> Result<ChangeBreakdown, ChangeShortfall>;
}

// =============================================================================
// Greedy
// =============================================================================

/// Largest denomination first, as many as fit and as many as are stocked.
///
/// Not optimal for bounded reserves: `6` over `{4:1, 3:2}` takes the 4 and
/// then fails on the remaining 2, even though `3 + 3` exists. That failure is
/// reported, not worked around.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyChange;

impl ChangeStrategy for GreedyChange {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn calculate(
        &self,
        amount: Money,
        available: &CoinReserve,
    ) -> Result<ChangeBreakdown, ChangeShortfall> {
        if amount.is_zero() {
            return Ok(ChangeBreakdown::new());
        }
        if amount.is_negative() {
            return Err(ChangeShortfall { remaining: amount });
        }

        let mut remaining = amount.amount();
        let mut breakdown = ChangeBreakdown::new();

        for (&denomination, &count) in available.iter().rev() {
            if remaining == 0 {
                break;
            }
            if denomination == 0 || count == 0 {
                continue;
            }

            let face = i64::from(denomination);
            let to_use = (remaining / face).min(i64::from(count));
            if to_use > 0 {
                // to_use <= count, so it fits back into a CoinCount
                breakdown.insert(denomination, to_use as CoinCount);
                remaining -= to_use * face;
            }
        }

        if remaining == 0 {
            Ok(breakdown)
        } else {
            Err(ChangeShortfall {
                remaining: Money::new(remaining),
            })
        }
    }
}

// =============================================================================
// Minimal Coins (bounded dynamic programming)
// =============================================================================

/// Fewest-coins exact change using each denomination at most as often as it
/// is stocked.
///
/// ## Algorithm
/// ```text
/// count 13 of coin d  →  bundles of 1, 2, 4, 6 coins (any k ≤ 13 is a subset)
///
/// per bundle b, v descending:  best[v] = min(best[v], best[v - b.value] + b.coins)
/// ```
/// Splitting counts into power-of-two bundles turns the bounded problem into
/// a 0/1 knapsack, so the table work is `amount × Σ log2(count)`. A bit per
/// bundle and amount records whether the bundle was taken; walking the
/// bundles backwards from `best[amount]` recovers the coins.
///
/// Amounts above `max_amount` fall back to [`GreedyChange`] so the table
/// stays small.
#[derive(Debug, Clone, Copy)]
pub struct MinimalCoinsChange {
    pub max_amount: i64,
}

impl MinimalCoinsChange {
    /// Largest amount solved with the table by default.
    pub const DEFAULT_MAX_AMOUNT: i64 = 100_000;
}

impl Default for MinimalCoinsChange {
    fn default() -> Self {
        MinimalCoinsChange {
            max_amount: Self::DEFAULT_MAX_AMOUNT,
        }
    }
}

/// A fixed group of same-denomination coins, taken whole or not at all.
#[derive(Debug, Clone, Copy)]
struct CoinBundle {
    denomination: Denomination,
    coins: CoinCount,
    value: usize,
}

/// Power-of-two bundles per denomination, capped at what `target` can use.
fn bundle_reserve(available: &CoinReserve, target: usize) -> Vec<CoinBundle> {
    let mut bundles = Vec::new();

    for (&denomination, &count) in available {
        let face = denomination as usize;
        if face == 0 || face > target || count == 0 {
            continue;
        }

        let mut left = (count as usize).min(target / face);
        let mut size = 1usize;
        while left > 0 {
            let coins = size.min(left);
            bundles.push(CoinBundle {
                denomination,
                // coins <= count, so it fits back into a CoinCount
                coins: coins as CoinCount,
                value: coins * face,
            });
            left -= coins;
            size = size.saturating_mul(2);
        }
    }

    bundles
}

impl ChangeStrategy for MinimalCoinsChange {
    fn name(&self) -> &'static str {
        "minimal_coins"
    }

    fn calculate(
        &self,
        amount: Money,
        available: &CoinReserve,
    ) -> Result<ChangeBreakdown, ChangeShortfall> {
        if amount.is_zero() {
            return Ok(ChangeBreakdown::new());
        }

        let shortfall = ChangeShortfall { remaining: amount };
        if amount.is_negative() || amount > reserve_value(available) {
            return Err(shortfall);
        }
        if amount.amount() > self.max_amount {
            return GreedyChange.calculate(amount, available);
        }

        let target = usize::try_from(amount.amount()).map_err(|_| shortfall.clone())?;
        let bundles = bundle_reserve(available, target);

        let mut best: Vec<Option<u64>> = vec![None; target + 1];
        best[0] = Some(0);
        let mut taken: Vec<Vec<bool>> = Vec::with_capacity(bundles.len());

        for bundle in &bundles {
            let mut took = vec![false; target + 1];
            for v in (bundle.value..=target).rev() {
                if let Some(prev) = best[v - bundle.value] {
                    let candidate = prev + u64::from(bundle.coins);
                    if best[v].map_or(true, |current| candidate < current) {
                        best[v] = Some(candidate);
                        took[v] = true;
                    }
                }
            }
            taken.push(took);
        }

        if best[target].is_none() {
            return Err(shortfall);
        }

        let mut used: BTreeMap<Denomination, CoinCount> = BTreeMap::new();
        let mut v = target;
        for (index, bundle) in bundles.iter().enumerate().rev() {
            if taken[index][v] {
                *used.entry(bundle.denomination).or_insert(0) += bundle.coins;
                v -= bundle.value;
            }
        }

        Ok(used.into_iter().collect())
    }
}

// =============================================================================
// Strategy Selection
// =============================================================================

/// Which strategy a machine is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStrategyKind {
    #[default]
    Greedy,
    MinimalCoins,
}

impl ChangeStrategyKind {
    /// Instantiates the configured strategy.
    pub fn build(self) -> Arc<dyn ChangeStrategy> {
        match self {
            ChangeStrategyKind::Greedy => Arc::new(GreedyChange),
            ChangeStrategyKind::MinimalCoins => Arc::new(MinimalCoinsChange::default()),
        }
    }
}

impl fmt::Display for ChangeStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeStrategyKind::Greedy => write!(f, "greedy"),
            ChangeStrategyKind::MinimalCoins => write!(f, "minimal_coins"),
        }
    }
}

impl FromStr for ChangeStrategyKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Ok(ChangeStrategyKind::Greedy),
            "minimal_coins" | "minimal-coins" => Ok(ChangeStrategyKind::MinimalCoins),
            _ => Err(ValidationError::NotAllowed {
                field: "change_strategy".to_string(),
                allowed: vec!["greedy".to_string(), "minimal_coins".to_string()],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::{Duration, Instant};

    fn reserve(pairs: &[(Denomination, CoinCount)]) -> CoinReserve {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_greedy_takes_largest_first() {
        let available = reserve(&[(50, 3), (25, 5), (10, 10)]);
        let breakdown = GreedyChange.calculate(Money::new(85), &available).unwrap();

        assert_eq!(breakdown.count_of(50), 1);
        assert_eq!(breakdown.count_of(25), 1);
        assert_eq!(breakdown.count_of(10), 1);
        assert_eq!(breakdown.coin_count(), 3);
    }

    #[test]
    fn test_greedy_infeasible_remainder() {
        let available = reserve(&[(10, 1), (5, 2)]);
        let err = GreedyChange.calculate(Money::new(12), &available).unwrap_err();
        assert_eq!(err.remaining, Money::new(2));
    }

    #[test]
    fn test_greedy_respects_counts() {
        let available = reserve(&[(50, 1), (25, 1)]);
        assert!(GreedyChange.calculate(Money::new(100), &available).is_err());

        let available = reserve(&[(25, 0)]);
        assert!(GreedyChange.calculate(Money::new(25), &available).is_err());
    }

    #[test]
    fn test_greedy_falls_short_where_solution_exists() {
        let available = reserve(&[(4, 1), (3, 2)]);
        assert!(GreedyChange.calculate(Money::new(6), &available).is_err());
    }

    #[test]
    fn test_zero_amount_is_empty_for_every_strategy() {
        let empty = CoinReserve::new();
        for kind in [ChangeStrategyKind::Greedy, ChangeStrategyKind::MinimalCoins] {
            let breakdown = kind.build().calculate(Money::zero(), &empty).unwrap();
            assert!(breakdown.is_empty());
        }
    }

    #[test]
    fn test_minimal_coins_finds_what_greedy_misses() {
        let available = reserve(&[(4, 1), (3, 2)]);
        let breakdown = MinimalCoinsChange::default()
            .calculate(Money::new(6), &available)
            .unwrap();
        assert_eq!(breakdown.count_of(3), 2);
        assert_eq!(breakdown.count_of(4), 0);

        let available = reserve(&[(25, 1), (10, 3)]);
        let breakdown = MinimalCoinsChange::default()
            .calculate(Money::new(30), &available)
            .unwrap();
        assert_eq!(breakdown.count_of(10), 3);
    }

    #[test]
    fn test_minimal_coins_prefers_fewer_coins() {
        let available = reserve(&[(25, 4), (10, 10), (5, 10)]);
        let breakdown = MinimalCoinsChange::default()
            .calculate(Money::new(50), &available)
            .unwrap();
        assert_eq!(breakdown.count_of(25), 2);
        assert_eq!(breakdown.coin_count(), 2);
    }

    #[test]
    fn test_minimal_coins_rejects_more_than_reserve() {
        let available = reserve(&[(100, 1)]);
        let err = MinimalCoinsChange::default()
            .calculate(Money::new(200), &available)
            .unwrap_err();
        assert_eq!(err.remaining, Money::new(200));
    }

    #[test]
    fn test_minimal_coins_falls_back_above_bound() {
        let strategy = MinimalCoinsChange { max_amount: 5 };
        let available = reserve(&[(4, 1), (3, 2)]);
        // 6 is above the bound, so greedy runs and misses
        assert!(strategy.calculate(Money::new(6), &available).is_err());
    }

    #[test]
    fn test_minimal_coins_large_stock_of_one_coin() {
        let strategy = MinimalCoinsChange::default();
        let available = reserve(&[(1, 100_000)]);

        let started = Instant::now();
        let breakdown = strategy
            .calculate(Money::new(100_000), &available)
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(breakdown.count_of(1), 100_000);
        assert_eq!(breakdown.total(), Money::new(100_000));
    }

    #[test]
    fn test_minimal_coins_combines_bundles_of_one_denomination() {
        // 11 usable quarters bundle as 1 + 2 + 4 + 4; 275 needs all of them
        let available = reserve(&[(25, 13), (10, 3)]);
        let breakdown = MinimalCoinsChange::default()
            .calculate(Money::new(275), &available)
            .unwrap();
        assert_eq!(breakdown.count_of(25), 11);
        assert_eq!(breakdown.count_of(10), 0);
    }

    #[test]
    fn test_minimal_coins_with_saturated_reserve_value() {
        let available = reserve(&[(u32::MAX, u32::MAX), (u32::MAX - 1, u32::MAX), (10, 2)]);
        let breakdown = MinimalCoinsChange::default()
            .calculate(Money::new(20), &available)
            .unwrap();
        assert_eq!(breakdown.count_of(10), 2);
    }

    #[test]
    fn test_strategy_kind_parsing() {
        assert_eq!("greedy".parse::<ChangeStrategyKind>().unwrap(), ChangeStrategyKind::Greedy);
        assert_eq!(
            " Minimal_Coins ".parse::<ChangeStrategyKind>().unwrap(),
            ChangeStrategyKind::MinimalCoins
        );
        assert!("random".parse::<ChangeStrategyKind>().is_err());
        assert_eq!(ChangeStrategyKind::MinimalCoins.to_string(), "minimal_coins");
        assert_eq!(ChangeStrategyKind::MinimalCoins.build().name(), "minimal_coins");
    }

    fn arb_reserve() -> impl Strategy<Value = CoinReserve> {
        prop::collection::btree_map(
            prop::sample::select(vec![1u32, 5, 10, 25, 50, 100, 500]),
            0u32..20,
            0..6,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        #[test]
        fn prop_breakdown_is_exact_and_within_stock(
            available in arb_reserve(),
            amount in 0i64..3_000,
        ) {
            for kind in [ChangeStrategyKind::Greedy, ChangeStrategyKind::MinimalCoins] {
                if let Ok(breakdown) = kind.build().calculate(Money::new(amount), &available) {
                    prop_assert_eq!(breakdown.total(), Money::new(amount));
                    for (denomination, count) in breakdown.iter_descending() {
                        prop_assert!(count <= available.get(&denomination).copied().unwrap_or(0));
                    }
                }
            }
        }

        #[test]
        fn prop_minimal_coins_never_worse_than_greedy(
            available in arb_reserve(),
            amount in 1i64..3_000,
        ) {
            let greedy = GreedyChange.calculate(Money::new(amount), &available);
            let minimal = MinimalCoinsChange::default().calculate(Money::new(amount), &available);
            if let Ok(greedy) = greedy {
                let minimal = minimal.expect("greedy found a solution, so one exists");
                prop_assert!(minimal.coin_count() <= greedy.coin_count());
            }
        }
    }
}
