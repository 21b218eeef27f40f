//! # Seed Data
//!
//! The catalogue, stock levels and coin reserve a machine starts with.
//!
//! ## Config Shape
//! ```toml
//! [seed.items.Latte]
//! price = 1350
//! stock = 10
//!
//! [[seed.coins]]
//! denomination = 500
//! count = 20
//! ```
//!
//! Anything left out of the config falls back to the stock catalogue below.

use std::collections::BTreeMap;

use cafemat_core::validation::{
    validate_denomination, validate_item_name, validate_price, validate_stock_level,
};
use cafemat_core::{CoinCount, CoinReserve, Denomination, Money, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreResult;
use crate::store::MachineData;

/// One catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedItem {
    pub price: Money,
    pub stock: i64,
}

/// Coins of one denomination loaded into the reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCoin {
    pub denomination: Denomination,
    pub count: CoinCount,
}

/// Startup machine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default = "default_items")]
    pub items: BTreeMap<String, SeedItem>,

    #[serde(default = "default_coins")]
    pub coins: Vec<SeedCoin>,
}

fn default_items() -> BTreeMap<String, SeedItem> {
    [
        ("Americano", 950, 10),
        ("Cappuccino", 1200, 8),
        ("Latte", 1350, 10),
        ("Mocaccino", 1500, 15),
    ]
    .into_iter()
    .map(|(name, price, stock)| {
        (
            name.to_string(),
            SeedItem {
                price: Money::new(price),
                stock,
            },
        )
    })
    .collect()
}

fn default_coins() -> Vec<SeedCoin> {
    [(500, 20), (100, 30), (50, 50), (25, 25)]
        .into_iter()
        .map(|(denomination, count)| SeedCoin {
            denomination,
            count,
        })
        .collect()
}

impl Default for SeedData {
    fn default() -> Self {
        SeedData {
            items: default_items(),
            coins: default_coins(),
        }
    }
}

impl SeedData {
    /// Checks every item and coin entry.
    ///
    /// ## Rules
    /// - item names: non-empty, bounded length
    /// - prices and stock levels: non-negative
    /// - denominations: positive, each listed once
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, item) in &self.items {
            validate_item_name(name)?;
            validate_price(item.price)?;
            validate_stock_level(item.stock)?;
        }

        let mut seen = CoinReserve::new();
        for coin in &self.coins {
            validate_denomination(coin.denomination)?;
            if seen.insert(coin.denomination, coin.count).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "denomination".to_string(),
                    value: coin.denomination.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Validates and converts into machine state.
    pub fn into_machine_data(self) -> StoreResult<MachineData> {
        self.validate()?;

        let mut prices = BTreeMap::new();
        let mut stock = BTreeMap::new();
        for (name, item) in self.items {
            prices.insert(name.clone(), item.price);
            stock.insert(name, item.stock);
        }

        let coins: CoinReserve = self
            .coins
            .into_iter()
            .map(|coin| (coin.denomination, coin.count))
            .collect();

        info!(
            items = stock.len(),
            denominations = coins.len(),
            "Machine state seeded"
        );

        Ok(MachineData::new(prices, stock, coins))
    }
}
