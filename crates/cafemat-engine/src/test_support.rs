//! Fixtures shared by the engine's unit tests.

use std::cell::Cell;

use cafemat_core::{CoinReserve, ItemCatalog, ItemStock, Money, OrderBasket};
use cafemat_store::{MachineData, MachineRepository, StoreResult};

pub(crate) fn basket(lines: &[(&str, i64)]) -> OrderBasket {
    lines
        .iter()
        .map(|&(item, quantity)| (item.to_string(), quantity))
        .collect()
}

/// Espresso 50, Latte 75, Cappuccino 70; ten of each; a mixed coin reserve.
pub(crate) fn sample_data() -> MachineData {
    MachineData::new(
        [("Espresso", 50), ("Latte", 75), ("Cappuccino", 70)]
            .into_iter()
            .map(|(item, price)| (item.to_string(), Money::new(price)))
            .collect(),
        [("Espresso", 10), ("Latte", 10), ("Cappuccino", 10)]
            .into_iter()
            .map(|(item, stock)| (item.to_string(), stock))
            .collect(),
        [(100, 5), (50, 5), (25, 5), (10, 5), (5, 5)]
            .into_iter()
            .collect(),
    )
}

/// Repository wrapper that counts every access.
#[derive(Debug, Default)]
pub(crate) struct CountingRepository {
    pub inner: MachineData,
    pub reads: Cell<usize>,
    pub stock_writes: usize,
    pub coin_writes: usize,
}

impl CountingRepository {
    pub fn new(inner: MachineData) -> Self {
        CountingRepository {
            inner,
            ..Default::default()
        }
    }

    pub fn touches(&self) -> usize {
        self.reads.get() + self.stock_writes + self.coin_writes
    }
}

impl MachineRepository for CountingRepository {
    fn item_stock(&self) -> &ItemStock {
        self.reads.set(self.reads.get() + 1);
        self.inner.item_stock()
    }

    fn item_prices(&self) -> &ItemCatalog {
        self.reads.set(self.reads.get() + 1);
        self.inner.item_prices()
    }

    fn coin_reserve(&self) -> &CoinReserve {
        self.reads.set(self.reads.get() + 1);
        self.inner.coin_reserve()
    }

    fn set_item_stock(&mut self, item: &str, quantity: i64) -> StoreResult<()> {
        self.stock_writes += 1;
        self.inner.set_item_stock(item, quantity)
    }

    fn replace_coin_reserve(&mut self, reserve: &CoinReserve) {
        self.coin_writes += 1;
        self.inner.replace_coin_reserve(reserve);
    }
}
