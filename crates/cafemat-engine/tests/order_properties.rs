//! Conservation properties over random baskets and payments.

use cafemat_core::{ChangeStrategyKind, Money, OrderBasket, Payment};
use cafemat_engine::VendingMachine;
use cafemat_store::{MachineStore, SeedData};
use proptest::prelude::*;

fn seeded_machine(kind: ChangeStrategyKind) -> VendingMachine {
    let store = MachineStore::new(SeedData::default().into_machine_data().unwrap());
    VendingMachine::new(store, kind.build())
}

fn arb_basket() -> impl Strategy<Value = OrderBasket> {
    prop::collection::btree_map(
        prop::sample::select(vec![
            "Americano".to_string(),
            "Cappuccino".to_string(),
            "Latte".to_string(),
            "Mocaccino".to_string(),
            "Chai".to_string(),
        ]),
        -2i64..20,
        0..4,
    )
}

fn arb_kind() -> impl Strategy<Value = ChangeStrategyKind> {
    prop_oneof![
        Just(ChangeStrategyKind::Greedy),
        Just(ChangeStrategyKind::MinimalCoins),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_failed_orders_change_nothing(
        kind in arb_kind(),
        basket in arb_basket(),
        tendered in 1i64..20_000,
    ) {
        let machine = seeded_machine(kind);
        let stock_before = machine.inventory().unwrap();
        let coins_before = machine.available_change().unwrap();

        let result = machine
            .place_order(&basket, &Payment::cash(Money::new(tendered)))
            .unwrap();

        if !result.success {
            prop_assert_eq!(machine.inventory().unwrap(), stock_before);
            prop_assert_eq!(machine.available_change().unwrap(), coins_before);
            prop_assert!(result.change_breakdown.is_none());
        }
    }

    #[test]
    fn prop_committed_orders_move_exactly_the_basket_and_change(
        kind in arb_kind(),
        basket in arb_basket(),
        tendered in 1i64..20_000,
    ) {
        let machine = seeded_machine(kind);
        let prices = machine.prices().unwrap();
        let stock_before = machine.inventory().unwrap();
        let coins_before = machine.available_change().unwrap();

        let result = machine
            .place_order(&basket, &Payment::cash(Money::new(tendered)))
            .unwrap();

        if result.success {
            let expected_total: Money = basket
                .iter()
                .map(|(item, &quantity)| prices[item] * quantity)
                .sum();
            prop_assert_eq!(result.total_cost, expected_total);
            prop_assert_eq!(result.change_amount, Money::new(tendered) - expected_total);

            let breakdown = result.change_breakdown.clone().unwrap();
            prop_assert_eq!(breakdown.total(), result.change_amount);

            let stock_after = machine.inventory().unwrap();
            for (item, before) in &stock_before {
                let ordered = basket.get(item).copied().unwrap_or(0);
                prop_assert_eq!(stock_after[item], before - ordered);
            }

            let coins_after = machine.available_change().unwrap();
            for (denomination, before) in &coins_before {
                prop_assert_eq!(
                    coins_after[denomination],
                    before - breakdown.count_of(*denomination)
                );
            }
        }
    }
}
