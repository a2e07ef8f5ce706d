use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use vending_machine::domain::coin::{self, Coin, DENOMINATIONS};
use vending_machine::domain::machine::{Machine, MachineState, PurchaseOutcome};
use vending_machine::error::VendingError;

const NAMES: [&str; 4] = ["twix", "coke", "water", "gum"];

fn assert_state_invariant(machine: &Machine) {
    match machine.state() {
        MachineState::SelectingProduct => {
            assert!(machine.selected_product().is_none());
            assert!(machine.customer_coins().is_empty());
        }
        MachineState::AddingCoins => {
            let product = machine.selected_product().expect("selection while adding coins");
            assert!(machine.customer_coins_value() < product.price());
        }
        MachineState::ReadyToPurchase => {
            let product = machine.selected_product().expect("selection while ready");
            assert!(machine.customer_coins_value() >= product.price());
        }
    }
}

#[test]
fn test_random_sessions_never_lose_money() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let products: Vec<(&str, Decimal)> = (0..rng.gen_range(1..6))
            .map(|_| {
                let name = NAMES[rng.gen_range(0..3)];
                (name, Decimal::new(rng.gen_range(5..=250), 2))
            })
            .collect();
        let coins: Vec<Decimal> = (0..rng.gen_range(0..12))
            .map(|_| DENOMINATIONS[rng.gen_range(0..DENOMINATIONS.len())])
            .collect();
        let mut machine = Machine::new(products, coins).unwrap();

        // Money held by the machine plus money handed to customers, minus
        // money customers put in, must stay constant; same for product units.
        let mut inserted = Decimal::ZERO;
        let mut handed_out = Decimal::ZERO;
        let mut sold = Decimal::ZERO;
        let mut dispensed = 0;
        let opening_coins = machine.coins_value();
        let opening_units = machine.products().len();

        for _ in 0..60 {
            match rng.gen_range(0..10) {
                0..=1 => {
                    machine.select_product(NAMES[rng.gen_range(0..NAMES.len())]);
                }
                2..=6 => {
                    let value = DENOMINATIONS[rng.gen_range(0..DENOMINATIONS.len())];
                    let before = machine.customer_coins().len();
                    match machine.add_coin(value) {
                        Ok(()) => inserted += value,
                        Err(VendingError::InvalidStateForCoin(_)) => {
                            assert_eq!(machine.customer_coins().len(), before)
                        }
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
                7..=8 => {
                    let price = machine.selected_product().map(|p| p.price());
                    match machine.purchase() {
                        Ok(PurchaseOutcome::Dispensed { change, .. }) => {
                            handed_out += coin::total(&change);
                            sold += price.unwrap_or_default();
                            dispensed += 1;
                        }
                        Ok(PurchaseOutcome::CannotMakeChange { refund }) => {
                            handed_out += coin::total(&refund);
                        }
                        Ok(PurchaseOutcome::InsufficientFunds { remaining }) => {
                            assert!(remaining > Decimal::ZERO);
                            assert_eq!(machine.state(), MachineState::AddingCoins);
                        }
                        Err(VendingError::NoProductSelected) => {
                            assert_eq!(machine.state(), MachineState::SelectingProduct)
                        }
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
                _ => {
                    handed_out += coin::total(&machine.cancel());
                }
            }

            assert_state_invariant(&machine);
            assert_eq!(
                machine.coins_value() + machine.customer_coins_value() + handed_out,
                opening_coins + inserted
            );
            assert_eq!(machine.products().len() + dispensed, opening_units);
            assert_eq!(machine.coins_value(), opening_coins + sold);
        }
    }
}

#[test]
fn test_change_is_made_from_accepted_coins_only() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let pool: Vec<Coin> = (0..rng.gen_range(0..20))
            .map(|_| Coin::new(DENOMINATIONS[rng.gen_range(0..DENOMINATIONS.len())]).unwrap())
            .collect();
        let target = Decimal::new(rng.gen_range(0..=400), 2);

        if let Some(split) = vending_machine::domain::change::make_change(pool.clone(), target) {
            assert_eq!(coin::total(&split.change), target);
            assert_eq!(split.change.len() + split.retained.len(), pool.len());
            assert!(split.change.windows(2).all(|pair| pair[0] >= pair[1]));
        }
    }
}
