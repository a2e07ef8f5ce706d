//! Change-making over a finite coin pool.
//!
//! The policy is a single greedy pass: walk the pool from the largest coin
//! to the smallest, take every coin that still fits the outstanding amount,
//! and never revisit a decision. With a limited supply of coins this can miss
//! a combination that exists (pool `[0.50, 0.20, 0.20, 0.20]` cannot return
//! `0.60`), and callers rely on exactly that behaviour.

use super::coin::Coin;
use rust_decimal::Decimal;

/// A pool of coins partitioned into the change handed out and the coins kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeSplit {
    pub change: Vec<Coin>,
    pub retained: Vec<Coin>,
}

/// Picks coins from `pool` summing exactly to `target`.
///
/// Returns `None` when the greedy pass cannot reach `target` exactly, or when
/// `target` is negative. Both halves of the split are ordered largest first.
pub fn make_change(pool: impl IntoIterator<Item = Coin>, target: Decimal) -> Option<ChangeSplit> {
    if target < Decimal::ZERO {
        return None;
    }

    let mut pool: Vec<Coin> = pool.into_iter().collect();
    pool.sort_by(|a, b| b.cmp(a));

    let mut remaining = target;
    let mut split = ChangeSplit {
        change: Vec::new(),
        retained: Vec::with_capacity(pool.len()),
    };
    for coin in pool {
        if remaining >= coin.value() {
            remaining -= coin.value();
            split.change.push(coin);
        } else {
            split.retained.push(coin);
        }
    }

    remaining.is_zero().then_some(split)
}
