use crate::error::{Result, VendingError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Face values the coin mechanism accepts, smallest first.
pub const DENOMINATIONS: [Decimal; 8] = [
    dec!(0.01),
    dec!(0.02),
    dec!(0.05),
    dec!(0.10),
    dec!(0.20),
    dec!(0.50),
    dec!(1.00),
    dec!(2.00),
];

/// A single coin of an accepted denomination.
///
/// Coins carry no identity: two coins of the same face value are equal. The
/// stored value is always the canonical entry from [`DENOMINATIONS`], so
/// `Coin::new(dec!(0.5))` and `Coin::new(dec!(0.50))` produce the same coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Coin(Decimal);

impl Coin {
    pub fn new(value: Decimal) -> Result<Self> {
        DENOMINATIONS
            .iter()
            .find(|denomination| **denomination == value)
            .map(|denomination| Self(*denomination))
            .ok_or(VendingError::InvalidDenomination(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// One coin of every accepted denomination, smallest first.
    pub fn denominations() -> impl Iterator<Item = Coin> {
        DENOMINATIONS.into_iter().map(Self)
    }
}

impl TryFrom<Decimal> for Coin {
    type Error = VendingError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Coin> for Decimal {
    fn from(coin: Coin) -> Self {
        coin.0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Exact sum of a collection of coins.
pub fn total<'a>(coins: impl IntoIterator<Item = &'a Coin>) -> Decimal {
    coins.into_iter().map(Coin::value).sum()
}
