use crate::domain::machine::MachineState;
use rust_decimal::Decimal;
use std::convert::Infallible;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendingError {
    #[error("{0} is not an accepted coin denomination")]
    InvalidDenomination(Decimal),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Invalid coin: {0}")]
    InvalidCoinType(String),
    #[error("Coins cannot be added while the machine is {0}")]
    InvalidStateForCoin(MachineState),
    #[error("No product has been selected")]
    NoProductSelected,
    #[error("Product {0} is no longer available")]
    ProductNotAvailable(String),
    #[error("Invalid product at position {index}: {reason}")]
    InvalidProducts { index: usize, reason: String },
    #[error("Invalid coin at position {index}: {reason}")]
    InvalidCoins { index: usize, reason: String },
    #[error("Invalid currency amount: {0}")]
    InvalidCurrency(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Lets already-validated coins and products flow through the `TryInto` bounds.
impl From<Infallible> for VendingError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

pub type Result<T> = std::result::Result<T, VendingError>;
