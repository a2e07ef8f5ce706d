use crate::error::{Result, VendingError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum StockType {
    Product,
    Coin,
}

/// One row of a stock file: `quantity` units of a product priced `value`, or
/// `quantity` coins of face value `value`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct StockRecord {
    pub r#type: StockType,
    pub name: Option<String>,
    pub value: Decimal,
    pub quantity: u32,
}

/// Reads stock records from a CSV source.
///
/// Expects the header `type, name, value, quantity`. Whitespace around fields
/// is trimmed and coin rows may leave `name` empty.
pub struct StockReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> StockReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and deserializes the records.
    pub fn records(self) -> impl Iterator<Item = Result<StockRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(VendingError::from))
    }
}
