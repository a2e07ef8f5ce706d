//! Stock the machine is filled with at start-up and on every restock.

use crate::error::{Result, VendingError};
use crate::interfaces::csv::stock_reader::{StockReader, StockType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductStock {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinStock {
    pub value: Decimal,
    pub quantity: u32,
}

/// A restock batch of products and coins.
///
/// Values are kept raw; they are validated when loaded into a
/// [`Machine`](crate::domain::machine::Machine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub products: Vec<ProductStock>,
    pub coins: Vec<CoinStock>,
}

impl Default for Catalog {
    fn default() -> Self {
        let product = |name: &str, price, quantity| ProductStock {
            name: name.to_string(),
            price,
            quantity,
        };
        let coin = |value, quantity| CoinStock { value, quantity };

        Self {
            products: vec![
                product("snickers", dec!(0.60), 5),
                product("diet coke", dec!(0.55), 5),
                product("twix", dec!(0.65), 5),
                product("water", dec!(1.00), 5),
            ],
            coins: vec![
                coin(dec!(0.01), 20),
                coin(dec!(0.05), 10),
                coin(dec!(0.10), 10),
                coin(dec!(0.20), 10),
                coin(dec!(0.50), 5),
            ],
        }
    }
}

impl Catalog {
    /// Reads a catalog from a CSV stock file. A malformed row fails the whole
    /// read.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let mut catalog = Self {
            products: Vec::new(),
            coins: Vec::new(),
        };
        for record in StockReader::new(source).records() {
            let record = record?;
            match record.r#type {
                StockType::Product => {
                    let name = record.name.ok_or_else(|| {
                        VendingError::InvalidProduct("Stock row is missing a product name".to_string())
                    })?;
                    catalog.products.push(ProductStock {
                        name,
                        price: record.value,
                        quantity: record.quantity,
                    });
                }
                StockType::Coin => catalog.coins.push(CoinStock {
                    value: record.value,
                    quantity: record.quantity,
                }),
            }
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// One `(name, price)` pair per product unit.
    pub fn product_units(&self) -> Vec<(String, Decimal)> {
        self.products
            .iter()
            .flat_map(|stock| {
                std::iter::repeat_n((stock.name.clone(), stock.price), stock.quantity as usize)
            })
            .collect()
    }

    /// One value per coin.
    pub fn coin_units(&self) -> Vec<Decimal> {
        self.coins
            .iter()
            .flat_map(|stock| std::iter::repeat_n(stock.value, stock.quantity as usize))
            .collect()
    }
}
