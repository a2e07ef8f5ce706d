use crate::error::{Result, VendingError};
use rust_decimal::Decimal;
use serde::Serialize;

/// One physical unit of a sellable item.
///
/// Several units of the same item are several `Product` values with the same
/// name and price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Product {
    name: String,
    price: Decimal,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Decimal) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(VendingError::InvalidProduct(
                "Product name must not be empty".to_string(),
            ));
        }
        if price <= Decimal::ZERO {
            return Err(VendingError::InvalidProduct(format!(
                "Price of {name} must be positive"
            )));
        }
        Ok(Self { name, price })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }
}

impl TryFrom<(String, Decimal)> for Product {
    type Error = VendingError;

    fn try_from((name, price): (String, Decimal)) -> Result<Self> {
        Self::new(name, price)
    }
}

impl TryFrom<(&str, Decimal)> for Product {
    type Error = VendingError;

    fn try_from((name, price): (&str, Decimal)) -> Result<Self> {
        Self::new(name, price)
    }
}

/// Units of one product currently in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductListing {
    pub name: String,
    pub price: Decimal,
    pub quantity: usize,
}
