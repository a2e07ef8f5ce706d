use super::change::make_change;
use super::coin::{self, Coin};
use super::product::{Product, ProductListing};
use crate::error::{Result, VendingError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineState {
    #[default]
    SelectingProduct,
    AddingCoins,
    ReadyToPurchase,
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SelectingProduct => "selecting a product",
            Self::AddingCoins => "adding coins",
            Self::ReadyToPurchase => "ready to purchase",
        })
    }
}

/// How a purchase attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The product was handed out together with `change`.
    Dispensed { product: Product, change: Vec<Coin> },
    /// The customer still owes `remaining`; the session is kept.
    InsufficientFunds { remaining: Decimal },
    /// Exact change could not be made. The sale is voided and the inserted
    /// coins are handed back in `refund`.
    CannotMakeChange { refund: Vec<Coin> },
}

/// The transactional core of the vending machine.
///
/// Owns the machine inventory (products and the coin reserve) and the session
/// of the customer currently at the machine. A session is opened by
/// [`Machine::select_product`], grows with [`Machine::add_coin`] and is
/// settled by [`Machine::purchase`] or voided by [`Machine::cancel`].
///
/// Every operation is all-or-nothing: an `Err` leaves the machine untouched.
#[derive(Debug, Clone, Default)]
pub struct Machine {
    products: Vec<Product>,
    coins: Vec<Coin>,
    customer_coins: Vec<Coin>,
    selected_product: Option<Product>,
    state: MachineState,
}

impl Machine {
    /// Creates a machine stocked with `products` and `coins`.
    ///
    /// Accepts validated values or raw ones (`(name, price)` pairs, decimal
    /// coin values); the first invalid element fails construction with
    /// `InvalidProducts`/`InvalidCoins`.
    pub fn new<P, C>(
        products: impl IntoIterator<Item = P>,
        coins: impl IntoIterator<Item = C>,
    ) -> Result<Self>
    where
        P: TryInto<Product>,
        P::Error: Into<VendingError>,
        C: TryInto<Coin>,
        C::Error: Into<VendingError>,
    {
        let mut machine = Self::default();
        machine.load_products(products)?;
        machine.load_coins(coins)?;
        Ok(machine)
    }

    /// Adds units to the product inventory. Nothing is loaded unless every
    /// element is a valid product.
    pub fn load_products<P>(&mut self, products: impl IntoIterator<Item = P>) -> Result<()>
    where
        P: TryInto<Product>,
        P::Error: Into<VendingError>,
    {
        let products = products
            .into_iter()
            .enumerate()
            .map(|(index, product)| {
                product.try_into().map_err(|e| VendingError::InvalidProducts {
                    index,
                    reason: Into::<VendingError>::into(e).to_string(),
                })
            })
            .collect::<Result<Vec<Product>>>()?;

        tracing::info!(units = products.len(), "products loaded");
        self.products.extend(products);
        Ok(())
    }

    /// Adds coins to the change reserve. Nothing is loaded unless every
    /// element is a valid coin.
    pub fn load_coins<C>(&mut self, coins: impl IntoIterator<Item = C>) -> Result<()>
    where
        C: TryInto<Coin>,
        C::Error: Into<VendingError>,
    {
        let coins = coins
            .into_iter()
            .enumerate()
            .map(|(index, coin)| {
                coin.try_into().map_err(|e| VendingError::InvalidCoins {
                    index,
                    reason: Into::<VendingError>::into(e).to_string(),
                })
            })
            .collect::<Result<Vec<Coin>>>()?;

        tracing::info!(coins = coins.len(), value = %coin::total(&coins), "coins loaded");
        self.coins.extend(coins);
        Ok(())
    }

    /// Opens a session for the product called `name`.
    ///
    /// Returns `false` without touching anything when no unit with that name
    /// is in stock, or when a session is already open.
    pub fn select_product(&mut self, name: &str) -> bool {
        if self.state != MachineState::SelectingProduct {
            tracing::debug!(name, state = %self.state, "selection ignored");
            return false;
        }
        let Some(product) = self.products.iter().find(|p| p.name() == name) else {
            tracing::debug!(name, "selected product not in stock");
            return false;
        };

        tracing::debug!(name, price = %product.price(), "product selected");
        self.selected_product = Some(product.clone());
        self.refresh_state();
        true
    }

    /// Inserts a coin into the current session.
    pub fn add_coin<C>(&mut self, coin: C) -> Result<()>
    where
        C: TryInto<Coin>,
        C::Error: Into<VendingError>,
    {
        let coin = coin
            .try_into()
            .map_err(|e| VendingError::InvalidCoinType(Into::<VendingError>::into(e).to_string()))?;
        if self.state != MachineState::AddingCoins {
            return Err(VendingError::InvalidStateForCoin(self.state));
        }

        self.customer_coins.push(coin);
        self.refresh_state();
        tracing::debug!(coin = %coin, paid = %self.customer_coins_value(), state = %self.state, "coin added");
        Ok(())
    }

    /// Settles the current session.
    ///
    /// Change is made greedily from the machine's reserve pooled with the
    /// customer's coins. On success the product unit leaves the inventory and
    /// every pooled coin not handed back joins the reserve. When exact change
    /// is impossible the inventory is left as it was and the customer's coins
    /// are refunded. Both outcomes close the session; `InsufficientFunds`
    /// keeps it open.
    pub fn purchase(&mut self) -> Result<PurchaseOutcome> {
        let (name, price) = match &self.selected_product {
            Some(product) => (product.name().to_owned(), product.price()),
            None => return Err(VendingError::NoProductSelected),
        };

        let paid = self.customer_coins_value();
        if paid < price {
            return Ok(PurchaseOutcome::InsufficientFunds {
                remaining: price - paid,
            });
        }

        let unit = self
            .products
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| VendingError::ProductNotAvailable(name.clone()))?;

        let change_value = paid - price;
        let pool = self.coins.iter().chain(&self.customer_coins).copied();
        match make_change(pool, change_value) {
            Some(split) => {
                let product = self.products.remove(unit);
                self.coins = split.retained;
                self.reset_session();
                tracing::info!(product = %name, %paid, change = %change_value, "product dispensed");
                Ok(PurchaseOutcome::Dispensed {
                    product,
                    change: split.change,
                })
            }
            None => {
                let refund = std::mem::take(&mut self.customer_coins);
                self.reset_session();
                tracing::warn!(product = %name, %paid, change = %change_value, "cannot make change, sale voided");
                Ok(PurchaseOutcome::CannotMakeChange { refund })
            }
        }
    }

    /// Voids the current session and returns the coins the customer inserted.
    pub fn cancel(&mut self) -> Vec<Coin> {
        let refund = std::mem::take(&mut self.customer_coins);
        if self.selected_product.is_some() {
            tracing::debug!(refund = %coin::total(&refund), "session cancelled");
        }
        self.reset_session();
        refund
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn customer_coins(&self) -> &[Coin] {
        &self.customer_coins
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    pub fn coins_value(&self) -> Decimal {
        coin::total(&self.coins)
    }

    pub fn customer_coins_value(&self) -> Decimal {
        coin::total(&self.customer_coins)
    }

    /// What the customer still owes: `price - paid`, zero or negative once
    /// enough has been inserted, and zero when nothing is selected.
    pub fn remaining_customer_amount(&self) -> Decimal {
        self.selected_product
            .as_ref()
            .map_or(Decimal::ZERO, |p| p.price() - self.customer_coins_value())
    }

    /// Stock grouped by product name, alphabetically.
    pub fn product_listing(&self) -> Vec<ProductListing> {
        let mut grouped: BTreeMap<&str, ProductListing> = BTreeMap::new();
        for product in &self.products {
            grouped
                .entry(product.name())
                .or_insert_with(|| ProductListing {
                    name: product.name().to_owned(),
                    price: product.price(),
                    quantity: 0,
                })
                .quantity += 1;
        }
        grouped.into_values().collect()
    }

    fn refresh_state(&mut self) {
        self.state = match &self.selected_product {
            None => MachineState::SelectingProduct,
            Some(p) if self.customer_coins_value() >= p.price() => MachineState::ReadyToPurchase,
            Some(_) => MachineState::AddingCoins,
        };
    }

    fn reset_session(&mut self) {
        self.selected_product = None;
        self.customer_coins.clear();
        self.state = MachineState::SelectingProduct;
    }
}
