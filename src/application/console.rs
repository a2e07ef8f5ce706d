use crate::config::Catalog;
use crate::domain::coin::{self, Coin};
use crate::domain::machine::{Machine, MachineState, PurchaseOutcome};
use crate::error::{Result, VendingError};
use crate::interfaces::sterling;
use rust_decimal::Decimal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

const SEPARATOR: &str = "=====================================================================";

/// Line-oriented customer console in front of a [`Machine`].
///
/// The console owns no business state: it reads one command per line, turns it
/// into a machine operation, and renders the result. It stops on `exit` or at
/// the end of input.
pub struct Console<R, W> {
    input: Lines<R>,
    output: W,
    machine: Machine,
    catalog: Catalog,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a console driving `machine`. `catalog` is the batch used by the
    /// `load_products` and `load_coins` commands.
    pub fn new(input: R, output: W, machine: Machine, catalog: Catalog) -> Self {
        Self {
            input: input.lines(),
            output,
            machine,
            catalog,
        }
    }

    /// Consumes the console and hands back the machine and the output sink.
    pub fn into_parts(self) -> (Machine, W) {
        (self.machine, self.output)
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.prompt().await?;

            // A funded session is settled without waiting for input.
            let command = if self.machine.state() == MachineState::ReadyToPurchase {
                String::new()
            } else {
                match self.input.next_line().await? {
                    Some(line) => line.trim().to_string(),
                    None => break,
                }
            };
            if command == "exit" {
                break;
            }

            self.say(SEPARATOR).await?;
            match command.as_str() {
                "load_products" => self.restock_products().await?,
                "load_coins" | "load_change" => self.restock_coins().await?,
                "cancel" => self.cancel().await?,
                "?" => self.help().await?,
                _ => self.run_command(&command).await?,
            }
            self.say(SEPARATOR).await?;
            self.output.flush().await?;
        }

        self.output.flush().await?;
        Ok(())
    }

    async fn run_command(&mut self, command: &str) -> Result<()> {
        match self.machine.state() {
            MachineState::SelectingProduct => self.select(command).await,
            MachineState::AddingCoins => self.insert(command).await,
            MachineState::ReadyToPurchase => self.purchase().await,
        }
    }

    async fn select(&mut self, command: &str) -> Result<()> {
        // Accept either a listing number or the product name itself.
        let name = match command.parse::<usize>() {
            Ok(position) => position
                .checked_sub(1)
                .and_then(|index| self.machine.product_listing().into_iter().nth(index))
                .map(|listing| listing.name)
                .unwrap_or_default(),
            Err(_) => command.to_string(),
        };

        if self.machine.select_product(&name) {
            self.say("Product Selected!").await
        } else {
            self.say("The product that you selected does not exist.").await
        }
    }

    async fn insert(&mut self, command: &str) -> Result<()> {
        let value = match command.parse::<usize>() {
            Ok(position) => position
                .checked_sub(1)
                .and_then(|index| Coin::denominations().nth(index))
                .map(Decimal::from),
            Err(_) => sterling::parse(command).ok(),
        };

        let Some(value) = value else {
            return self.reject_coin().await;
        };
        match self.machine.add_coin(value) {
            Ok(()) => {
                self.say(&format!("Coin of value {} was added!", sterling::format(value)))
                    .await
            }
            Err(VendingError::InvalidCoinType(_)) => self.reject_coin().await,
            Err(e) => Err(e),
        }
    }

    async fn reject_coin(&mut self) -> Result<()> {
        self.say("Please enter a valid coin based on the instructions below.")
            .await
    }

    async fn purchase(&mut self) -> Result<()> {
        self.say("Getting the product for you..").await?;
        match self.machine.purchase()? {
            PurchaseOutcome::Dispensed { product, change } => {
                self.say(&format!(
                    "You got the product {}. And your change in coins are:",
                    product.name()
                ))
                .await?;
                for coin in &change {
                    self.say(&sterling::format(coin.value())).await?;
                }
                self.say(&format!(
                    "The value of which is {}",
                    sterling::format_balance(coin::total(&change))
                ))
                .await
            }
            PurchaseOutcome::InsufficientFunds { remaining } => {
                self.say("Insufficient funds").await?;
                self.say(&format!(
                    "Please provide {} more",
                    sterling::format_balance(remaining)
                ))
                .await
            }
            PurchaseOutcome::CannotMakeChange { refund } => {
                self.say("Cannot provide correct change").await?;
                self.say(&format!(
                    "Coins of value {} were returned to you.",
                    sterling::format_balance(coin::total(&refund))
                ))
                .await
            }
        }
    }

    async fn cancel(&mut self) -> Result<()> {
        let refund = self.machine.cancel();
        self.say(&format!(
            "Transaction cancelled. Coins of value {} were returned to you.",
            sterling::format_balance(coin::total(&refund))
        ))
        .await
    }

    async fn restock_products(&mut self) -> Result<()> {
        self.say("Restocking with products..").await?;
        self.machine.load_products(self.catalog.product_units())?;
        self.say("done").await
    }

    async fn restock_coins(&mut self) -> Result<()> {
        self.say("Restocking with change..").await?;
        self.machine.load_coins(self.catalog.coin_units())?;
        self.say("done").await
    }

    async fn prompt(&mut self) -> Result<()> {
        match self.machine.state() {
            MachineState::SelectingProduct => {
                self.say("Welcome to the Vending Machine. type '?' for help and available commands or 'exit' to terminate program at any time.")
                    .await?;
                self.say("Please select one of the products from the list below by writing the number which is next to it.")
                    .await?;
                let listing = self.machine.product_listing();
                for (position, item) in listing.iter().enumerate() {
                    self.say(&format!(
                        "{}. {}, price: {}, quantity: {}",
                        position + 1,
                        item.name,
                        sterling::format_balance(item.price),
                        item.quantity
                    ))
                    .await?;
                }
            }
            MachineState::AddingCoins => {
                self.say("Please add one of the following coins. Select the number next to the desired coin, e.g. 2.")
                    .await?;
                for (position, label) in sterling::COIN_LABELS.iter().enumerate() {
                    self.say(&format!("{}. {label}", position + 1)).await?;
                }
                let product = self
                    .machine
                    .selected_product()
                    .map(|p| p.name().to_string())
                    .unwrap_or_default();
                self.say(&format!(
                    "Your current balance is {}. The remaining amount to buy a {product} is {}.",
                    sterling::format_balance(self.machine.customer_coins_value()),
                    sterling::format_balance(self.machine.remaining_customer_amount())
                ))
                .await?;
            }
            MachineState::ReadyToPurchase => {}
        }
        Ok(())
    }

    async fn help(&mut self) -> Result<()> {
        for line in [
            "exit - Terminates the program",
            "load_products - Adds extra stock to the vending machine with the default quantity of products.",
            "load_coins - Adds extra change to the vending machine with the default coins.",
            "cancel - Cancels the current selection and returns the inserted coins.",
            "? - help",
            "There are more available commands based on the state of the vending machine(Instructions will be given).",
        ] {
            self.say(line).await?;
        }
        Ok(())
    }

    async fn say(&mut self, line: &str) -> Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        Ok(())
    }
}
