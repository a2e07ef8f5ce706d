use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tokio::io::{self, BufReader};
use vending_machine::application::console::Console;
use vending_machine::config::Catalog;
use vending_machine::domain::machine::Machine;
use vending_machine::telemetry;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV stock file (`type, name, value, quantity`). Uses the built-in catalog if omitted.
    #[arg(long)]
    stock: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set. Logs go to stderr.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level);

    let catalog = match cli.stock {
        Some(path) => Catalog::from_path(path).into_diagnostic()?,
        None => Catalog::default(),
    };
    let machine = Machine::new(catalog.product_units(), catalog.coin_units()).into_diagnostic()?;
    tracing::info!(
        products = machine.products().len(),
        coins = %machine.coins_value(),
        "vending machine ready"
    );

    let mut console = Console::new(BufReader::new(io::stdin()), io::stdout(), machine, catalog);
    console.run().await.into_diagnostic()?;

    Ok(())
}
