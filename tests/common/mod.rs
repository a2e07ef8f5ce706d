use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes a stock file with the given product and coin rows.
pub fn write_stock(
    path: &Path,
    products: &[(&str, &str, u32)],
    coins: &[(&str, u32)],
) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["type", "name", "value", "quantity"])?;
    for (name, price, quantity) in products {
        wtr.write_record(["product", *name, *price, quantity.to_string().as_str()])?;
    }
    for (value, quantity) in coins {
        wtr.write_record(["coin", "", *value, quantity.to_string().as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}
