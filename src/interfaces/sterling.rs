//! Sterling labels for the console: `"1p"` .. `"50p"`, `"£1"`, `"£2"`.

use crate::error::{Result, VendingError};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Labels of the accepted coins, smallest first.
pub const COIN_LABELS: [&str; 8] = ["1p", "2p", "5p", "10p", "20p", "50p", "£1", "£2"];

/// Renders an amount the way coins are labelled: pence below a pound,
/// pounds otherwise.
pub fn format(value: Decimal) -> String {
    if value < Decimal::ONE {
        format!("{}p", (value * Decimal::ONE_HUNDRED).normalize())
    } else if value.fract().is_zero() {
        format!("£{}", value.trunc())
    } else {
        format_balance(value)
    }
}

/// Renders an amount as pounds with two decimals, e.g. `£0.70`.
pub fn format_balance(value: Decimal) -> String {
    let mut pounds = value.round_dp(2);
    pounds.rescale(2);
    format!("£{pounds}")
}

/// Parses a label such as `"20p"`, `"£2"` or `"£1.50"` into an exact amount.
pub fn parse(label: &str) -> Result<Decimal> {
    let label = label.trim();
    let invalid = || VendingError::InvalidCurrency(label.to_string());

    if let Some(pence) = label.strip_suffix('p') {
        let pence = Decimal::from_str(pence).map_err(|_| invalid())?;
        Ok(pence / Decimal::ONE_HUNDRED)
    } else if let Some(pounds) = label.strip_prefix('£') {
        Decimal::from_str(pounds).map_err(|_| invalid())
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::Coin;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format() {
        assert_eq!(format(dec!(0.2)), "20p");
        assert_eq!(format(dec!(0.05)), "5p");
        assert_eq!(format(dec!(2)), "£2");
        assert_eq!(format(dec!(1.00)), "£1");
        assert_eq!(format(dec!(1.5)), "£1.50");
    }

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance(dec!(0.7)), "£0.70");
        assert_eq!(format_balance(Decimal::ZERO), "£0.00");
        assert_eq!(format_balance(dec!(12.345)), "£12.34");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("20p").unwrap(), dec!(0.20));
        assert_eq!(parse("£2").unwrap(), dec!(2));
        assert_eq!(parse(" £1.50 ").unwrap(), dec!(1.50));
        assert!(matches!(parse("20"), Err(VendingError::InvalidCurrency(_))));
        assert!(matches!(parse("£"), Err(VendingError::InvalidCurrency(_))));
        assert!(matches!(parse("xp"), Err(VendingError::InvalidCurrency(_))));
    }

    #[test]
    fn test_labels_match_denominations() {
        let parsed: Vec<Coin> = COIN_LABELS
            .iter()
            .map(|label| Coin::new(parse(label).unwrap()).unwrap())
            .collect();
        assert_eq!(parsed, Coin::denominations().collect::<Vec<_>>());
    }
}
