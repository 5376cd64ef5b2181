//! Number formatting for quote cells.

use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder for values the quote source did not provide.
pub const MISSING: &str = "--";

fn cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a money amount as `$X.XX`, or `-$X.XX` when negative.
pub fn format_cash(value: Decimal) -> String {
    let amount = cents(value.abs());
    if value.is_sign_negative() && !value.is_zero() {
        format!("-${:.2}", amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// Format a percentage as `X.XX%` with no forced sign.
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.2}%", cents(value))
}

/// Apply `format` to a value, or show [`MISSING`].
pub fn or_missing(value: Option<Decimal>, format: fn(Decimal) -> String) -> String {
    value.map(format).unwrap_or_else(|| MISSING.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_cash() {
        assert_eq!(format_cash(dec!(-1.5)), "-$1.50");
        assert_eq!(format_cash(dec!(1.5)), "$1.50");
        assert_eq!(format_cash(dec!(0)), "$0.00");
        assert_eq!(format_cash(dec!(1234.567)), "$1234.57");
        assert_eq!(format_cash(dec!(-0.005)), "-$0.01");
        assert_eq!(format_cash(dec!(-0.00)), "$0.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec!(3.456)), "3.46%");
        assert_eq!(format_percentage(dec!(-0.5)), "-0.50%");
        assert_eq!(format_percentage(dec!(12)), "12.00%");
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(or_missing(None, format_cash), "--");
        assert_eq!(or_missing(Some(dec!(2)), format_cash), "$2.00");
        assert_eq!(or_missing(None, format_percentage), "--");
    }
}
