//! Money calculation utilities using rust_decimal for precision
//!
//! Prices are stored as `f64`; all arithmetic happens in `Decimal` and is
//! rounded back to 2 decimal places (half away from zero).

use rust_decimal::prelude::*;
use shared::error::{AppError, ErrorCode};

const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line item
pub const MAX_QUANTITY: i64 = 100_000;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Unit price times quantity
pub fn line_total(price: f64, quantity: i64) -> Decimal {
    to_decimal(price) * Decimal::from(quantity)
}

/// Two prices agree when they differ by at most 0.01
pub fn prices_match(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() <= MONEY_TOLERANCE
}

/// Render an amount with exactly two decimals
pub fn format_money(value: f64) -> String {
    format!(
        "{:.2}",
        to_decimal(value).round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Price must be finite, non-negative and below the ceiling
pub fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("price must be a non-negative number, got {price}"),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("price exceeds maximum allowed ({MAX_PRICE}), got {price}"),
        ));
    }
    Ok(())
}

/// Stock level must be non-negative
pub fn validate_stock(quantity: i64) -> Result<(), AppError> {
    if quantity < 0 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidQuantity,
            format!("quantity must be non-negative, got {quantity}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_is_exact() {
        // 0.1 * 3 drifts in f64
        assert_eq!(to_f64(line_total(0.1, 3)), 0.3);
        assert_eq!(to_f64(line_total(95.0, 10)), 950.0);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::new(12345, 3)), 12.35);
        assert_eq!(to_f64(Decimal::new(-12345, 3)), -12.35);
    }

    #[test]
    fn test_prices_match_tolerance() {
        assert!(prices_match(95.0, 95.0));
        assert!(prices_match(95.0, 95.01));
        assert!(!prices_match(95.0, 95.02));
        assert!(!prices_match(95.0, 90.0));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(950.0), "950.00");
        assert_eq!(format_money(12.345), "12.35");
    }

    #[test]
    fn test_validation() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(2_000_000.0).is_err());
        assert!(validate_stock(0).is_ok());
        assert_eq!(
            validate_stock(-5).unwrap_err().code,
            ErrorCode::ProductInvalidQuantity
        );
    }
}
