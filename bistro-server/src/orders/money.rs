//! Money calculation using rust_decimal
//!
//! Line totals are `quantity × price`, rounded half-up to 2 decimal places;
//! the order total is the sum of line totals.

use rust_decimal::prelude::*;
use shared::error::{AppError, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed quantity per item
pub const MAX_QUANTITY: i32 = 9999;

/// Largest dish price; `MAX_PRICE × MAX_QUANTITY` still fits `NUMERIC(12,2)`
pub const MAX_PRICE: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

/// Largest amount a `NUMERIC(12,2)` column holds
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Quantity must be positive and within bounds
pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity <= 0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("quantity must be positive, got {quantity}"),
        ));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"),
        ));
    }
    Ok(())
}

/// Price must be positive, carry at most 2 decimal places and stay within bounds
pub fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price <= Decimal::ZERO {
        return Err(AppError::new(ErrorCode::DishInvalidPrice));
    }
    if price.normalize().scale() > DECIMAL_PLACES {
        return Err(AppError::with_message(
            ErrorCode::DishInvalidPrice,
            format!("price must have at most {DECIMAL_PLACES} decimal places, got {price}"),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::DishInvalidPrice,
            format!("price exceeds maximum allowed ({MAX_PRICE}), got {price}"),
        ));
    }
    Ok(())
}

pub fn line_total(price: Decimal, quantity: i32) -> Decimal {
    round_money(price * Decimal::from(quantity))
}

pub fn order_total<I>(line_totals: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    round_money(line_totals.into_iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_line_total() {
        let price = Decimal::from_str("12.50").unwrap();
        assert_eq!(line_total(price, 2), Decimal::from_str("25.00").unwrap());
    }

    #[test]
    fn test_order_total_sums_lines() {
        let lines = [
            line_total(Decimal::from_str("0.10").unwrap(), 3),
            line_total(Decimal::from_str("0.20").unwrap(), 1),
        ];
        assert_eq!(order_total(lines), Decimal::from_str("0.50").unwrap());
    }

    #[test]
    fn test_price_scale_and_bounds() {
        assert!(validate_price(Decimal::from_str("12.50").unwrap()).is_ok());
        assert!(validate_price(Decimal::from_str("12.500").unwrap()).is_ok());
        assert!(validate_price(Decimal::from_str("0.125").unwrap()).is_err());
        assert!(validate_price(Decimal::ZERO).is_err());
        assert!(validate_price(MAX_PRICE).is_ok());
        assert!(validate_price(MAX_PRICE + Decimal::from_str("0.01").unwrap()).is_err());
    }

    #[test]
    fn test_max_line_fits_column() {
        assert_eq!(MAX_PRICE, Decimal::from_str("999999.99").unwrap());
        assert_eq!(MAX_AMOUNT, Decimal::from_str("9999999999.99").unwrap());
        assert!(line_total(MAX_PRICE, MAX_QUANTITY) <= MAX_AMOUNT);
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }
}
