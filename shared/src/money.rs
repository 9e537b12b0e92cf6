//! Money calculation utilities using rust_decimal for precision
//!
//! All money is carried as `Decimal`. Values coming from JSON are decoded
//! through their textual form so that `1.005` stays `1.005` instead of the
//! nearest binary float.

use rust_decimal::prelude::*;
use serde_json::Value;

/// Currency precision (cents)
pub const DECIMAL_PLACES: u32 = 2;

/// Largest accepted unit price (1,000,000)
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Largest accepted absolute sale total (10,000,000,000)
pub const MAX_SALE_TOTAL: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Largest accepted quantity of one drink in a sale
pub const MAX_QUANTITY: i64 = 9999;

/// Convert f64 to Decimal. NaN and infinities become zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to cents, half away from zero (`0.005` → `0.01`, `-0.005` → `-0.01`)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Decode a JSON money value.
///
/// Accepts numbers and numeric strings. Returns `None` for anything else,
/// including non-finite floats.
pub fn parse_money(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        _ => None,
    }
}
