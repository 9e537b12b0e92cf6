//! Checkout pricing
//!
//! Requested lines are priced against the current menu on the server; the
//! client never supplies prices.

use std::collections::HashMap;

use shared::models::{CheckoutRequest, MenuItem, normalize_drink_key};
use shared::money::MAX_QUANTITY;
use shared::{AppError, AppResult, ErrorCode};

use super::Cart;

/// Resolve every requested line against the menu and fill a cart.
///
/// Duplicate menu names take the price of the last entry. Requested lines
/// naming the same drink are merged and the merged quantity is held to
/// [`MAX_QUANTITY`].
pub fn price_checkout(request: &CheckoutRequest, menu: &[MenuItem]) -> AppResult<Cart> {
    if request.lines.is_empty() {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }

    let mut by_name: HashMap<String, MenuItem> = HashMap::new();
    for item in menu {
        by_name
            .entry(item.normalized_name())
            .and_modify(|existing| existing.unit_price = item.unit_price)
            .or_insert_with(|| item.clone());
    }

    let mut cart = Cart::new();
    for line in &request.lines {
        if !(1..=MAX_QUANTITY).contains(&line.quantity) {
            return Err(AppError::new(ErrorCode::InvalidQuantity)
                .with_detail("drink_name", line.drink_name.clone())
                .with_detail("quantity", line.quantity));
        }
        let item = by_name
            .get(&normalize_drink_key(&line.drink_name))
            .ok_or_else(|| {
                AppError::new(ErrorCode::DrinkNotFound)
                    .with_detail("drink_name", line.drink_name.clone())
            })?;
        cart.add_quantity(item, line.quantity)?;
    }

    Ok(cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::CheckoutLine;

    fn menu() -> Vec<MenuItem> {
        vec![
            MenuItem::new("Milk Tea", Decimal::new(450, 2)),
            MenuItem::new("Latte", Decimal::new(375, 2)),
            MenuItem::new("latte", Decimal::new(400, 2)),
        ]
    }

    fn request(lines: &[(&str, i64)]) -> CheckoutRequest {
        CheckoutRequest {
            lines: lines
                .iter()
                .map(|(n, q)| CheckoutLine {
                    drink_name: n.to_string(),
                    quantity: *q,
                })
                .collect(),
        }
    }

    #[test]
    fn test_prices_from_menu() {
        let cart = price_checkout(&request(&[("milk tea", 2), ("LATTE", 1)]), &menu()).unwrap();
        assert_eq!(cart.lines()[0].drink_name, "Milk Tea");
        assert_eq!(cart.lines()[1].drink_name, "Latte");
        assert_eq!(cart.lines()[1].unit_price, Decimal::new(400, 2));
        assert_eq!(cart.total(), Decimal::new(1300, 2));
    }

    #[test]
    fn test_repeated_lines_merge() {
        let cart = price_checkout(&request(&[("Latte", 1), ("latte", 2)]), &menu()).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_rejections() {
        let err = price_checkout(&request(&[]), &menu()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartEmpty);

        let err = price_checkout(&request(&[("Latte", 0)]), &menu()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);

        let err = price_checkout(&request(&[("Espresso", 1)]), &menu()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DrinkNotFound);
    }

    #[test]
    fn test_oversized_quantities() {
        let err = price_checkout(&request(&[("Latte", i64::MAX), ("latte", 1)]), &menu()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);

        let err = price_checkout(&request(&[("Latte", MAX_QUANTITY + 1)]), &menu()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);

        let err = price_checkout(&request(&[("Latte", MAX_QUANTITY), (" LATTE ", 1)]), &menu())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);

        let cart = price_checkout(&request(&[("Latte", MAX_QUANTITY)]), &menu()).unwrap();
        assert_eq!(cart.lines()[0].quantity, MAX_QUANTITY);
        assert!(cart.total() > Decimal::ZERO);
    }
}
