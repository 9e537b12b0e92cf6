//! Menu Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::money;

/// Sellable drink on the menu
///
/// `name` is the business key. Matching against sale line items is done on
/// [`normalized_name`](MenuItem::normalized_name), never on the raw string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    /// Unit price, 2-decimal currency precision
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            unit_price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Case- and whitespace-insensitive matching key
    pub fn normalized_name(&self) -> String {
        normalize_drink_key(&self.name)
    }
}

/// Matching key for drink names: trimmed and lowercased
pub fn normalize_drink_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Add drink payload (admin form)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl MenuItemCreate {
    /// Validate the form and produce the item to insert.
    ///
    /// Name and description must be non-blank after trimming and the price
    /// must be a finite positive number no larger than [`money::MAX_PRICE`].
    /// The price is rounded to cents.
    pub fn validate(&self) -> AppResult<MenuItem> {
        let name = self.name.trim();
        let description = self.description.trim();

        if name.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Please fill in all fields with valid data.",
            )
            .with_detail("field", "name"));
        }
        if description.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Please fill in all fields with valid data.",
            )
            .with_detail("field", "description"));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(AppError::new(ErrorCode::InvalidPrice)
                .with_detail("field", "price")
                .with_detail("value", self.price.to_string()));
        }

        let unit_price = money::round_money(money::to_decimal(self.price));
        if unit_price <= Decimal::ZERO {
            // e.g. 0.001 rounds to zero cents
            return Err(AppError::new(ErrorCode::InvalidPrice).with_detail("field", "price"));
        }

        if unit_price > money::MAX_PRICE {
            return Err(AppError::new(ErrorCode::InvalidPrice)
                .with_detail("field", "price")
                .with_detail("max", money::MAX_PRICE.to_string()));
        }

        Ok(MenuItem::new(name, unit_price).with_description(description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, description: &str, price: f64) -> MenuItemCreate {
        MenuItemCreate {
            name: name.to_string(),
            description: description.to_string(),
            price,
        }
    }

    #[test]
    fn test_normalized_name() {
        let item = MenuItem::new("  Milk Tea ", Decimal::new(450, 2));
        assert_eq!(item.normalized_name(), "milk tea");
    }

    #[test]
    fn test_validate_trims_and_rounds() {
        let item = form(" Taro Latte ", " creamy ", 5.256).validate().unwrap();
        assert_eq!(item.name, "Taro Latte");
        assert_eq!(item.description, "creamy");
        assert_eq!(item.unit_price, Decimal::new(526, 2));
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let err = form("   ", "desc", 3.0).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err = form("Matcha", "", 3.0).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_validate_rejects_bad_price() {
        assert_eq!(
            form("Matcha", "green", 0.0).validate().unwrap_err().code,
            ErrorCode::InvalidPrice
        );
        assert_eq!(
            form("Matcha", "green", -2.5).validate().unwrap_err().code,
            ErrorCode::InvalidPrice
        );
        assert_eq!(
            form("Matcha", "green", f64::NAN).validate().unwrap_err().code,
            ErrorCode::InvalidPrice
        );
        assert_eq!(
            form("Matcha", "green", 0.001).validate().unwrap_err().code,
            ErrorCode::InvalidPrice
        );
        assert_eq!(
            form("Matcha", "green", 1_000_000.01).validate().unwrap_err().code,
            ErrorCode::InvalidPrice
        );
        assert_eq!(
            form("Matcha", "green", 1e30).validate().unwrap_err().code,
            ErrorCode::InvalidPrice
        );
        assert!(form("Matcha", "green", 1_000_000.0).validate().is_ok());
    }
}
