//! Shopping cart

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{LineItem, MenuItem, SaleRecord, normalize_drink_key};
use shared::money::{MAX_QUANTITY, round_money};
use shared::{AppError, AppResult, ErrorCode};

/// One drink in the cart with the unit price it was added at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub drink_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Cart lines keyed by drink, in the order drinks were first added
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, drink_name: &str) -> Option<usize> {
        let key = normalize_drink_key(drink_name);
        self.lines
            .iter()
            .position(|l| normalize_drink_key(&l.drink_name) == key)
    }

    /// Add one unit of a menu drink
    pub fn add(&mut self, item: &MenuItem) -> AppResult<()> {
        self.add_quantity(item, 1)
    }

    /// Add `quantity` units, merging with an existing line for the same drink.
    ///
    /// A line holds between 1 and [`MAX_QUANTITY`] units; the cart is left
    /// unchanged when the addition would leave that range.
    pub fn add_quantity(&mut self, item: &MenuItem, quantity: i64) -> AppResult<()> {
        let existing = self.position(&item.name);
        let current = existing.map_or(0, |i| self.lines[i].quantity);
        let merged = current
            .checked_add(quantity)
            .filter(|q| quantity > 0 && *q <= MAX_QUANTITY)
            .ok_or_else(|| {
                AppError::new(ErrorCode::InvalidQuantity)
                    .with_detail("drink_name", item.name.trim())
                    .with_detail("quantity", quantity)
                    .with_detail("max", MAX_QUANTITY)
            })?;

        match existing {
            Some(i) => self.lines[i].quantity = merged,
            None => self.lines.push(CartLine {
                drink_name: item.name.trim().to_string(),
                unit_price: item.unit_price,
                quantity: merged,
            }),
        }
        Ok(())
    }

    /// Remove one unit; the line disappears at zero. Returns false if the
    /// drink is not in the cart.
    pub fn remove(&mut self, drink_name: &str) -> bool {
        let Some(i) = self.position(drink_name) else {
            return false;
        };
        if self.lines[i].quantity > 1 {
            self.lines[i].quantity -= 1;
        } else {
            self.lines.remove(i);
        }
        true
    }

    /// Σ unit price × quantity, rounded to cents
    pub fn total(&self) -> Decimal {
        round_money(self.lines.iter().map(CartLine::subtotal).sum())
    }

    /// Sale record for this cart at `sale_date`
    pub fn to_sale(&self, sale_date: impl Into<String>) -> SaleRecord {
        SaleRecord::new(
            self.lines
                .iter()
                .map(|l| LineItem::new(l.drink_name.clone(), l.quantity))
                .collect(),
            self.total(),
            sale_date,
        )
    }
}
