//! Sale Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One `{drink, quantity}` pair within a sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub drink_name: String,
    /// Units sold. Aggregation sums this as given, including non-positive values.
    pub quantity: i64,
}

impl LineItem {
    pub fn new(drink_name: impl Into<String>, quantity: i64) -> Self {
        Self {
            drink_name: drink_name.into(),
            quantity,
        }
    }
}

/// Completed order (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: Option<String>,
    pub line_items: Vec<LineItem>,
    /// Price charged at order time, independent of current menu prices
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    /// ISO 8601 date or date-time as stored by the backend
    pub sale_date: String,
}

impl SaleRecord {
    pub fn new(line_items: Vec<LineItem>, total_price: Decimal, sale_date: impl Into<String>) -> Self {
        Self {
            id: None,
            line_items,
            total_price,
            sale_date: sale_date.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Total units across all line items
    pub fn total_quantity(&self) -> i64 {
        self.line_items.iter().map(|l| l.quantity).sum()
    }
}

/// Line of a checkout request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub drink_name: String,
    pub quantity: i64,
}

/// Checkout request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub lines: Vec<CheckoutLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_quantity() {
        let record = SaleRecord::new(
            vec![LineItem::new("Milk Tea", 2), LineItem::new("Latte", 3)],
            Decimal::new(1500, 2),
            "2024-03-01",
        );
        assert_eq!(record.total_quantity(), 5);
        assert_eq!(SaleRecord::new(vec![], Decimal::ZERO, "2024-03-01").total_quantity(), 0);
    }

    #[test]
    fn test_serialize_price_as_number() {
        let record = SaleRecord::new(vec![], Decimal::new(900, 2), "2024-03-01").with_id("7");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["total_price"], serde_json::json!(9.0));
        assert_eq!(json["id"], "7");
    }
}
