//! Backend row adapter
//!
//! The hosted backend returns loosely typed JSON rows (`Details`, `DrinkName`,
//! `price`, `sale_date`). Everything entering the aggregation engine goes
//! through this module first: rows that fail shape validation are skipped and
//! reported, never passed on half-filled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{LineItem, MenuItem, SaleRecord};
use crate::money::{MAX_PRICE, MAX_QUANTITY, MAX_SALE_TOTAL, parse_money};

/// Reason a single row was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row is not a JSON object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl RowError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Row skipped during decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// Position in the fetched batch
    pub index: usize,
    pub reason: String,
}

/// Result of decoding a fetched batch
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub items: Vec<T>,
    pub rejected: Vec<RejectedRow>,
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

fn decode_batch<T>(
    rows: Vec<Value>,
    kind: &'static str,
    decode: impl Fn(&Value) -> Result<T, RowError>,
) -> Decoded<T> {
    let mut decoded = Decoded::default();
    for (index, row) in rows.iter().enumerate() {
        match decode(row) {
            Ok(item) => decoded.items.push(item),
            Err(e) => {
                tracing::warn!(kind, index, error = %e, "Skipping malformed backend row");
                decoded.rejected.push(RejectedRow {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }
    decoded
}

// ============================================================================
// Sales
// ============================================================================

/// Decode a batch of `Sales` rows
pub fn decode_sales(rows: Vec<Value>) -> Decoded<SaleRecord> {
    decode_batch(rows, "sale", decode_sale_row)
}

/// Decode one `Sales` row.
///
/// `price` and `sale_date` are required. A missing or null `Details` yields a
/// record without line items; individual malformed details are dropped.
pub fn decode_sale_row(row: &Value) -> Result<SaleRecord, RowError> {
    let obj = row.as_object().ok_or(RowError::NotAnObject)?;

    let total_price = money_field(obj, "price")?;
    if total_price.abs() > MAX_SALE_TOTAL {
        return Err(RowError::invalid("price", format!("out of range: {}", total_price)));
    }

    let sale_date = match obj.get("sale_date") {
        None | Some(Value::Null) => return Err(RowError::MissingField("sale_date")),
        Some(Value::String(s)) => s.clone(),
        Some(other) => return Err(RowError::invalid("sale_date", type_name(other))),
    };

    let line_items = match obj.get("Details") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(details)) => details
            .iter()
            .enumerate()
            .filter_map(|(i, detail)| match decode_detail(detail) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(detail = i, error = %e, "Dropping malformed sale detail");
                    None
                }
            })
            .collect(),
        Some(other) => {
            return Err(RowError::invalid(
                "Details",
                format!("expected array, got {}", type_name(other)),
            ));
        }
    };

    Ok(SaleRecord {
        id: id_field(obj),
        line_items,
        total_price,
        sale_date,
    })
}

fn decode_detail(detail: &Value) -> Result<LineItem, RowError> {
    let obj = detail.as_object().ok_or(RowError::NotAnObject)?;
    let drink_name = match obj.get("DrinkName") {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => return Err(RowError::MissingField("DrinkName")),
        Some(other) => return Err(RowError::invalid("DrinkName", type_name(other))),
    };
    let quantity = match obj.get("quantity") {
        None | Some(Value::Null) => return Err(RowError::MissingField("quantity")),
        Some(v) => parse_quantity(v).ok_or_else(|| {
            RowError::invalid("quantity", format!("not an integer: {}", v))
        })?,
    };
    if !(-MAX_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        return Err(RowError::invalid("quantity", format!("out of range: {}", quantity)));
    }
    Ok(LineItem {
        drink_name,
        quantity,
    })
}

fn parse_quantity(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ============================================================================
// Menu
// ============================================================================

/// Decode a batch of `Menu` rows
pub fn decode_menu(rows: Vec<Value>) -> Decoded<MenuItem> {
    decode_batch(rows, "menu", decode_menu_row)
}

/// Decode one `Menu` row. `DrinkName` must be non-blank and `price` numeric.
pub fn decode_menu_row(row: &Value) -> Result<MenuItem, RowError> {
    let obj = row.as_object().ok_or(RowError::NotAnObject)?;

    let name = match obj.get("DrinkName") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::String(_)) => return Err(RowError::invalid("DrinkName", "blank")),
        None | Some(Value::Null) => return Err(RowError::MissingField("DrinkName")),
        Some(other) => return Err(RowError::invalid("DrinkName", type_name(other))),
    };
    let unit_price = money_field(obj, "price")?;
    if unit_price.abs() > MAX_PRICE {
        return Err(RowError::invalid("price", format!("out of range: {}", unit_price)));
    }
    let description = match obj.get("description") {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };

    Ok(MenuItem {
        id: id_field(obj),
        name,
        description,
        unit_price,
    })
}

// ============================================================================
// Field helpers
// ============================================================================

fn money_field(obj: &Map<String, Value>, field: &'static str) -> Result<Decimal, RowError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(RowError::MissingField(field)),
        Some(v) => parse_money(v).ok_or_else(|| RowError::invalid(field, format!("not a number: {}", v))),
    }
}

fn id_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Insert shapes
// ============================================================================

/// `Details` entry as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailRow {
    #[serde(rename = "DrinkName")]
    pub drink_name: String,
    pub quantity: i64,
}

/// New row for the `Sales` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleInsertRow {
    #[serde(rename = "Details")]
    pub details: Vec<DetailRow>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub sale_date: String,
}

impl From<&SaleRecord> for SaleInsertRow {
    fn from(record: &SaleRecord) -> Self {
        Self {
            details: record
                .line_items
                .iter()
                .map(|l| DetailRow {
                    drink_name: l.drink_name.clone(),
                    quantity: l.quantity,
                })
                .collect(),
            price: record.total_price,
            sale_date: record.sale_date.clone(),
        }
    }
}

/// New row for the `Menu` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuInsertRow {
    #[serde(rename = "DrinkName")]
    pub drink_name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<&MenuItem> for MenuInsertRow {
    fn from(item: &MenuItem) -> Self {
        Self {
            drink_name: item.name.clone(),
            description: item.description.clone(),
            price: item.unit_price,
        }
    }
}
