//! Estimated revenue per menu drink
//!
//! Revenue is re-derived from current menu prices, not from the charged
//! `total_price`: units sold × today's unit price, rounded to cents.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::models::{MenuItem, SaleRecord, normalize_drink_key};
use shared::money::round_money;
use shared::report::{DrinkRevenue, RevenueLabel};

/// Menu prices and labels keyed by normalized drink name
struct PriceBook {
    prices: HashMap<String, Decimal>,
    labels: HashMap<String, String>,
}

impl PriceBook {
    /// Later entries overwrite the price of a duplicate name; the label
    /// stays with the first entry.
    fn new(catalog: &[MenuItem]) -> Self {
        let mut prices = HashMap::new();
        let mut labels = HashMap::new();
        for item in catalog {
            let key = item.normalized_name();
            labels
                .entry(key.clone())
                .or_insert_with(|| item.name.trim().to_string());
            prices.insert(key, item.unit_price);
        }
        Self { prices, labels }
    }
}

struct Tally {
    key: String,
    label: String,
    quantity: i64,
}

/// Revenue per catalog drink labelled with the menu spelling
pub fn aggregate_revenue(records: &[SaleRecord], catalog: &[MenuItem]) -> Vec<DrinkRevenue> {
    aggregate_revenue_with(records, catalog, RevenueLabel::Catalog)
}

/// Revenue per catalog drink, descending.
///
/// Line items are matched to the menu case- and whitespace-insensitively;
/// unmatched names are left out, as are amounts that do not fit a
/// `Decimal`. Ties keep first-seen order.
pub fn aggregate_revenue_with(
    records: &[SaleRecord],
    catalog: &[MenuItem],
    label: RevenueLabel,
) -> Vec<DrinkRevenue> {
    let book = PriceBook::new(catalog);
    let mut tallies: Vec<Tally> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in records.iter().flat_map(|r| &r.line_items) {
        let key = normalize_drink_key(&item.drink_name);
        if !book.prices.contains_key(&key) {
            tracing::debug!(drink = %item.drink_name, "No menu entry for sold drink");
            continue;
        }
        match index.get(&key) {
            Some(&i) => match tallies[i].quantity.checked_add(item.quantity) {
                Some(sum) => tallies[i].quantity = sum,
                None => tracing::warn!(
                    drink = %item.drink_name,
                    quantity = item.quantity,
                    "Skipping line item that overflows the drink total"
                ),
            },
            None => {
                let display = match label {
                    RevenueLabel::Catalog => book.labels.get(&key).cloned(),
                    RevenueLabel::FirstSeenInSales => Some(item.drink_name.trim().to_string()),
                };
                index.insert(key.clone(), tallies.len());
                tallies.push(Tally {
                    label: display.unwrap_or_else(|| key.clone()),
                    key,
                    quantity: item.quantity,
                });
            }
        }
    }

    let mut revenue: Vec<DrinkRevenue> = tallies
        .into_iter()
        .filter_map(|t| {
            let unit_price = book.prices.get(&t.key).copied().unwrap_or_default();
            match Decimal::from(t.quantity).checked_mul(unit_price) {
                Some(amount) => Some(DrinkRevenue {
                    drink_name: t.label,
                    revenue: round_money(amount),
                }),
                None => {
                    tracing::warn!(
                        drink = %t.label,
                        quantity = t.quantity,
                        unit_price = %unit_price,
                        "Revenue out of range, drink left out"
                    );
                    None
                }
            }
        })
        .collect();

    // Stable: equal revenue keeps first-seen order
    revenue.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    revenue
}
