//! Units sold per drink

use std::collections::HashMap;

use shared::models::SaleRecord;
use shared::report::DrinkQuantity;

/// Sum quantities per drink name.
///
/// Names are trimmed but keep their casing, so `"Milk Tea"` and
/// `"milk tea"` are separate entries. Output follows first appearance.
/// A line item that would overflow its drink's total is left out.
pub fn aggregate_quantities(records: &[SaleRecord]) -> Vec<DrinkQuantity> {
    let mut totals: Vec<DrinkQuantity> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in records.iter().flat_map(|r| &r.line_items) {
        let name = item.drink_name.trim();
        match index.get(name) {
            Some(&i) => match totals[i].quantity.checked_add(item.quantity) {
                Some(sum) => totals[i].quantity = sum,
                None => tracing::warn!(
                    drink = name,
                    quantity = item.quantity,
                    "Skipping line item that overflows the drink total"
                ),
            },
            None => {
                index.insert(name.to_string(), totals.len());
                totals.push(DrinkQuantity {
                    drink_name: name.to_string(),
                    quantity: item.quantity,
                });
            }
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::LineItem;

    fn sale(items: &[(&str, i64)]) -> SaleRecord {
        SaleRecord::new(
            items.iter().map(|(n, q)| LineItem::new(*n, *q)).collect(),
            Decimal::ZERO,
            "2024-03-01",
        )
    }

    #[test]
    fn test_sums_trimmed_names_in_first_seen_order() {
        let records = vec![
            sale(&[("Milk Tea", 2), (" Latte", 1)]),
            sale(&[("Latte ", 3), ("Milk Tea", 1)]),
            sale(&[("Matcha", 5)]),
        ];
        assert_eq!(
            aggregate_quantities(&records),
            vec![
                DrinkQuantity { drink_name: "Milk Tea".into(), quantity: 3 },
                DrinkQuantity { drink_name: "Latte".into(), quantity: 4 },
                DrinkQuantity { drink_name: "Matcha".into(), quantity: 5 },
            ]
        );
    }

    #[test]
    fn test_casing_is_preserved() {
        let records = vec![sale(&[("Milk Tea", 1), ("milk tea", 1)])];
        let totals = aggregate_quantities(&records);
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_quantity_is_conserved() {
        let records = vec![
            sale(&[("A", 2), ("B", -1)]),
            sale(&[]),
            sale(&[("A", 0), ("C", 7)]),
        ];
        let total: i64 = aggregate_quantities(&records).iter().map(|d| d.quantity).sum();
        let expected: i64 = records.iter().map(SaleRecord::total_quantity).sum();
        assert_eq!(total, expected);
    }

    #[test]
    fn test_overflowing_line_is_left_out() {
        let records = vec![sale(&[("A", i64::MAX), ("A", 1), ("B", 2)]), sale(&[("A", -5)])];
        assert_eq!(
            aggregate_quantities(&records),
            vec![
                DrinkQuantity { drink_name: "A".into(), quantity: i64::MAX - 5 },
                DrinkQuantity { drink_name: "B".into(), quantity: 2 },
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_quantities(&[]).is_empty());
    }
}
