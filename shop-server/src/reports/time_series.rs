//! Sales over time

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::models::SaleRecord;
use shared::report::{Granularity, SkippedRecord, TimeBucketTotal, TimeSeries};

use crate::utils::time::sale_local_date;

/// Period key for a local calendar date.
///
/// Weekly keys name the Monday that starts the week with its ISO week-based
/// year and week number, so keys sort chronologically as strings.
pub fn period_key(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily => date.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => {
            let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
            let week = monday.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        Granularity::Monthly => date.format("%Y-%m").to_string(),
    }
}

/// Sum `total_price` per period, ascending by period key.
///
/// Records whose `sale_date` cannot be read, or whose price would push a
/// period total past `Decimal::MAX`, are left out and listed in `skipped`.
pub fn aggregate_sales(records: &[SaleRecord], granularity: Granularity, tz: Tz) -> TimeSeries {
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut skipped = Vec::new();

    for record in records {
        let date = match sale_local_date(&record.sale_date, tz) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(
                    id = record.id.as_deref().unwrap_or("-"),
                    sale_date = %record.sale_date,
                    error = %e,
                    "Skipping sale with unreadable date"
                );
                skipped.push(skip(record, e.to_string()));
                continue;
            }
        };

        let total = buckets.entry(period_key(date, granularity)).or_default();
        match total.checked_add(record.total_price) {
            Some(sum) => *total = sum,
            None => {
                tracing::warn!(
                    id = record.id.as_deref().unwrap_or("-"),
                    total_price = %record.total_price,
                    "Skipping sale that overflows its period total"
                );
                skipped.push(skip(record, "period total out of range".to_string()));
            }
        }
    }

    TimeSeries {
        granularity,
        points: buckets
            .into_iter()
            .map(|(period, total_sales)| TimeBucketTotal {
                period,
                total_sales,
            })
            .collect(),
        skipped,
    }
}

fn skip(record: &SaleRecord, reason: String) -> SkippedRecord {
    SkippedRecord {
        id: record.id.clone(),
        sale_date: record.sale_date.clone(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::LineItem;

    fn sale(price: i64, date: &str) -> SaleRecord {
        SaleRecord::new(vec![LineItem::new("Latte", 1)], Decimal::new(price, 2), date)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_keys() {
        let d = date(2024, 3, 6); // Wednesday
        assert_eq!(period_key(d, Granularity::Daily), "2024-03-06");
        assert_eq!(period_key(d, Granularity::Weekly), "2024-W10");
        assert_eq!(period_key(d, Granularity::Monthly), "2024-03");
    }

    #[test]
    fn test_weekly_key_uses_monday() {
        // Sunday 2024-03-10 belongs to the week starting Monday 2024-03-04
        assert_eq!(period_key(date(2024, 3, 10), Granularity::Weekly), "2024-W10");
        assert_eq!(period_key(date(2024, 3, 11), Granularity::Weekly), "2024-W11");
    }

    #[test]
    fn test_weekly_key_across_year_boundary() {
        // Monday 2024-12-30 is in ISO week 1 of 2025
        assert_eq!(period_key(date(2024, 12, 31), Granularity::Weekly), "2025-W01");
        assert_eq!(period_key(date(2025, 1, 2), Granularity::Weekly), "2025-W01");
        // Friday 2021-01-01 belongs to the week of Monday 2020-12-28 (2020-W53)
        assert_eq!(period_key(date(2021, 1, 1), Granularity::Weekly), "2020-W53");
    }

    #[test]
    fn test_daily_sum_and_order() {
        let records = vec![
            sale(900, "2024-03-02"),
            sale(450, "2024-03-01T10:00:00Z"),
            sale(550, "2024-03-01T18:00:00Z"),
            sale(-100, "2024-03-02"),
        ];
        let series = aggregate_sales(&records, Granularity::Daily, Tz::UTC);
        assert_eq!(series.granularity, Granularity::Daily);
        assert_eq!(
            series.points,
            vec![
                TimeBucketTotal {
                    period: "2024-03-01".into(),
                    total_sales: Decimal::new(1000, 2)
                },
                TimeBucketTotal {
                    period: "2024-03-02".into(),
                    total_sales: Decimal::new(800, 2)
                },
            ]
        );
        assert!(series.skipped.is_empty());
    }

    #[test]
    fn test_daily_sum_is_conserved() {
        let records = vec![
            sale(123, "2024-01-31"),
            sale(4567, "2024-02-01"),
            sale(1, "2024-02-01T12:00:00Z"),
            sale(0, "2024-02-29"),
        ];
        let series = aggregate_sales(&records, Granularity::Daily, Tz::UTC);
        let bucket_total: Decimal = series.points.iter().map(|p| p.total_sales).sum();
        let record_total: Decimal = records.iter().map(|r| r.total_price).sum();
        assert_eq!(bucket_total, record_total);
    }

    #[test]
    fn test_keys_strictly_ascending() {
        let records = vec![
            sale(100, "2024-11-02"),
            sale(100, "2023-12-31"),
            sale(100, "2024-02-15"),
            sale(100, "2024-02-15"),
        ];
        for granularity in [Granularity::Daily, Granularity::Weekly, Granularity::Monthly] {
            let series = aggregate_sales(&records, granularity, Tz::UTC);
            let keys: Vec<&str> = series.points.iter().map(|p| p.period.as_str()).collect();
            assert!(keys.windows(2).all(|w| w[0] < w[1]), "{:?}", keys);
        }
    }

    #[test]
    fn test_daily_keys_sorted_chronologically() {
        let records = vec![
            sale(100, "2024-01-02"),
            sale(100, "2023-12-31"),
            sale(100, "2024-02-01"),
        ];
        let series = aggregate_sales(&records, Granularity::Daily, Tz::UTC);
        let keys: Vec<&str> = series.points.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(keys, vec!["2023-12-31", "2024-01-02", "2024-02-01"]);
    }

    #[test]
    fn test_overflowing_total_is_skipped() {
        let records = vec![
            SaleRecord::new(vec![], Decimal::MAX, "2024-03-01"),
            SaleRecord::new(vec![], Decimal::MAX, "2024-03-01T09:00:00Z").with_id("big"),
            sale(100, "2024-03-02"),
        ];
        let series = aggregate_sales(&records, Granularity::Daily, Tz::UTC);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].total_sales, Decimal::MAX);
        assert_eq!(series.skipped.len(), 1);
        assert_eq!(series.skipped[0].id.as_deref(), Some("big"));
    }

    #[test]
    fn test_monthly_buckets() {
        let records = vec![
            sale(1000, "2024-03-31"),
            sale(500, "2024-03-01"),
            sale(250, "2024-04-01"),
        ];
        let series = aggregate_sales(&records, Granularity::Monthly, Tz::UTC);
        let keys: Vec<_> = series.points.iter().map(|p| p.period.clone()).collect();
        assert_eq!(keys, vec!["2024-03", "2024-04"]);
        assert_eq!(series.points[0].total_sales, Decimal::new(1500, 2));
    }

    #[test]
    fn test_business_zone_shifts_day() {
        let records = vec![sale(500, "2024-03-01T20:00:00Z")];
        let series = aggregate_sales(&records, Granularity::Daily, Tz::Asia__Tokyo);
        assert_eq!(series.points[0].period, "2024-03-02");
    }

    #[test]
    fn test_unreadable_dates_are_skipped() {
        let records = vec![
            sale(500, "2024-03-01"),
            sale(700, "not a date").with_id("42"),
        ];
        let series = aggregate_sales(&records, Granularity::Daily, Tz::UTC);
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.skipped.len(), 1);
        assert_eq!(series.skipped[0].id.as_deref(), Some("42"));
        assert_eq!(series.skipped[0].sale_date, "not a date");
    }

    #[test]
    fn test_empty_input() {
        let series = aggregate_sales(&[], Granularity::Weekly, Tz::UTC);
        assert!(series.points.is_empty());
        assert!(series.skipped.is_empty());
    }
}
