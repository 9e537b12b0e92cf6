//! Sales aggregation engine
//!
//! Pure functions over already-fetched snapshots of sales and the menu:
//!
//! - [`aggregate_sales`] - totals per day, week or month
//! - [`aggregate_quantities`] - units sold per drink
//! - [`aggregate_revenue`] - estimated revenue per menu drink
//!
//! Nothing here performs I/O; empty inputs give empty outputs.

pub mod distribution;
pub mod revenue;
pub mod time_series;
pub mod views;

use chrono_tz::Tz;
use shared::models::{MenuItem, SaleRecord};
use shared::report::{Granularity, RevenueLabel, SalesReport};

pub use distribution::aggregate_quantities;
pub use revenue::{aggregate_revenue, aggregate_revenue_with};
pub use time_series::{aggregate_sales, period_key};

/// All three views over the same snapshots
pub fn build_report(
    records: &[SaleRecord],
    catalog: &[MenuItem],
    granularity: Granularity,
    tz: Tz,
) -> SalesReport {
    build_report_with(records, catalog, granularity, tz, RevenueLabel::Catalog)
}

pub fn build_report_with(
    records: &[SaleRecord],
    catalog: &[MenuItem],
    granularity: Granularity,
    tz: Tz,
    label: RevenueLabel,
) -> SalesReport {
    SalesReport {
        sales_trend: aggregate_sales(records, granularity, tz),
        drink_distribution: aggregate_quantities(records),
        drink_revenue: aggregate_revenue_with(records, catalog, label),
    }
}
