//! Chart views with user-facing notices
//!
//! Wraps the aggregators with the outcome of the backend fetch: a failed
//! fetch yields an empty view and an error notice instead of an error
//! response, so the dashboard can still render.

use chrono_tz::Tz;
use shared::models::{MenuItem, SaleRecord};
use shared::report::{
    DrinkQuantity, DrinkRevenue, Granularity, Notice, ReportView, RevenueLabel, TimeSeries,
};
use shared::rows::Decoded;

use super::{aggregate_quantities, aggregate_revenue_with, aggregate_sales};

/// Fetched collection, or the message of the failed fetch
pub type Fetched<T> = Result<Decoded<T>, String>;

pub const NO_SALES: &str = "No sales data available.";
pub const MENU_UNAVAILABLE: &str = "Menu data is unavailable.";

/// Records to aggregate, or the view to return as is
fn usable_sales<T: Default>(
    sales: &Fetched<SaleRecord>,
) -> Result<(&[SaleRecord], Vec<Notice>), ReportView<T>> {
    match sales {
        Err(msg) => Err(ReportView::new(T::default())
            .with_notice(Notice::error(format!("Failed to load sales data: {}", msg)))),
        Ok(decoded) => {
            let mut notices = Vec::new();
            if !decoded.rejected.is_empty() {
                notices.push(Notice::warning(format!(
                    "{} malformed sales row(s) were skipped.",
                    decoded.rejected.len()
                )));
            }
            if decoded.items.is_empty() {
                notices.push(Notice::info(NO_SALES));
            }
            Ok((decoded.items.as_slice(), notices))
        }
    }
}

fn with_notices<T>(data: T, notices: Vec<Notice>) -> ReportView<T> {
    notices.into_iter().fold(ReportView::new(data), ReportView::with_notice)
}

/// Line chart: sales per period
pub fn trend_view(
    sales: &Fetched<SaleRecord>,
    granularity: Granularity,
    tz: Tz,
) -> ReportView<TimeSeries> {
    let (records, mut notices) = match usable_sales::<TimeSeries>(sales) {
        Ok(usable) => usable,
        Err(mut view) => {
            view.data.granularity = granularity;
            return view;
        }
    };

    let series = aggregate_sales(records, granularity, tz);
    if !series.skipped.is_empty() {
        notices.push(Notice::warning(format!(
            "{} sale(s) with unreadable dates were left out.",
            series.skipped.len()
        )));
    }
    with_notices(series, notices)
}

/// Pie chart: units sold per drink
pub fn distribution_view(sales: &Fetched<SaleRecord>) -> ReportView<Vec<DrinkQuantity>> {
    match usable_sales(sales) {
        Ok((records, notices)) => with_notices(aggregate_quantities(records), notices),
        Err(view) => view,
    }
}

/// Bar chart: estimated revenue per menu drink
pub fn revenue_view(
    sales: &Fetched<SaleRecord>,
    menu: &Fetched<MenuItem>,
    label: RevenueLabel,
) -> ReportView<Vec<DrinkRevenue>> {
    let (records, mut notices) = match usable_sales(sales) {
        Ok(usable) => usable,
        Err(view) => return view,
    };
    if records.is_empty() {
        return with_notices(Vec::new(), notices);
    }

    let catalog = match menu {
        Err(msg) => {
            notices.push(Notice::error(format!("Failed to load menu data: {}", msg)));
            return with_notices(Vec::new(), notices);
        }
        Ok(decoded) if decoded.items.is_empty() => {
            notices.push(Notice::warning(MENU_UNAVAILABLE));
            return with_notices(Vec::new(), notices);
        }
        Ok(decoded) => &decoded.items,
    };

    with_notices(aggregate_revenue_with(records, catalog, label), notices)
}
