//! Sales report views
//!
//! Derived, transient views computed from sale records and the menu. They are
//! produced by the aggregation engine in shop-server and rendered as charts by
//! the frontend (line: sales trend, pie: drink distribution, bar: revenue).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time-series bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Parse a granularity name. Unrecognized values fall back to `Daily`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which spelling labels a revenue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueLabel {
    /// First menu entry with the same normalized name
    #[default]
    Catalog,
    /// First trimmed spelling seen in the sales data
    FirstSeenInSales,
}

impl RevenueLabel {
    /// `sales` selects [`RevenueLabel::FirstSeenInSales`], anything else the catalog label
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sales" | "first_seen_in_sales" => Self::FirstSeenInSales,
            _ => Self::Catalog,
        }
    }
}

/// Total sales within one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucketTotal {
    /// `YYYY-MM-DD`, `YYYY-Www` or `YYYY-MM`
    pub period: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
}

/// Units sold for one drink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkQuantity {
    pub drink_name: String,
    pub quantity: i64,
}

/// Estimated revenue for one menu drink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkRevenue {
    pub drink_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// Sale left out of the time series because its date could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub id: Option<String>,
    pub sale_date: String,
    pub reason: String,
}

/// Time-bucketed sales with the records that could not be placed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    pub granularity: Granularity,
    pub points: Vec<TimeBucketTotal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRecord>,
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Message the frontend shows next to (or instead of) a chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// One chart's worth of data plus any notices for the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

impl<T> ReportView<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            notices: Vec::new(),
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}

/// All three views computed over the same snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesReport {
    pub sales_trend: TimeSeries,
    pub drink_distribution: Vec<DrinkQuantity>,
    pub drink_revenue: Vec<DrinkRevenue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_parse_falls_back_to_daily() {
        assert_eq!(Granularity::parse("weekly"), Granularity::Weekly);
        assert_eq!(Granularity::parse(" Monthly "), Granularity::Monthly);
        assert_eq!(Granularity::parse("daily"), Granularity::Daily);
        assert_eq!(Granularity::parse("hourly"), Granularity::Daily);
        assert_eq!(Granularity::parse(""), Granularity::Daily);
    }

    #[test]
    fn test_revenue_label_parse() {
        assert_eq!(RevenueLabel::parse("sales"), RevenueLabel::FirstSeenInSales);
        assert_eq!(RevenueLabel::parse("catalog"), RevenueLabel::Catalog);
        assert_eq!(RevenueLabel::parse("other"), RevenueLabel::Catalog);
    }

    #[test]
    fn test_view_serialization_skips_empty_notices() {
        let view = ReportView::new(vec![DrinkQuantity {
            drink_name: "Latte".into(),
            quantity: 2,
        }]);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("notices").is_none());

        let view = view.with_notice(Notice::error("Failed to fetch sales data."));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["notices"][0]["level"], "error");
    }
}
