//! Statistics API Handlers
//!
//! Every endpoint answers 200: fetch failures and missing data surface as
//! notices on the affected view.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{MenuItem, SaleRecord};
use shared::report::{
    DrinkQuantity, DrinkRevenue, Granularity, ReportView, RevenueLabel, TimeSeries,
};

use crate::auth::Session;
use crate::core::ServerState;
use crate::reports::views::{self, Fetched};
use crate::utils::ApiResponse;

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct StatisticsQuery {
    /// daily | weekly | monthly, anything else means daily
    pub granularity: Option<String>,
    /// catalog (default, menu spelling) | sales (first sales spelling)
    pub label: Option<String>,
}

impl StatisticsQuery {
    fn granularity(&self) -> Granularity {
        self.granularity
            .as_deref()
            .map(Granularity::parse)
            .unwrap_or_default()
    }

    fn label(&self) -> RevenueLabel {
        self.label
            .as_deref()
            .map(RevenueLabel::parse)
            .unwrap_or_default()
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// All three dashboard views
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResponse {
    pub sales_trend: ReportView<TimeSeries>,
    pub drink_distribution: ReportView<Vec<DrinkQuantity>>,
    pub drink_revenue: ReportView<Vec<DrinkRevenue>>,
}

// ============================================================================
// Fetching
// ============================================================================

async fn fetch_sales(state: &ServerState, session: &Session) -> Fetched<SaleRecord> {
    state
        .backend()
        .fetch_sales(session.access_token())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch sales");
            e.to_string()
        })
}

async fn fetch_menu(state: &ServerState, session: &Session) -> Fetched<MenuItem> {
    state
        .backend()
        .fetch_menu(session.access_token())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch menu");
            e.to_string()
        })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/statistics
pub async fn get_statistics(
    State(state): State<ServerState>,
    session: Session,
    Query(query): Query<StatisticsQuery>,
) -> Json<ApiResponse<StatisticsResponse>> {
    let (sales, menu) = tokio::join!(fetch_sales(&state, &session), fetch_menu(&state, &session));

    Json(ApiResponse::success(StatisticsResponse {
        sales_trend: views::trend_view(&sales, query.granularity(), state.timezone()),
        drink_distribution: views::distribution_view(&sales),
        drink_revenue: views::revenue_view(&sales, &menu, query.label()),
    }))
}

/// GET /api/statistics/sales-trend?granularity=
pub async fn get_sales_trend(
    State(state): State<ServerState>,
    session: Session,
    Query(query): Query<StatisticsQuery>,
) -> Json<ApiResponse<ReportView<TimeSeries>>> {
    let sales = fetch_sales(&state, &session).await;
    Json(ApiResponse::success(views::trend_view(
        &sales,
        query.granularity(),
        state.timezone(),
    )))
}

/// GET /api/statistics/drink-distribution
pub async fn get_drink_distribution(
    State(state): State<ServerState>,
    session: Session,
) -> Json<ApiResponse<ReportView<Vec<DrinkQuantity>>>> {
    let sales = fetch_sales(&state, &session).await;
    Json(ApiResponse::success(views::distribution_view(&sales)))
}

/// GET /api/statistics/drink-revenue?label=
///
/// Entries are labelled with the first menu spelling by default: sales of
/// `Milk Tea` priced by a menu entry `milk tea` come back as `milk tea`.
/// `label=sales` labels them with the first spelling seen in the sales
/// instead (`Milk Tea`). The combined `/api/statistics` endpoint takes the
/// same parameter.
pub async fn get_drink_revenue(
    State(state): State<ServerState>,
    session: Session,
    Query(query): Query<StatisticsQuery>,
) -> Json<ApiResponse<ReportView<Vec<DrinkRevenue>>>> {
    let (sales, menu) = tokio::join!(fetch_sales(&state, &session), fetch_menu(&state, &session));
    Json(ApiResponse::success(views::revenue_view(
        &sales,
        &menu,
        query.label(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = StatisticsQuery::default();
        assert_eq!(query.granularity(), Granularity::Daily);
        assert_eq!(query.label(), RevenueLabel::Catalog);

        let query = StatisticsQuery {
            granularity: Some("yearly".into()),
            label: Some("sales".into()),
        };
        assert_eq!(query.granularity(), Granularity::Daily);
        assert_eq!(query.label(), RevenueLabel::FirstSeenInSales);
    }
}
