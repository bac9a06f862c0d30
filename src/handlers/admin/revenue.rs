use axum::extract::Query;
use serde::Deserialize;

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::stats_service::DailyRevenue;
use crate::services::StatsService;

#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    pub window_days: Option<u32>,
}

/// GET /admin/revenue - per-day revenue over the trailing window
pub async fn revenue(Query(query): Query<RevenueQuery>) -> ApiResult<Vec<DailyRevenue>> {
    let window = query.window_days.unwrap_or(30).max(1);
    let stats = StatsService::new().await?;
    let rows = stats.revenue_by_day(window).await?;
    Ok(ApiResponse::success(rows))
}
