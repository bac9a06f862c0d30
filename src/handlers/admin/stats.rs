use axum::extract::Query;
use serde::Deserialize;

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::stats_service::StatsReport;
use crate::services::StatsService;

const DEFAULT_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub window_days: Option<u32>,
}

/// GET /admin/stats - trailing window vs. the preceding window of equal length
pub async fn stats(Query(query): Query<StatsQuery>) -> ApiResult<StatsReport> {
    let window = query.window_days.unwrap_or(DEFAULT_WINDOW_DAYS).max(1);
    let stats = StatsService::new().await?;
    let report = stats.compute(window).await?;
    Ok(ApiResponse::success(report))
}
