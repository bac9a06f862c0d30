use crate::middleware::{ApiResponse, ApiResult};
use crate::services::stats_service::StaffStats;
use crate::services::StatsService;

/// GET /staff/stats - admin only; headcount and payroll total
pub async fn stats() -> ApiResult<StaffStats> {
    let stats = StatsService::new().await?;
    let report = stats.staff_stats().await?;
    Ok(ApiResponse::success(report))
}
