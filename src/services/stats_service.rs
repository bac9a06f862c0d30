use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};

/// A windowed count with percent change vs. the preceding window
#[derive(Debug, Serialize)]
pub struct CountMetric {
    pub current: i64,
    pub previous: i64,
    pub change_pct: f64,
}

/// A windowed sum with percent change vs. the preceding window.
/// Money stays in `Decimal` end to end, including the percentage.
#[derive(Debug, Serialize)]
pub struct SumMetric {
    pub current: Decimal,
    pub previous: Decimal,
    pub change_pct: Decimal,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub window_days: u32,
    pub orders: CountMetric,
    pub revenue: SumMetric,
    pub new_users: CountMetric,
    pub reservations: CountMetric,
}

#[derive(Debug, Serialize)]
pub struct StaffStats {
    pub headcount: i64,
    pub monthly_payroll: Decimal,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DailyRevenue {
    pub day: NaiveDate,
    pub revenue: Decimal,
}

/// Percent change between two window totals. A zero previous window yields
/// 0 by convention rather than an arithmetic fault.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

fn count_metric(current: i64, previous: i64) -> CountMetric {
    CountMetric {
        current,
        previous,
        change_pct: percent_change(current as f64, previous as f64),
    }
}

fn sum_metric(current: Decimal, previous: Decimal) -> SumMetric {
    let change_pct = if previous.is_zero() {
        Decimal::ZERO
    } else {
        ((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(2)
    };
    SumMetric {
        current,
        previous,
        change_pct,
    }
}

pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Aggregate report over the trailing window, compared against the
    /// immediately preceding window of equal length.
    pub async fn compute(&self, window_days: u32) -> Result<StatsReport, sqlx::Error> {
        let now = Utc::now();
        let window_start = now - Duration::days(window_days as i64);
        let previous_start = window_start - Duration::days(window_days as i64);

        let orders_current = self.count_orders(window_start, now).await?;
        let orders_previous = self.count_orders(previous_start, window_start).await?;

        let revenue_current = self.sum_revenue(window_start, now).await?;
        let revenue_previous = self.sum_revenue(previous_start, window_start).await?;

        let users_current = self.count_new_users(window_start, now).await?;
        let users_previous = self.count_new_users(previous_start, window_start).await?;

        let reservations_current = self.count_reservations(window_start, now).await?;
        let reservations_previous = self.count_reservations(previous_start, window_start).await?;

        Ok(StatsReport {
            window_days,
            orders: count_metric(orders_current, orders_previous),
            revenue: sum_metric(revenue_current, revenue_previous),
            new_users: count_metric(users_current, users_previous),
            reservations: count_metric(reservations_current, reservations_previous),
        })
    }

    /// Staff headcount and payroll total (staff + admin salaries)
    pub async fn staff_stats(&self) -> Result<StaffStats, sqlx::Error> {
        let (headcount, monthly_payroll): (i64, Decimal) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(salary), 0)
             FROM users WHERE role IN ('staff', 'admin')",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(StaffStats {
            headcount,
            monthly_payroll,
        })
    }

    /// Revenue grouped by day over the trailing window, cancelled orders excluded
    pub async fn revenue_by_day(&self, window_days: u32) -> Result<Vec<DailyRevenue>, sqlx::Error> {
        let since = Utc::now() - Duration::days(window_days as i64);
        sqlx::query_as::<_, DailyRevenue>(
            "SELECT created_at::date AS day, COALESCE(SUM(total_amount), 0) AS revenue
             FROM orders
             WHERE created_at >= $1 AND status <> 'cancelled'
             GROUP BY day
             ORDER BY day",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_orders(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE created_at >= $1 AND created_at < $2")
            .bind(from)
            .bind(to)
            .fetch_one(&self.pool)
            .await
    }

    async fn sum_revenue(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Decimal, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_amount), 0) FROM orders
             WHERE created_at >= $1 AND created_at < $2 AND status <> 'cancelled'",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
    }

    async fn count_new_users(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE created_at >= $1 AND created_at < $2")
            .bind(from)
            .bind(to)
            .fetch_one(&self.pool)
            .await
    }

    async fn count_reservations(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_previous_window_yields_zero_change() {
        assert_eq!(percent_change(5.0, 0.0), 0.0);
    }

    #[test]
    fn change_is_relative_to_previous() {
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
        assert_eq!(percent_change(100.0, 100.0), 0.0);
    }

    #[test]
    fn revenue_change_stays_in_decimal() {
        let m = sum_metric(Decimal::new(150, 0), Decimal::new(100, 0));
        assert_eq!(m.change_pct, Decimal::new(50, 0));

        let m = sum_metric(Decimal::new(1, 1), Decimal::new(3, 1));
        assert_eq!(m.change_pct, Decimal::new(-6667, 2));

        let m = sum_metric(Decimal::new(5, 0), Decimal::ZERO);
        assert_eq!(m.change_pct, Decimal::ZERO);
    }
}
