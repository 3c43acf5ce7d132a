//! Analytics read endpoints.

use chrono::NaiveDate;

use super::paths;
use crate::errors::ClientError;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{
    CategoryPerformance, DashboardSummary, DateRange, DayComparison, HourlyTrendPoint,
    MaterialExpenseBreakdown, ShiftReport, Shift, WeeklySummary, WorkerExpenseBreakdown,
};
use crate::session::TokenStore;

fn date_param(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl<S: TokenStore> ApiClient<S> {
    /// GET /api/analytics/dashboard/ - Headline numbers for a range.
    pub async fn dashboard_summary(&self, range: &DateRange) -> Result<DashboardSummary, ClientError> {
        let request = ApiRequest::get(paths::DASHBOARD).query_pairs(range.query_pairs());
        self.send(&request).await?.json()
    }

    /// GET /api/analytics/category-performance/ - Sales per category.
    pub async fn category_performance(
        &self,
        range: &DateRange,
    ) -> Result<Vec<CategoryPerformance>, ClientError> {
        let request = ApiRequest::get(paths::CATEGORY_PERFORMANCE).query_pairs(range.query_pairs());
        self.send(&request).await?.json()
    }

    /// GET /api/analytics/hourly-trend/ - Orders and revenue per hour of one day.
    pub async fn hourly_trend(&self, date: NaiveDate) -> Result<Vec<HourlyTrendPoint>, ClientError> {
        let request = ApiRequest::get(paths::HOURLY_TREND).query("date", date_param(date));
        let mut points: Vec<HourlyTrendPoint> = self.send(&request).await?.json()?;
        points.sort_by_key(|point| point.hour);
        Ok(points)
    }

    /// GET /api/analytics/day-comparison/ - The given day against the day before.
    pub async fn day_comparison(&self, date: NaiveDate) -> Result<DayComparison, ClientError> {
        let request = ApiRequest::get(paths::DAY_COMPARISON).query("date", date_param(date));
        self.send(&request).await?.json()
    }

    /// GET /api/analytics/worker-expenses/ - Expense totals per worker.
    pub async fn worker_expense_breakdown(
        &self,
        range: &DateRange,
    ) -> Result<Vec<WorkerExpenseBreakdown>, ClientError> {
        let request = ApiRequest::get(paths::WORKER_EXPENSES).query_pairs(range.query_pairs());
        self.send(&request).await?.json()
    }

    /// GET /api/analytics/material-expenses/ - Expense totals per material.
    pub async fn material_expense_breakdown(
        &self,
        range: &DateRange,
    ) -> Result<Vec<MaterialExpenseBreakdown>, ClientError> {
        let request = ApiRequest::get(paths::MATERIAL_EXPENSES).query_pairs(range.query_pairs());
        self.send(&request).await?.json()
    }

    /// GET /api/analytics/weekly-summary/ - Seven days ending on `end_date`.
    pub async fn weekly_summary(&self, end_date: NaiveDate) -> Result<WeeklySummary, ClientError> {
        let request = ApiRequest::get(paths::WEEKLY_SUMMARY).query("end_date", date_param(end_date));
        self.send(&request).await?.json()
    }

    /// GET /api/analytics/shift-report/ - Totals for one shift of one day.
    pub async fn shift_report(&self, date: NaiveDate, shift: Shift) -> Result<ShiftReport, ClientError> {
        let request = ApiRequest::get(paths::SHIFT_REPORT)
            .query("date", date_param(date))
            .query("shift", shift.as_str());
        self.send(&request).await?.json()
    }
}
