//! Backend endpoint bindings.
//!
//! One method per endpoint on [`ApiClient`](crate::http::ApiClient), grouped by
//! area. Each method builds its request, sends it through the authenticated
//! wrapper and decodes the response into its schema.

mod analytics;
mod auth;
mod dishes;
mod expenses;
mod orders;

pub use orders::OrderReceipt;

/// Endpoint paths relative to the base URL.
pub mod paths {
    pub const LOGIN: &str = "/api/auth/login/";

    pub const DISHES: &str = "/api/dishes/";
    pub const DISH_REORDER: &str = "/api/dishes/reorder/";
    pub const CATEGORIES: &str = "/api/categories/";
    pub const ADDONS: &str = "/api/addons/";

    pub const ORDERS: &str = "/api/orders/";
    pub const ORDER_HISTORY: &str = "/api/orders/history/";

    pub const WORKERS: &str = "/api/workers/";
    pub const MATERIALS: &str = "/api/materials/";
    pub const EXPENSES: &str = "/api/expenses/";

    pub const DASHBOARD: &str = "/api/analytics/dashboard/";
    pub const CATEGORY_PERFORMANCE: &str = "/api/analytics/category-performance/";
    pub const HOURLY_TREND: &str = "/api/analytics/hourly-trend/";
    pub const DAY_COMPARISON: &str = "/api/analytics/day-comparison/";
    pub const WORKER_EXPENSES: &str = "/api/analytics/worker-expenses/";
    pub const MATERIAL_EXPENSES: &str = "/api/analytics/material-expenses/";
    pub const WEEKLY_SUMMARY: &str = "/api/analytics/weekly-summary/";
    pub const SHIFT_REPORT: &str = "/api/analytics/shift-report/";

    /// Path of a single resource under a collection path.
    pub fn item(collection: &str, id: i64) -> String {
        format!("{}{}/", collection, id)
    }
}

#[cfg(test)]
mod tests {
    use super::paths;

    #[test]
    fn test_item_path() {
        assert_eq!(paths::item(paths::DISHES, 12), "/api/dishes/12/");
        assert_eq!(paths::item(paths::EXPENSES, 3), "/api/expenses/3/");
    }
}
