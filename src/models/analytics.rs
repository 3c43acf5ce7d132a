//! Read models for the analytics dashboards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CategoryId, MaterialId, Shift, WorkerId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub total_sales: f64,
    pub total_orders: u32,
    #[serde(default)]
    pub average_order_value: f64,
    #[serde(default)]
    pub total_expenses: f64,
    #[serde(default)]
    pub net_profit: f64,
    #[serde(default)]
    pub payment_breakdown: PaymentBreakdown,
}

/// Sales split by payment type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentBreakdown {
    #[serde(default)]
    pub cash: f64,
    #[serde(default)]
    pub upi: f64,
    #[serde(default)]
    pub card: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryPerformance {
    pub category_id: CategoryId,
    pub category_name: String,
    pub quantity_sold: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyTrendPoint {
    /// Hour of day, 0-23, in the backend's reporting zone
    pub hour: u8,
    pub orders: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub sales: f64,
    pub orders: u32,
    #[serde(default)]
    pub expenses: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayComparison {
    pub today: DaySnapshot,
    pub yesterday: DaySnapshot,
}

impl DayComparison {
    /// Relative sales change in percent; `None` when yesterday had no sales.
    pub fn sales_change_percent(&self) -> Option<f64> {
        if self.yesterday.sales == 0.0 {
            return None;
        }
        Some((self.today.sales - self.yesterday.sales) / self.yesterday.sales * 100.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkerExpenseBreakdown {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialExpenseBreakdown {
    pub material_id: MaterialId,
    pub material_name: String,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklySummary {
    pub days: Vec<DaySnapshot>,
    pub total_sales: f64,
    pub total_expenses: f64,
    pub total_orders: u32,
}

impl WeeklySummary {
    /// The day with the highest sales.
    pub fn best_day(&self) -> Option<&DaySnapshot> {
        self.days
            .iter()
            .max_by(|a, b| a.sales.total_cmp(&b.sales))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShiftReport {
    pub date: NaiveDate,
    pub shift: Shift,
    pub total_orders: u32,
    pub total_sales: f64,
    #[serde(default)]
    pub total_expenses: f64,
    #[serde(default)]
    pub payment_breakdown: PaymentBreakdown,
}

impl ShiftReport {
    pub fn net(&self) -> f64 {
        self.total_sales - self.total_expenses
    }
}
