//! Menu models: dishes, categories and add-ons.

use serde::{Deserialize, Serialize};

pub type DishId = i64;
pub type CategoryId = i64;
pub type AddonId = i64;

/// Meal slot a dish is sold in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Snacks,
    Dinner,
    AllDay,
    #[serde(other)]
    Other,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Snacks => "snacks",
            MealType::Dinner => "dinner",
            MealType::AllDay => "all_day",
            MealType::Other => "other",
        }
    }
}

/// A dish as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dish {
    pub id: DishId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_name: Option<String>,
    pub price: f64,
    pub category: CategoryId,
    pub meal_type: MealType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Position inside its category
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// A menu category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub display_order: i32,
}

/// An optional extra sold alongside the main order, independent of meal time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Addon {
    pub id: AddonId,
    pub name: String,
    pub price: f64,
}

/// Image attached to a multipart dish request.
#[derive(Debug, Clone)]
pub struct DishImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fields for creating a dish. Sent as a multipart form.
#[derive(Debug, Clone)]
pub struct CreateDishRequest {
    pub name: String,
    pub secondary_name: Option<String>,
    pub price: f64,
    pub category: CategoryId,
    pub meal_type: MealType,
    pub image: Option<DishImage>,
}

/// Body of a price update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateDishPriceRequest {
    pub price: f64,
}

/// New order of dishes inside one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReorderDishesRequest {
    pub category_id: CategoryId,
    pub dish_ids: Vec<DishId>,
}
