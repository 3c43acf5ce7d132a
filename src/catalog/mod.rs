//! In-memory menu lookup and filtering.
//!
//! Catalogs hold tens to low hundreds of dishes, so every helper here is a
//! linear scan over the slice it is given.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveTime;

use crate::models::{Category, CategoryId, Dish, DishId, MealType};

/// Id-indexed view over the dish list fetched from the backend.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dishes: Vec<Dish>,
    index: HashMap<DishId, usize>,
}

impl Catalog {
    pub fn new(dishes: Vec<Dish>) -> Self {
        let index = dishes
            .iter()
            .enumerate()
            .map(|(position, dish)| (dish.id, position))
            .collect();
        Self { dishes, index }
    }

    pub fn get(&self, id: DishId) -> Option<&Dish> {
        self.index.get(&id).map(|&position| &self.dishes[position])
    }

    pub fn price_of(&self, id: DishId) -> Option<f64> {
        self.get(id).map(|dish| dish.price)
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

/// Time-of-day window; `end` before `start` wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl MealWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time < self.end
        } else {
            time >= self.start || time < self.end
        }
    }
}

/// Serving windows per meal type.
#[derive(Debug, Clone)]
pub struct MealSchedule {
    windows: Vec<(MealType, MealWindow)>,
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl Default for MealSchedule {
    fn default() -> Self {
        Self {
            windows: vec![
                (MealType::Breakfast, MealWindow::new(hm(6, 0), hm(11, 0))),
                (MealType::Lunch, MealWindow::new(hm(11, 0), hm(16, 0))),
                (MealType::Snacks, MealWindow::new(hm(16, 0), hm(19, 0))),
                (MealType::Dinner, MealWindow::new(hm(19, 0), hm(2, 0))),
            ],
        }
    }
}

impl MealSchedule {
    pub fn new(windows: Vec<(MealType, MealWindow)>) -> Self {
        Self { windows }
    }

    /// Whether a dish of the given meal type is served at `time`.
    pub fn serves(&self, meal_type: MealType, time: NaiveTime) -> bool {
        meal_type == MealType::AllDay
            || self
                .windows
                .iter()
                .any(|(meal, window)| *meal == meal_type && window.contains(time))
    }

    /// Meal types whose window contains `time`.
    pub fn active_meals(&self, time: NaiveTime) -> Vec<MealType> {
        self.windows
            .iter()
            .filter(|(_, window)| window.contains(time))
            .map(|(meal, _)| *meal)
            .collect()
    }
}

/// Dishes served at `time`; all-day dishes always pass.
pub fn filter_by_meal_time<'a>(
    dishes: &'a [Dish],
    schedule: &MealSchedule,
    time: NaiveTime,
) -> Vec<&'a Dish> {
    dishes
        .iter()
        .filter(|dish| schedule.serves(dish.meal_type, time))
        .collect()
}

/// Case-insensitive substring match on the primary and secondary names.
///
/// A blank query returns every dish.
pub fn search<'a>(dishes: &'a [Dish], query: &str) -> Vec<&'a Dish> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return dishes.iter().collect();
    }

    dishes
        .iter()
        .filter(|dish| {
            dish.name.to_lowercase().contains(&needle)
                || dish
                    .secondary_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn filter_by_category(dishes: &[Dish], category_id: CategoryId) -> Vec<&Dish> {
    dishes
        .iter()
        .filter(|dish| dish.category == category_id)
        .collect()
}

/// Dishes the kitchen can currently serve.
pub fn filter_available(dishes: &[Dish]) -> Vec<&Dish> {
    dishes.iter().filter(|dish| dish.is_available).collect()
}

/// Menu order of dishes: `display_order`, then name.
fn display_cmp(a: &Dish, b: &Dish) -> Ordering {
    a.display_order
        .cmp(&b.display_order)
        .then_with(|| a.name.cmp(&b.name))
}

/// Dishes of one category in menu order.
fn category_members(dishes: &[Dish], category_id: CategoryId) -> Vec<&Dish> {
    let mut members = filter_by_category(dishes, category_id);
    members.sort_by(|a, b| display_cmp(a, b));
    members
}

/// Dishes grouped under their categories, both in display order.
///
/// Categories without dishes are kept so they still render as empty sections.
pub fn group_by_category<'a>(
    dishes: &'a [Dish],
    categories: &'a [Category],
) -> Vec<(&'a Category, Vec<&'a Dish>)> {
    let mut ordered: Vec<&Category> = categories.iter().collect();
    ordered.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    });

    ordered
        .into_iter()
        .map(|category| {
            (category, category_members(dishes, category.id))
        })
        .collect()
}

/// Id order of a category after moving `dish_id` to `new_index`.
///
/// `new_index` is clamped to the category size. Returns `None` when the dish
/// is not in the category.
pub fn reorder_within_category(
    dishes: &[Dish],
    category_id: CategoryId,
    dish_id: DishId,
    new_index: usize,
) -> Option<Vec<DishId>> {
    let mut ids: Vec<DishId> = category_members(dishes, category_id)
        .iter()
        .map(|dish| dish.id)
        .collect();
    let current = ids.iter().position(|&id| id == dish_id)?;
    let moved = ids.remove(current);
    ids.insert(new_index.min(ids.len()), moved);
    Some(ids)
}
