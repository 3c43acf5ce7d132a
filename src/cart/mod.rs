//! Order draft held by the billing screen.
//!
//! The draft maps dish ids to quantities and add-on ids to selected add-on
//! records. Quantities are always positive: setting zero or less removes the
//! entry. Totals accumulate in `f64` and are only rounded by [`format_amount`].

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::errors::ClientError;
use crate::models::{
    Addon, AddonId, DishId, NewOrder, OrderItem, OrderType, PaymentType, SelectedAddon,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    items: BTreeMap<DishId, u32>,
    addons: BTreeMap<AddonId, SelectedAddon>,
}

fn clamp_quantity(quantity: i64) -> Option<u32> {
    if quantity <= 0 {
        None
    } else {
        Some(u32::try_from(quantity).unwrap_or(u32::MAX))
    }
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a dish quantity; zero or negative removes the dish.
    pub fn set_quantity(&mut self, dish_id: DishId, quantity: i64) {
        match clamp_quantity(quantity) {
            Some(quantity) => {
                self.items.insert(dish_id, quantity);
            }
            None => {
                self.items.remove(&dish_id);
            }
        }
    }

    pub fn quantity(&self, dish_id: DishId) -> u32 {
        self.items.get(&dish_id).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, dish_id: DishId) {
        let next = i64::from(self.quantity(dish_id)) + 1;
        self.set_quantity(dish_id, next);
    }

    pub fn decrement(&mut self, dish_id: DishId) {
        let next = i64::from(self.quantity(dish_id)) - 1;
        self.set_quantity(dish_id, next);
    }

    /// Select an add-on, or bump its quantity if already selected.
    pub fn add_addon(&mut self, addon: &Addon) {
        self.addons
            .entry(addon.id)
            .and_modify(|selected| selected.quantity = selected.quantity.saturating_add(1))
            .or_insert_with(|| SelectedAddon {
                id: addon.id,
                name: addon.name.clone(),
                price: addon.price,
                quantity: 1,
            });
    }

    /// Upsert an add-on quantity; zero or negative removes the add-on.
    pub fn set_addon_quantity(&mut self, addon: &Addon, quantity: i64) {
        match clamp_quantity(quantity) {
            Some(quantity) => {
                self.addons.insert(
                    addon.id,
                    SelectedAddon {
                        id: addon.id,
                        name: addon.name.clone(),
                        price: addon.price,
                        quantity,
                    },
                );
            }
            None => {
                self.addons.remove(&addon.id);
            }
        }
    }

    pub fn remove_addon(&mut self, addon_id: AddonId) {
        self.addons.remove(&addon_id);
    }

    /// Dish entries in id order.
    pub fn items(&self) -> impl Iterator<Item = (DishId, u32)> + '_ {
        self.items.iter().map(|(&id, &quantity)| (id, quantity))
    }

    pub fn addons(&self) -> impl Iterator<Item = &SelectedAddon> + '_ {
        self.addons.values()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.addons.is_empty()
    }

    /// Number of dish units, add-ons excluded.
    pub fn item_count(&self) -> u64 {
        self.items.values().map(|&q| u64::from(q)).sum()
    }

    /// Sum of `price × quantity` over the dishes.
    ///
    /// Dishes missing from the catalog contribute nothing.
    pub fn subtotal(&self, catalog: &Catalog) -> f64 {
        self.items
            .iter()
            .map(|(&dish_id, &quantity)| match catalog.price_of(dish_id) {
                Some(price) => price * f64::from(quantity),
                None => {
                    tracing::warn!(dish_id, "Dish in draft is missing from the catalog");
                    0.0
                }
            })
            .sum()
    }

    pub fn addons_total(&self) -> f64 {
        self.addons.values().map(SelectedAddon::subtotal).sum()
    }

    pub fn total(&self, catalog: &Catalog) -> f64 {
        self.subtotal(catalog) + self.addons_total()
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.addons.clear();
    }

    /// Build the submission payload.
    pub fn to_new_order(
        &self,
        catalog: &Catalog,
        order_type: OrderType,
        payment_type: PaymentType,
    ) -> Result<NewOrder, ClientError> {
        if self.is_empty() {
            return Err(ClientError::EmptyOrder);
        }

        Ok(NewOrder {
            items: self
                .items()
                .map(|(dish_id, quantity)| OrderItem { dish_id, quantity })
                .collect(),
            addons: self.addons.values().cloned().collect(),
            total_amount: self.total(catalog),
            order_type,
            payment_type,
        })
    }
}

/// Currency amount rounded to two places for display.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dish, MealType};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn dish(id: DishId, price: f64) -> Dish {
        Dish {
            id,
            name: format!("Dish {}", id),
            secondary_name: None,
            price,
            category: 1,
            meal_type: MealType::AllDay,
            image: None,
            display_order: 0,
            is_available: true,
        }
    }

    fn addon(id: AddonId, price: f64) -> Addon {
        Addon {
            id,
            name: format!("Addon {}", id),
            price,
        }
    }

    #[test]
    fn test_worked_example_total() {
        let catalog = Catalog::new(vec![dish(1, 100.0), dish(2, 50.0)]);
        let mut draft = OrderDraft::new();
        draft.set_quantity(1, 2);
        draft.set_quantity(2, 1);
        draft.set_addon_quantity(&addon(9, 20.0), 3);

        assert_eq!(draft.total(&catalog), 310.0);
        assert_eq!(format_amount(draft.total(&catalog)), "310.00");
    }

    #[test]
    fn test_non_positive_quantity_removes() {
        let mut draft = OrderDraft::new();
        draft.set_quantity(1, 3);
        draft.set_quantity(1, 0);
        assert_eq!(draft.quantity(1), 0);
        assert!(draft.is_empty());

        draft.set_quantity(2, 4);
        draft.set_quantity(2, -5);
        assert!(draft.is_empty());

        // Removing an absent id is a no-op
        draft.set_quantity(3, -1);
        assert!(draft.is_empty());
    }

    #[test]
    fn test_positive_quantity_inserts_and_resetting_is_idempotent() {
        let catalog = Catalog::new(vec![dish(1, 12.5)]);
        let mut draft = OrderDraft::new();

        draft.set_quantity(1, 4);
        let total = draft.total(&catalog);
        draft.set_quantity(1, 4);

        assert_eq!(draft.quantity(1), 4);
        assert_eq!(draft.total(&catalog), total);
        assert_eq!(total, 50.0);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut draft = OrderDraft::new();
        draft.increment(7);
        draft.increment(7);
        assert_eq!(draft.quantity(7), 2);

        draft.decrement(7);
        draft.decrement(7);
        assert_eq!(draft.items().count(), 0);

        draft.decrement(7);
        assert_eq!(draft.quantity(7), 0);
    }

    #[test]
    fn test_addon_selection() {
        let raita = addon(1, 15.0);
        let mut draft = OrderDraft::new();

        draft.add_addon(&raita);
        draft.add_addon(&raita);
        assert_eq!(draft.addons().next().map(|a| a.quantity), Some(2));
        assert_eq!(draft.addons_total(), 30.0);

        draft.set_addon_quantity(&raita, 0);
        assert!(draft.is_empty());

        draft.add_addon(&raita);
        draft.remove_addon(raita.id);
        assert!(draft.is_empty());
    }

    #[test]
    fn test_huge_quantity_saturates() {
        let mut draft = OrderDraft::new();
        draft.set_quantity(1, i64::MAX);
        assert_eq!(draft.quantity(1), u32::MAX);
    }

    #[test]
    fn test_unknown_dish_contributes_nothing() {
        let catalog = Catalog::new(vec![dish(1, 40.0)]);
        let mut draft = OrderDraft::new();
        draft.set_quantity(1, 1);
        draft.set_quantity(99, 5);
        assert_eq!(draft.total(&catalog), 40.0);
    }

    #[test]
    fn test_empty_draft_cannot_become_an_order() {
        let draft = OrderDraft::new();
        let result = draft.to_new_order(&Catalog::default(), OrderType::DineIn, PaymentType::Cash);
        assert_eq!(result, Err(ClientError::EmptyOrder));
    }

    #[test]
    fn test_addon_only_order_is_allowed() {
        let mut draft = OrderDraft::new();
        draft.add_addon(&addon(3, 20.0));

        let order = draft
            .to_new_order(&Catalog::default(), OrderType::Delivery, PaymentType::Card)
            .unwrap();
        assert!(order.items.is_empty());
        assert_eq!(order.total_amount, 20.0);
    }

    #[test]
    fn test_reset_clears_both_maps() {
        let mut draft = OrderDraft::new();
        draft.set_quantity(1, 2);
        draft.add_addon(&addon(1, 5.0));
        draft.reset();
        assert!(draft.is_empty());
        assert_eq!(draft.item_count(), 0);
    }

    #[derive(Debug, Clone)]
    enum Edit {
        Dish(DishId, i64),
        Addon(AddonId, i64),
    }

    fn edit_strategy() -> impl Strategy<Value = Edit> {
        prop_oneof![
            (1i64..6, -3i64..12).prop_map(|(id, q)| Edit::Dish(id, q)),
            (1i64..4, -2i64..6).prop_map(|(id, q)| Edit::Addon(id, q)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_draft_matches_reference_model(edits in proptest::collection::vec(edit_strategy(), 0..40)) {
            let prices: HashMap<DishId, f64> =
                [(1, 100.0), (2, 49.99), (3, 0.1), (4, 12.25), (5, 7.0)].into_iter().collect();
            let addon_prices: HashMap<AddonId, f64> =
                [(1, 20.0), (2, 0.3), (3, 15.5)].into_iter().collect();
            let catalog = Catalog::new(prices.iter().map(|(&id, &p)| dish(id, p)).collect());

            let mut draft = OrderDraft::new();
            let mut expected_items: HashMap<DishId, u32> = HashMap::new();
            let mut expected_addons: HashMap<AddonId, u32> = HashMap::new();

            for edit in &edits {
                match *edit {
                    Edit::Dish(id, q) => {
                        draft.set_quantity(id, q);
                        if q <= 0 { expected_items.remove(&id); } else { expected_items.insert(id, q as u32); }
                    }
                    Edit::Addon(id, q) => {
                        draft.set_addon_quantity(&addon(id, addon_prices[&id]), q);
                        if q <= 0 { expected_addons.remove(&id); } else { expected_addons.insert(id, q as u32); }
                    }
                }
            }

            prop_assert!(draft.items().all(|(_, q)| q > 0));
            prop_assert!(draft.addons().all(|a| a.quantity > 0));
            prop_assert_eq!(draft.items().count(), expected_items.len());

            let expected_total: f64 = expected_items.iter().map(|(id, &q)| prices[id] * f64::from(q)).sum::<f64>()
                + expected_addons.iter().map(|(id, &q)| addon_prices[id] * f64::from(q)).sum::<f64>();
            prop_assert!((draft.total(&catalog) - expected_total).abs() < 1e-9);
        }
    }
}
