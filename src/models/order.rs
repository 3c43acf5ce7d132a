//! Order models: the submission payload and history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AddonId, DishId};

pub type OrderId = i64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    DineIn,
    Delivery,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    Upi,
    Card,
}

/// One dish line of a submitted order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub dish_id: DishId,
    pub quantity: u32,
}

/// An add-on as selected in the draft and sent with the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedAddon {
    pub id: AddonId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl SelectedAddon {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Body of `POST /api/orders/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewOrder {
    pub items: Vec<OrderItem>,
    pub addons: Vec<SelectedAddon>,
    pub total_amount: f64,
    pub order_type: OrderType,
    pub payment_type: PaymentType,
}

/// Backend acknowledgement of a created order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedOrder {
    pub id: OrderId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A dish line as reported by order history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecordItem {
    pub dish_id: DishId,
    pub dish_name: String,
    pub quantity: u32,
    pub price: f64,
}

/// A past order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub items: Vec<OrderRecordItem>,
    #[serde(default)]
    pub addons: Vec<SelectedAddon>,
    pub total_amount: f64,
    pub order_type: OrderType,
    pub payment_type: PaymentType,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_wire_shape() {
        let order = NewOrder {
            items: vec![OrderItem {
                dish_id: 3,
                quantity: 2,
            }],
            addons: vec![],
            total_amount: 160.0,
            order_type: OrderType::DineIn,
            payment_type: PaymentType::Upi,
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["order_type"], "dine_in");
        assert_eq!(value["payment_type"], "upi");
        assert_eq!(value["items"][0]["dish_id"], 3);
    }

    #[test]
    fn test_order_record_created_at_is_utc() {
        let record: OrderRecord = serde_json::from_str(
            r#"{
                "id": 11,
                "items": [{"dish_id": 1, "dish_name": "Idli", "quantity": 2, "price": 30.0}],
                "total_amount": 60.0,
                "order_type": "delivery",
                "payment_type": "cash",
                "created_at": "2026-03-01T18:30:00+05:30"
            }"#,
        )
        .unwrap();

        assert!(record.addons.is_empty());
        assert_eq!(record.created_at.to_rfc3339(), "2026-03-01T13:00:00+00:00");
    }
}
