//! Order endpoints and draft submission.

use super::paths;
use crate::cart::{format_amount, OrderDraft};
use crate::catalog::Catalog;
use crate::errors::ClientError;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{
    CreatedOrder, DateRange, NewOrder, OrderId, OrderRecord, OrderType, PaymentType,
};
use crate::session::TokenStore;
use crate::state::Notice;

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub total_amount: f64,
    pub message: Option<String>,
}

impl OrderReceipt {
    pub fn notice(&self) -> Notice {
        let text = match &self.message {
            Some(message) => format!("Order #{} placed: {}", self.order_id, message),
            None => format!(
                "Order #{} placed ({})",
                self.order_id,
                format_amount(self.total_amount)
            ),
        };
        Notice::success(text)
    }
}

impl<S: TokenStore> ApiClient<S> {
    /// POST /api/orders/ - Create an order from a ready payload.
    pub async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder, ClientError> {
        let request = ApiRequest::post(paths::ORDERS).json(order)?;
        self.send(&request).await?.json()
    }

    /// Submit the draft exactly once.
    ///
    /// An empty draft is rejected before any request. On success the draft is
    /// reset; on failure it is left untouched so the user can resubmit.
    #[tracing::instrument(skip(self, draft, catalog))]
    pub async fn submit_order(
        &self,
        draft: &mut OrderDraft,
        catalog: &Catalog,
        order_type: OrderType,
        payment_type: PaymentType,
    ) -> Result<OrderReceipt, ClientError> {
        let order = draft.to_new_order(catalog, order_type, payment_type)?;

        match self.create_order(&order).await {
            Ok(created) => {
                draft.reset();
                tracing::info!(
                    order_id = created.id,
                    total = %format_amount(order.total_amount),
                    "Order placed"
                );
                Ok(OrderReceipt {
                    order_id: created.id,
                    total_amount: order.total_amount,
                    message: created.message,
                })
            }
            Err(e) => {
                tracing::warn!("Order submission failed, draft kept: {}", e);
                Err(e)
            }
        }
    }

    /// GET /api/orders/history/ - Orders created inside a UTC range.
    pub async fn order_history(&self, range: &DateRange) -> Result<Vec<OrderRecord>, ClientError> {
        let request = ApiRequest::get(paths::ORDER_HISTORY).query_pairs(range.query_pairs());
        self.send(&request).await?.json()
    }
}
