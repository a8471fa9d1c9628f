/// Order domain types
use super::ids::{OrderId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status stamped on every order created at checkout
pub const ORDER_STATUS_PAID: &str = "paid";

/// Completed purchase. Created only by checkout, which copies the cart
/// entry's fields and stamps `status = "paid"`. `order_time` drives the
/// descending sort of order listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub email: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub price: f64,
    pub status: String,
    pub order_time: DateTime<Utc>,
}
