/// Cart domain types
use super::ids::{CartItemId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cart entry. Belongs to exactly one user, identified by email.
/// Product data is denormalized into the entry so checkout can copy it
/// into an order without a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub email: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub price: f64,
    pub added_at: DateTime<Utc>,
}

/// Payload for adding a cart entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub email: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub price: f64,
}
