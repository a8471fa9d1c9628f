/// Checkout and order history endpoints
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use ebazar_core::{CartItemId, Order, Store};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub cart_item_id: String,
}

/// POST /checkout - convert one of the caller's cart entries into a
/// paid order.
///
/// The entry must exist (404 otherwise) and belong to the caller. The
/// store performs the removal and the order insert as one atomic step.
pub async fn checkout(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<Order>> {
    let id = CartItemId::new(body.cart_item_id);

    let item = state
        .db
        .get_cart_item(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("cart item {id} not found")))?;
    auth.require_owner(&item.email)?;

    let order = state.db.checkout(&id).await?;
    Ok(Json(order))
}

/// GET /orders/:email - the caller's order history, newest first.
///
/// The path email must match the verified subject; the query runs
/// against the subject either way.
pub async fn list_orders(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<Order>>> {
    auth.require_owner(&email)?;

    Ok(Json(state.db.orders_for(auth.email()).await?))
}

/// GET /allorders - admin-only view of every order in the store
pub async fn all_orders(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.db.all_orders().await?))
}
