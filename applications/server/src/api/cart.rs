/// Cart endpoints - all gated, all scoped to the verified subject
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use ebazar_core::{CartItem, CartItemId, NewCartItem, ProductId, Store};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub product_name: String,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// POST /addtocart - add an entry to the caller's cart.
///
/// The owner is the verified subject; any owner field in the body is
/// ignored, so a caller cannot write into someone else's cart.
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<CartItem>> {
    let item = state
        .db
        .add_cart_item(NewCartItem {
            email: auth.email().to_string(),
            product_id: ProductId::new(body.product_id),
            product_name: body.product_name,
            price: body.price,
        })
        .await?;

    Ok(Json(item))
}

/// GET /cart?email= - the caller's cart, newest entries first.
///
/// The email parameter must match the verified subject; the query runs
/// against the subject either way.
pub async fn get_cart(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<CartQuery>,
) -> Result<Json<Vec<CartItem>>> {
    auth.require_owner(&query.email)?;

    Ok(Json(state.db.cart_for(auth.email()).await?))
}

/// DELETE /cart/:id - remove a cart entry the caller owns.
///
/// A missing entry reports `{"success": false}` rather than erroring;
/// an entry owned by someone else is rejected like any other
/// authorization failure.
pub async fn remove_from_cart(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = CartItemId::new(id);

    let Some(item) = state.db.get_cart_item(&id).await? else {
        return Ok(Json(DeleteResponse { success: false }));
    };
    auth.require_owner(&item.email)?;

    let success = state.db.remove_cart_item(&id).await?;
    Ok(Json(DeleteResponse { success }))
}
