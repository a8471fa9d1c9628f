/// HTTP API - route table and handlers
pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

use crate::{
    middleware::{auth_middleware, require_admin},
    state::AppState,
};
use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full application router.
///
/// Three tiers: public routes, owner-gated routes behind the bearer
/// token middleware, and admin routes behind the token middleware plus
/// a store-backed role check.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(health::root))
        .route("/jwt", post(auth::issue_token))
        .route("/adduser", post(users::register))
        .route("/products", get(products::list_products))
        .route("/totalProducts", get(products::total_products))
        .route("/product/:id", get(products::get_product));

    let gated = Router::new()
        .route("/addtocart", post(cart::add_to_cart))
        .route("/cart", get(cart::get_cart))
        .route("/cart/:id", delete(cart::remove_from_cart))
        .route("/checkout", post(orders::checkout))
        .route("/orders/:email", get(orders::list_orders))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    // Layers run outermost-last, so the token check wraps the role check.
    let admin = Router::new()
        .route("/allorders", get(orders::all_orders))
        .route("/customers", get(users::list_customers))
        .layer(from_fn_with_state(state.clone(), require_admin))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    public
        .merge(gated)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
