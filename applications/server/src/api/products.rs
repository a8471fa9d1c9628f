/// Product catalog endpoints
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use ebazar_core::{Product, ProductId, Store};
use serde::{Deserialize, Serialize};

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalProducts {
    pub total_products: u64,
}

/// GET /products?page=&limit= - one page of the catalog.
///
/// Pages are 1-based; a page past the end is an empty list, not an
/// error.
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let limit = query.limit;
    let offset = (query.page.max(1) - 1).saturating_mul(limit);

    let products = state.db.list_products(limit, offset).await?;
    Ok(Json(products))
}

/// GET /totalProducts - catalog size, for client-side pager math
pub async fn total_products(State(state): State<AppState>) -> Result<Json<TotalProducts>> {
    let total = state.db.count_products().await?;
    Ok(Json(TotalProducts {
        total_products: total,
    }))
}

/// GET /product/:id - a single product, or JSON `null` when the id is
/// unknown. Absence is data here, not an error.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Product>>> {
    let product = state.db.get_product(&ProductId::new(id)).await?;
    Ok(Json(product))
}
