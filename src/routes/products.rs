use axum::{
    Json,
    extract::{Path, State},
};
use tower_sessions::Session;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        Category, CategoryResponse, CurrentCustomer, ProductDetailResponse, session_keys,
    },
    queries::{cart_queries, product_queries},
};

/// Product detail. When a session is present, includes the caller's
/// existing cart line for this product.
pub async fn get_product(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<ProductDetailResponse>> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .filter(|product| product.active)
        .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;

    let customer: Option<CurrentCustomer> =
        session.get(session_keys::CURRENT_CUSTOMER).await?;

    let cart_item = match customer {
        Some(customer) => {
            cart_queries::find_item_by_product(&state.db, customer.id, product.id).await?
        }
        None => None,
    };

    Ok(Json(ProductDetailResponse { product, cart_item }))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(category): Path<Category>,
) -> Result<Json<CategoryResponse>> {
    let products = product_queries::get_by_category(&state.db, category, None).await?;

    Ok(Json(CategoryResponse { category, products }))
}
