use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        AddToCartRequest, CartMessage, CartSummary, CurrentCustomer, DecrementOutcome,
        EditCartItemRequest, MAX_ITEM_QUANTITY,
    },
    queries::{cart_queries, product_queries},
};

/// Requested quantities must stay within 1..=MAX_ITEM_QUANTITY; anything
/// else is a validation error, not a storage error.
fn validate_quantity(quantity: i32) -> Result<()> {
    if quantity < 1 || quantity > MAX_ITEM_QUANTITY {
        return Err(AppError::BadRequest("Quantidade inválida.".to_string()));
    }

    Ok(())
}

pub async fn view_cart(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
) -> Result<Json<CartSummary>> {
    let lines = cart_queries::get_lines_for_customer(&state.db, customer.id).await?;

    Ok(Json(CartSummary::from_lines(lines)))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
    Path(product_id): Path<i32>,
    Json(payload): Json<AddToCartRequest>,
) -> Result<Json<CartMessage>> {
    validate_quantity(payload.quantity)?;

    let product = product_queries::find_by_id(&state.db, product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;

    if !product.active {
        return Err(AppError::BadRequest("Produto indisponível.".to_string()));
    }

    let cart = cart_queries::get_or_create_cart(&state.db, customer.id).await?;
    cart_queries::upsert_item(
        &state.db,
        cart.id,
        product.id,
        payload.quantity,
        payload.notes.as_deref(),
    )
    .await?;

    Ok(Json(CartMessage {
        message: format!("{}x {} adicionado ao carrinho!", payload.quantity, product.name),
    }))
}

pub async fn edit_cart_item(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
    Path(product_id): Path<i32>,
    Json(payload): Json<EditCartItemRequest>,
) -> Result<Json<CartMessage>> {
    validate_quantity(payload.quantity)?;

    let product = product_queries::find_by_id(&state.db, product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;

    cart_queries::update_item_by_product(
        &state.db,
        customer.id,
        product.id,
        payload.quantity,
        payload.notes.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Item não encontrado no carrinho.".to_string()))?;

    Ok(Json(CartMessage {
        message: format!("Pedido de {} atualizado!", product.name),
    }))
}

pub async fn increment_cart_item(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
    Path(item_id): Path<i32>,
) -> Result<Json<CartMessage>> {
    let item = cart_queries::increment_item(&state.db, item_id, customer.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Item não encontrado no carrinho.".to_string()))?;

    Ok(Json(CartMessage {
        message: format!("Quantidade de {} aumentada!", item.product_name),
    }))
}

pub async fn decrement_cart_item(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
    Path(item_id): Path<i32>,
) -> Result<Json<CartMessage>> {
    match cart_queries::decrement_item(&state.db, item_id, customer.id).await? {
        DecrementOutcome::Updated(item) => Ok(Json(CartMessage {
            message: format!("Quantidade de {} diminuída!", item.product_name),
        })),
        DecrementOutcome::Removed(product_name) => Ok(Json(CartMessage {
            message: format!("{} removido do carrinho!", product_name),
        })),
        DecrementOutcome::NotFound => Err(AppError::NotFound(
            "Item não encontrado no carrinho.".to_string(),
        )),
    }
}

pub async fn remove_cart_item(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
    Path(item_id): Path<i32>,
) -> Result<Json<CartMessage>> {
    let product_name = cart_queries::remove_item(&state.db, item_id, customer.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Item não encontrado no carrinho.".to_string()))?;

    Ok(Json(CartMessage {
        message: format!("{} removido do carrinho!", product_name),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_must_be_at_least_one() {
        assert!(matches!(
            validate_quantity(0),
            Err(AppError::BadRequest(_))
        ));
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1).is_ok());
    }

    #[test]
    fn oversized_quantity_is_a_validation_error_not_a_storage_error() {
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(matches!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            validate_quantity(i32::MAX),
            Err(AppError::BadRequest(_))
        ));
    }
}
