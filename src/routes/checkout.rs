use axum::{
    Extension, Json,
    extract::State,
};
use serde::Serialize;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        Address, CartSummary, CheckoutRequest, CurrentCustomer, CustomerResponse, DeliveryType,
        OrderResponse,
    },
    queries::{address_queries, cart_queries, customer_queries, order_queries},
};

#[derive(Debug, Serialize)]
pub struct CheckoutPageResponse {
    pub cart: CartSummary,
    pub addresses: Vec<Address>,
    pub customer: CustomerResponse,
}

/// First checkout phase: validates the cart is non-empty and returns
/// everything the payment page needs.
pub async fn checkout(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
) -> Result<Json<CheckoutPageResponse>> {
    let lines = cart_queries::get_lines_for_customer(&state.db, customer.id).await?;

    if lines.is_empty() {
        return Err(AppError::BadRequest("Seu carrinho está vazio!".to_string()));
    }

    let addresses = address_queries::get_customer_addresses(&state.db, customer.id).await?;
    let profile = customer_queries::find_by_id(&state.db, customer.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Você precisa fazer login.".to_string()))?;

    Ok(Json(CheckoutPageResponse {
        cart: CartSummary::from_lines(lines),
        addresses,
        customer: profile.into(),
    }))
}

/// Second phase: creates the order and its items from the cart and clears
/// the cart, as a single transaction.
pub async fn process_checkout(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<OrderResponse>> {
    let address_id = validate_delivery_address(&payload)?;

    let address_id = match address_id {
        Some(id) => {
            let address = address_queries::find_by_id_for_customer(&state.db, id, customer.id)
                .await?
                .ok_or_else(|| AppError::NotFound("Endereço não encontrado.".to_string()))?;
            Some(address.id)
        }
        None => None,
    };

    let order = order_queries::place_order(
        &state.db,
        customer.id,
        address_id,
        payload.payment_method,
        payload.delivery_type,
    )
    .await?
    .ok_or_else(|| AppError::BadRequest("Seu carrinho está vazio!".to_string()))?;

    tracing::info!("Order #{} placed by customer {}", order.id, customer.id);

    Ok(Json(OrderResponse {
        message: format!("Pedido #{} realizado com sucesso!", order.id),
        order,
    }))
}

/// Delivery needs a selected address; pickup ignores whatever was sent.
fn validate_delivery_address(payload: &CheckoutRequest) -> Result<Option<i32>> {
    match payload.delivery_type {
        DeliveryType::Delivery => payload
            .address_id
            .map(Some)
            .ok_or_else(|| {
                AppError::BadRequest("Selecione um endereço para entrega.".to_string())
            }),
        DeliveryType::Pickup => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;

    fn request(delivery_type: DeliveryType, address_id: Option<i32>) -> CheckoutRequest {
        CheckoutRequest {
            address_id,
            payment_method: PaymentMethod::Pix,
            delivery_type,
        }
    }

    #[test]
    fn delivery_requires_an_address() {
        let err = validate_delivery_address(&request(DeliveryType::Delivery, None)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let address_id =
            validate_delivery_address(&request(DeliveryType::Delivery, Some(7))).unwrap();
        assert_eq!(address_id, Some(7));
    }

    #[test]
    fn pickup_ignores_any_address() {
        let address_id =
            validate_delivery_address(&request(DeliveryType::Pickup, Some(7))).unwrap();
        assert_eq!(address_id, None);

        let address_id = validate_delivery_address(&request(DeliveryType::Pickup, None)).unwrap();
        assert_eq!(address_id, None);
    }
}
