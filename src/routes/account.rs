use std::collections::HashMap;

use axum::{Extension, Json, extract::State};
use serde::Serialize;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Address, AddressInput, CurrentCustomer, CustomerResponse, OrderItem, OrderWithItems},
    queries::{address_queries, customer_queries, order_queries},
};

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub customer: CustomerResponse,
    pub addresses: Vec<Address>,
}

pub async fn get_account(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
) -> Result<Json<AccountResponse>> {
    let profile = customer_queries::find_by_id(&state.db, customer.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Você precisa fazer login.".to_string()))?;

    let addresses = address_queries::get_customer_addresses(&state.db, customer.id).await?;

    Ok(Json(AccountResponse {
        customer: profile.into(),
        addresses,
    }))
}

/// Order history with items, newest first. Items are fetched in one batch
/// and grouped here.
pub async fn get_orders(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
) -> Result<Json<Vec<OrderWithItems>>> {
    let orders = order_queries::get_customer_orders(&state.db, customer.id).await?;

    let order_ids: Vec<i32> = orders.iter().map(|order| order.id).collect();
    let all_items = order_queries::get_items_for_orders(&state.db, &order_ids).await?;

    let mut items_by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
    for item in all_items {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    let response = orders
        .into_iter()
        .map(|order| OrderWithItems {
            items: items_by_order.remove(&order.id).unwrap_or_default(),
            order,
        })
        .collect();

    Ok(Json(response))
}

pub async fn add_address(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
    Json(payload): Json<AddressInput>,
) -> Result<Json<Address>> {
    if payload.label.trim().is_empty()
        || payload.street.trim().is_empty()
        || payload.neighborhood.trim().is_empty()
        || payload.postal_code.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Todos os campos são obrigatórios.".to_string(),
        ));
    }

    let address = address_queries::add_address(&state.db, customer.id, &payload).await?;

    Ok(Json(address))
}
