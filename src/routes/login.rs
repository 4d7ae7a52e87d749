use axum::{Json, extract::State};
use serde_json::{Value, json};
use tower_sessions::Session;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{AuthResponse, CurrentCustomer, LoginRequest, session_keys},
    queries::customer_queries,
    utils::phone,
};

const INVALID_CREDENTIALS: &str = "Telefone ou senha inválidos.";

/// Unknown phone, wrong password and deactivated account all get the same
/// generic message, so the response does not reveal which phones exist.
pub async fn login_customer(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let normalized_phone = phone::normalize(&payload.phone);

    let customer = customer_queries::find_by_phone(&state.db, &normalized_phone)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !customer.is_active {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let is_valid = bcrypt::verify(&payload.password, &customer.password)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))?;

    if !is_valid {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    session.cycle_id().await?;
    session
        .insert(
            session_keys::CURRENT_CUSTOMER,
            CurrentCustomer {
                id: customer.id,
                name: customer.name.clone(),
                phone: customer.phone.clone(),
            },
        )
        .await?;

    let message = format!("Bem-vindo(a), {}!", customer.name);

    Ok(Json(AuthResponse {
        message,
        customer: customer.into(),
    }))
}

pub async fn logout_customer(session: Session) -> Result<Json<Value>> {
    session.flush().await?;

    Ok(Json(json!({ "message": "Sessão encerrada." })))
}
