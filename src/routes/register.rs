use axum::{Json, extract::State};
use tower_sessions::Session;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{AuthResponse, CurrentCustomer, RegisterRequest, session_keys},
    queries::customer_queries,
    utils::phone,
};

pub async fn register_customer(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let normalized_phone = validate_registration(&payload)?;

    if customer_queries::find_by_phone(&state.db, &normalized_phone)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Este telefone já está cadastrado.".to_string(),
        ));
    }

    let email = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty());

    if let Some(email) = email {
        if customer_queries::find_by_email(&state.db, email).await?.is_some() {
            return Err(AppError::Conflict(
                "Este email já está cadastrado.".to_string(),
            ));
        }
    }

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    let customer = customer_queries::create_with_addresses(
        &state.db,
        &normalized_phone,
        payload.name.trim(),
        email,
        &password_hash,
        &payload.addresses,
    )
    .await?;

    // Log the new customer in right away
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

    let address_count = payload.addresses.len();
    let message = format!(
        "Bem-vindo(a), {}! Cadastro realizado com {} endereço(s).",
        customer.name, address_count
    );

    Ok(Json(AuthResponse {
        message,
        customer: customer.into(),
    }))
}

/// Field validation; returns the normalized phone on success.
fn validate_registration(payload: &RegisterRequest) -> Result<String> {
    if payload.name.trim().is_empty() || payload.phone.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Todos os campos são obrigatórios.".to_string(),
        ));
    }

    if payload.password.is_empty() || payload.password_confirm.is_empty() {
        return Err(AppError::BadRequest(
            "Todos os campos são obrigatórios.".to_string(),
        ));
    }

    if payload.password != payload.password_confirm {
        return Err(AppError::BadRequest(
            "As senhas não coincidem.".to_string(),
        ));
    }

    if payload.password.len() != 6 || !payload.password.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "A senha deve ter exatamente 6 números.".to_string(),
        ));
    }

    if let Some(email) = payload.email.as_deref() {
        let email = email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(AppError::BadRequest("Email inválido.".to_string()));
        }
    }

    let normalized = phone::normalize(&payload.phone);
    if !phone::has_valid_length(&normalized) {
        return Err(AppError::BadRequest(
            "Telefone deve ter 10 ou 11 dígitos (com DDD).".to_string(),
        ));
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RegisterRequest {
        RegisterRequest {
            name: "Maria Silva".to_string(),
            phone: "(21) 99999-9999".to_string(),
            email: Some("maria@example.com".to_string()),
            password: "123456".to_string(),
            password_confirm: "123456".to_string(),
            addresses: vec![],
        }
    }

    #[test]
    fn valid_payload_yields_normalized_phone() {
        assert_eq!(validate_registration(&payload()).unwrap(), "21999999999");
    }

    #[test]
    fn missing_fields_are_rejected() {
        let mut p = payload();
        p.name = "   ".to_string();
        assert!(matches!(
            validate_registration(&p),
            Err(AppError::BadRequest(_))
        ));

        let mut p = payload();
        p.password = String::new();
        assert!(validate_registration(&p).is_err());
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let mut p = payload();
        p.password_confirm = "654321".to_string();
        let err = validate_registration(&p).unwrap_err();
        assert!(err.to_string().contains("não coincidem"));
    }

    #[test]
    fn password_must_be_six_digit_pin() {
        let mut p = payload();
        p.password = "12345".to_string();
        p.password_confirm = "12345".to_string();
        assert!(validate_registration(&p).is_err());

        let mut p = payload();
        p.password = "12345a".to_string();
        p.password_confirm = "12345a".to_string();
        assert!(validate_registration(&p).is_err());
    }

    #[test]
    fn phone_must_have_ten_or_eleven_digits() {
        let mut p = payload();
        p.phone = "999-9999".to_string();
        assert!(validate_registration(&p).is_err());

        let mut p = payload();
        p.phone = "(21) 3333-4444".to_string();
        assert_eq!(validate_registration(&p).unwrap(), "2133334444");
    }

    #[test]
    fn email_is_optional_but_must_look_like_one() {
        let mut p = payload();
        p.email = None;
        assert!(validate_registration(&p).is_ok());

        let mut p = payload();
        p.email = Some("not-an-email".to_string());
        assert!(validate_registration(&p).is_err());
    }
}
