use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

use crate::{
    error::AppError,
    models::{CurrentCustomer, session_keys},
};

/// Loads the logged-in customer from the session cookie and hands it to the
/// protected handlers as an extension. Unauthenticated requests get 401 with
/// the login-required warning.
pub async fn auth_middleware(
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let customer: CurrentCustomer = session
        .get(session_keys::CURRENT_CUSTOMER)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Você precisa fazer login.".to_string()))?;

    req.extensions_mut().insert(customer);

    Ok(next.run(req).await)
}
