mod account;
mod cart;
mod checkout;
mod health;
mod home;
mod login;
mod products;
mod register;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    let public = Router::new()
        .route("/", get(home::home))
        .route("/menu", get(home::menu))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/products/{id}", get(products::get_product))
        .route("/category/{category}", get(products::get_category))
        .route("/register", post(register::register_customer))
        .route("/login", post(login::login_customer))
        .route("/logout", get(login::logout_customer).post(login::logout_customer));

    let protected = Router::new()
        .route("/cart", get(cart::view_cart))
        .route("/cart/add/{product_id}", post(cart::add_to_cart))
        .route("/cart/edit/{product_id}", post(cart::edit_cart_item))
        .route("/cart/remove/{item_id}", post(cart::remove_cart_item))
        .route("/cart/increment/{item_id}", post(cart::increment_cart_item))
        .route("/cart/decrement/{item_id}", post(cart::decrement_cart_item))
        .route("/checkout", get(checkout::checkout))
        .route("/checkout/process", post(checkout::process_checkout))
        .route("/account", get(account::get_account))
        .route("/account/orders", get(account::get_orders))
        .route("/account/addresses", post(account::add_address))
        .layer(middleware::from_fn(crate::middleware::auth_middleware));

    public.merge(protected)
}
