//! Database-backed tests for cart merging and checkout semantics.
//!
//! These exercise the SQL paths directly: the create-or-increment upsert,
//! the decrement-or-delete rule, and the transactional order snapshot.
//! `#[sqlx::test]` provisions a fresh database per test and applies the
//! embedded migrations.

use gustu_back::models::{
    DecrementOutcome, DeliveryType, OrderStatus, PaymentMethod, MAX_ITEM_QUANTITY,
};
use gustu_back::queries::{cart_queries, order_queries};
use rust_decimal::{Decimal, dec};
use sqlx::PgPool;

async fn seed_customer(pool: &PgPool, phone: &str) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO customers (phone, name, password) VALUES ($1, 'Maria Silva', 'hash') RETURNING id",
    )
    .bind(phone)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_product(pool: &PgPool, name: &str, price: Decimal) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO products (name, price, category) VALUES ($1, $2, 'sweet') RETURNING id",
    )
    .bind(name)
    .bind(price)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test]
async fn adding_same_product_twice_merges_into_one_line(pool: PgPool) {
    let customer_id = seed_customer(&pool, "21999999999").await;
    let product_id = seed_product(&pool, "Coxinha", dec!(4.00)).await;

    let cart = cart_queries::get_or_create_cart(&pool, customer_id).await.unwrap();
    cart_queries::upsert_item(&pool, cart.id, product_id, 2, Some("sem cebola"))
        .await
        .unwrap();

    // Second add reuses the lazily created cart and the existing line
    let cart_again = cart_queries::get_or_create_cart(&pool, customer_id).await.unwrap();
    assert_eq!(cart_again.id, cart.id);

    let item = cart_queries::upsert_item(&pool, cart.id, product_id, 3, Some("sem cebola"))
        .await
        .unwrap();
    assert_eq!(item.quantity, 5);

    let lines = cart_queries::get_lines_for_customer(&pool, customer_id)
        .await
        .unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 5);
    assert_eq!(lines[0].subtotal(), dec!(20.00));
}

#[sqlx::test]
async fn merged_quantity_is_clamped_instead_of_overflowing(pool: PgPool) {
    let customer_id = seed_customer(&pool, "21999999999").await;
    let product_id = seed_product(&pool, "Coxinha", dec!(4.00)).await;

    let cart = cart_queries::get_or_create_cart(&pool, customer_id).await.unwrap();
    cart_queries::upsert_item(&pool, cart.id, product_id, MAX_ITEM_QUANTITY, None)
        .await
        .unwrap();

    let item = cart_queries::upsert_item(&pool, cart.id, product_id, MAX_ITEM_QUANTITY, None)
        .await
        .unwrap();
    assert_eq!(item.quantity, MAX_ITEM_QUANTITY);
}

#[sqlx::test]
async fn decrementing_a_quantity_one_line_removes_it(pool: PgPool) {
    let customer_id = seed_customer(&pool, "21999999999").await;
    let product_id = seed_product(&pool, "Brigadeiro", dec!(2.50)).await;

    let cart = cart_queries::get_or_create_cart(&pool, customer_id).await.unwrap();
    let item = cart_queries::upsert_item(&pool, cart.id, product_id, 2, None)
        .await
        .unwrap();

    let outcome = cart_queries::decrement_item(&pool, item.id, customer_id)
        .await
        .unwrap();
    match outcome {
        DecrementOutcome::Updated(updated) => assert_eq!(updated.quantity, 1),
        other => panic!("expected updated line, got {:?}", other),
    }

    let outcome = cart_queries::decrement_item(&pool, item.id, customer_id)
        .await
        .unwrap();
    match outcome {
        DecrementOutcome::Removed(product_name) => assert_eq!(product_name, "Brigadeiro"),
        other => panic!("expected removed line, got {:?}", other),
    }

    let lines = cart_queries::get_lines_for_customer(&pool, customer_id)
        .await
        .unwrap();
    assert!(lines.is_empty());

    // A third decrement finds nothing to touch
    let outcome = cart_queries::decrement_item(&pool, item.id, customer_id)
        .await
        .unwrap();
    assert!(matches!(outcome, DecrementOutcome::NotFound));
}

#[sqlx::test]
async fn order_snapshot_survives_later_price_changes(pool: PgPool) {
    let customer_id = seed_customer(&pool, "21999999999").await;
    let product_id = seed_product(&pool, "Pão de Queijo", dec!(3.50)).await;

    let cart = cart_queries::get_or_create_cart(&pool, customer_id).await.unwrap();
    cart_queries::upsert_item(&pool, cart.id, product_id, 2, None)
        .await
        .unwrap();

    let order = order_queries::place_order(
        &pool,
        customer_id,
        None,
        PaymentMethod::Pix,
        DeliveryType::Pickup,
    )
    .await
    .unwrap()
    .expect("non-empty cart must produce an order");

    assert_eq!(order.total, dec!(7.00));
    assert_eq!(order.status, OrderStatus::Pending);

    // Checkout cleared the cart in the same transaction
    let lines = cart_queries::get_lines_for_customer(&pool, customer_id)
        .await
        .unwrap();
    assert!(lines.is_empty());

    sqlx::query("UPDATE products SET price = $1 WHERE id = $2")
        .bind(dec!(10.00))
        .bind(product_id)
        .execute(&pool)
        .await
        .unwrap();

    let orders = order_queries::get_customer_orders(&pool, customer_id)
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total, dec!(7.00));

    let items = order_queries::get_items_for_orders(&pool, &[order.id])
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].unit_price, dec!(3.50));
    assert_eq!(items[0].quantity, 2);
}

#[sqlx::test]
async fn empty_cart_checkout_creates_nothing(pool: PgPool) {
    let customer_id = seed_customer(&pool, "21999999999").await;

    // No cart at all
    let order = order_queries::place_order(
        &pool,
        customer_id,
        None,
        PaymentMethod::Cash,
        DeliveryType::Pickup,
    )
    .await
    .unwrap();
    assert!(order.is_none());

    // A cart that exists but holds no lines behaves the same
    cart_queries::get_or_create_cart(&pool, customer_id).await.unwrap();
    let order = order_queries::place_order(
        &pool,
        customer_id,
        None,
        PaymentMethod::Cash,
        DeliveryType::Pickup,
    )
    .await
    .unwrap();
    assert!(order.is_none());

    let order_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(order_count, 0);

    let item_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(item_count, 0);
}
