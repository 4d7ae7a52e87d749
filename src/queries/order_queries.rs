use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    error::Result,
    models::{CartLine, DeliveryType, Order, OrderItem, PaymentMethod},
};

/// Creates the order header and its items from the caller's cart, then
/// clears the cart, all inside one transaction. Each item copies the
/// product's current price as a permanent snapshot. Returns `None` when
/// the cart is empty or absent, with nothing written.
pub async fn place_order(
    pool: &PgPool,
    customer_id: i32,
    address_id: Option<i32>,
    payment_method: PaymentMethod,
    delivery_type: DeliveryType,
) -> Result<Option<Order>> {
    let mut tx = pool.begin().await?;

    let lines = sqlx::query_as::<_, CartLine>(
        "SELECT ci.id, ci.product_id, p.name AS product_name, p.image_url,
                ci.quantity, ci.notes, p.price AS unit_price
         FROM cart_items ci
         JOIN carts c ON c.id = ci.cart_id
         JOIN products p ON p.id = ci.product_id
         WHERE c.customer_id = $1
         ORDER BY ci.id ASC",
    )
    .bind(customer_id)
    .fetch_all(&mut *tx)
    .await?;

    if lines.is_empty() {
        tx.rollback().await?;
        return Ok(None);
    }

    let total: Decimal = lines.iter().map(CartLine::subtotal).sum();

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (customer_id, address_id, payment_method, delivery_type, total)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(customer_id)
    .bind(address_id)
    .bind(payment_method)
    .bind(delivery_type)
    .bind(total)
    .fetch_one(&mut *tx)
    .await?;

    let product_ids: Vec<i32> = lines.iter().map(|line| line.product_id).collect();
    let quantities: Vec<i32> = lines.iter().map(|line| line.quantity).collect();
    let unit_prices: Vec<Decimal> = lines.iter().map(|line| line.unit_price).collect();
    let notes: Vec<Option<&str>> = lines.iter().map(|line| line.notes.as_deref()).collect();

    sqlx::query(
        "INSERT INTO order_items (order_id, product_id, quantity, unit_price, notes)
         SELECT $1, unnest($2::int[]), unnest($3::int[]), unnest($4::decimal[]), unnest($5::text[])",
    )
    .bind(order.id)
    .bind(&product_ids)
    .bind(&quantities)
    .bind(&unit_prices)
    .bind(&notes)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "DELETE FROM cart_items ci USING carts c
         WHERE ci.cart_id = c.id AND c.customer_id = $1",
    )
    .bind(customer_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(order))
}

pub async fn get_customer_orders(pool: &PgPool, customer_id: i32) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE customer_id = $1 ORDER BY created_at DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

pub async fn get_items_for_orders(pool: &PgPool, order_ids: &[i32]) -> Result<Vec<OrderItem>> {
    let items =
        sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = ANY($1)")
            .bind(order_ids)
            .fetch_all(pool)
            .await?;

    Ok(items)
}
