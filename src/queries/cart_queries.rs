use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Cart, CartItem, CartItemWithName, CartLine, DecrementOutcome},
};

/// Carts are created lazily on the first cart interaction. The no-op
/// update makes RETURNING yield the row on conflict as well.
pub async fn get_or_create_cart(pool: &PgPool, customer_id: i32) -> Result<Cart> {
    let cart = sqlx::query_as::<_, Cart>(
        "INSERT INTO carts (customer_id) VALUES ($1)
         ON CONFLICT (customer_id) DO UPDATE SET customer_id = EXCLUDED.customer_id
         RETURNING *",
    )
    .bind(customer_id)
    .fetch_one(pool)
    .await?;

    Ok(cart)
}

/// Cart lines joined with current product data, priced at read time.
pub async fn get_lines_for_customer(pool: &PgPool, customer_id: i32) -> Result<Vec<CartLine>> {
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
    .fetch_all(pool)
    .await?;

    Ok(lines)
}

/// Create-or-increment: an existing (cart, product) line gains the requested
/// quantity, clamped to MAX_ITEM_QUANTITY so merges cannot overflow the
/// column; notes are overwritten only when non-empty.
pub async fn upsert_item(
    pool: &PgPool,
    cart_id: i32,
    product_id: i32,
    quantity: i32,
    notes: Option<&str>,
) -> Result<CartItem> {
    let item = sqlx::query_as::<_, CartItem>(
        "INSERT INTO cart_items (cart_id, product_id, quantity, notes)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (cart_id, product_id)
         DO UPDATE SET quantity = LEAST(cart_items.quantity + EXCLUDED.quantity, $5),
                       notes = COALESCE(NULLIF(EXCLUDED.notes, ''), cart_items.notes)
         RETURNING *",
    )
    .bind(cart_id)
    .bind(product_id)
    .bind(quantity)
    .bind(notes)
    .bind(crate::models::MAX_ITEM_QUANTITY)
    .fetch_one(pool)
    .await?;

    Ok(item)
}

/// Overwrites quantity and notes for the caller's line of this product.
pub async fn update_item_by_product(
    pool: &PgPool,
    customer_id: i32,
    product_id: i32,
    quantity: i32,
    notes: Option<&str>,
) -> Result<Option<CartItem>> {
    let item = sqlx::query_as::<_, CartItem>(
        "UPDATE cart_items ci SET quantity = $3, notes = $4
         FROM carts c
         WHERE ci.cart_id = c.id AND c.customer_id = $1 AND ci.product_id = $2
         RETURNING ci.*",
    )
    .bind(customer_id)
    .bind(product_id)
    .bind(quantity)
    .bind(notes)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

pub async fn find_item_by_product(
    pool: &PgPool,
    customer_id: i32,
    product_id: i32,
) -> Result<Option<CartItem>> {
    let item = sqlx::query_as::<_, CartItem>(
        "SELECT ci.* FROM cart_items ci
         JOIN carts c ON c.id = ci.cart_id
         WHERE c.customer_id = $1 AND ci.product_id = $2",
    )
    .bind(customer_id)
    .bind(product_id)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

/// Item-addressed operations join through carts so a foreign item id
/// behaves as not-found instead of touching another customer's cart.
pub async fn increment_item(
    pool: &PgPool,
    item_id: i32,
    customer_id: i32,
) -> Result<Option<CartItemWithName>> {
    let item = sqlx::query_as::<_, CartItemWithName>(
        "UPDATE cart_items ci SET quantity = ci.quantity + 1
         FROM carts c, products p
         WHERE ci.id = $1 AND c.id = ci.cart_id AND c.customer_id = $2 AND p.id = ci.product_id
         RETURNING ci.id, ci.cart_id, ci.product_id, ci.quantity, ci.notes, p.name AS product_name",
    )
    .bind(item_id)
    .bind(customer_id)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

/// Decrements by 1. A quantity-1 line is deleted so quantity never hits 0.
pub async fn decrement_item(
    pool: &PgPool,
    item_id: i32,
    customer_id: i32,
) -> Result<DecrementOutcome> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query_as::<_, CartItemWithName>(
        "UPDATE cart_items ci SET quantity = ci.quantity - 1
         FROM carts c, products p
         WHERE ci.id = $1 AND c.id = ci.cart_id AND c.customer_id = $2
               AND p.id = ci.product_id AND ci.quantity > 1
         RETURNING ci.id, ci.cart_id, ci.product_id, ci.quantity, ci.notes, p.name AS product_name",
    )
    .bind(item_id)
    .bind(customer_id)
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(item) = updated {
        tx.commit().await?;
        return Ok(DecrementOutcome::Updated(item));
    }

    let removed = sqlx::query_scalar::<_, String>(
        "DELETE FROM cart_items ci
         USING carts c, products p
         WHERE ci.id = $1 AND c.id = ci.cart_id AND c.customer_id = $2
               AND p.id = ci.product_id AND ci.quantity = 1
         RETURNING p.name",
    )
    .bind(item_id)
    .bind(customer_id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    match removed {
        Some(product_name) => Ok(DecrementOutcome::Removed(product_name)),
        None => Ok(DecrementOutcome::NotFound),
    }
}

/// Deletes the line, returning the product name when it existed.
pub async fn remove_item(
    pool: &PgPool,
    item_id: i32,
    customer_id: i32,
) -> Result<Option<String>> {
    let product_name = sqlx::query_scalar::<_, String>(
        "DELETE FROM cart_items ci
         USING carts c, products p
         WHERE ci.id = $1 AND c.id = ci.cart_id AND c.customer_id = $2 AND p.id = ci.product_id
         RETURNING p.name",
    )
    .bind(item_id)
    .bind(customer_id)
    .fetch_optional(pool)
    .await?;

    Ok(product_name)
}
