use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Category, Product},
};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

/// Random sample of featured products for the home page.
pub async fn get_featured(pool: &PgPool, limit: i64) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE featured = true AND active = true ORDER BY RANDOM() LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn get_by_category(
    pool: &PgPool,
    category: Category,
    limit: Option<i64>,
) -> Result<Vec<Product>> {
    let products = match limit {
        Some(limit) => {
            sqlx::query_as::<_, Product>(
                "SELECT * FROM products WHERE category = $1 AND active = true
                 ORDER BY name ASC LIMIT $2",
            )
            .bind(category)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Product>(
                "SELECT * FROM products WHERE category = $1 AND active = true ORDER BY name ASC",
            )
            .bind(category)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(products)
}
