use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Address, AddressInput},
};

pub async fn get_customer_addresses(pool: &PgPool, customer_id: i32) -> Result<Vec<Address>> {
    let addresses = sqlx::query_as::<_, Address>(
        "SELECT * FROM addresses WHERE customer_id = $1 ORDER BY is_principal DESC, id ASC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(addresses)
}

pub async fn find_by_id_for_customer(
    pool: &PgPool,
    id: i32,
    customer_id: i32,
) -> Result<Option<Address>> {
    let address = sqlx::query_as::<_, Address>(
        "SELECT * FROM addresses WHERE id = $1 AND customer_id = $2",
    )
    .bind(id)
    .bind(customer_id)
    .fetch_optional(pool)
    .await?;

    Ok(address)
}

/// Inserting a principal address demotes the previous principal in the
/// same transaction, so at most one stays flagged.
pub async fn add_address(
    pool: &PgPool,
    customer_id: i32,
    input: &AddressInput,
) -> Result<Address> {
    let mut tx = pool.begin().await?;

    if input.is_principal {
        sqlx::query("UPDATE addresses SET is_principal = false WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;
    }

    let address = sqlx::query_as::<_, Address>(
        "INSERT INTO addresses
         (customer_id, label, street, number, neighborhood, city, state, postal_code, reference, is_principal)
         VALUES ($1, $2, $3, COALESCE($4, 'S/N'), $5, COALESCE($6, 'Cachoeiras de Macacu'),
                 COALESCE($7, 'RJ'), $8, $9, $10)
         RETURNING *",
    )
    .bind(customer_id)
    .bind(&input.label)
    .bind(&input.street)
    .bind(&input.number)
    .bind(&input.neighborhood)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.postal_code)
    .bind(&input.reference)
    .bind(input.is_principal)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(address)
}
