use sqlx::PgPool;

use crate::{
    error::Result,
    models::{AddressInput, Customer},
};

pub async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE phone = $1")
        .bind(phone)
        .fetch_optional(pool)
        .await?;

    Ok(customer)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(customer)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(customer)
}

/// Creates the customer and all submitted addresses in one transaction.
/// The first address is flagged as principal.
pub async fn create_with_addresses(
    pool: &PgPool,
    phone: &str,
    name: &str,
    email: Option<&str>,
    password_hash: &str,
    addresses: &[AddressInput],
) -> Result<Customer> {
    let mut tx = pool.begin().await?;

    let customer = sqlx::query_as::<_, Customer>(
        "INSERT INTO customers (phone, name, email, password) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(phone)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(&mut *tx)
    .await?;

    for (index, address) in addresses.iter().enumerate() {
        sqlx::query(
            "INSERT INTO addresses
             (customer_id, label, street, number, neighborhood, city, state, postal_code, reference, is_principal)
             VALUES ($1, $2, $3, COALESCE($4, 'S/N'), $5, COALESCE($6, 'Cachoeiras de Macacu'),
                     COALESCE($7, 'RJ'), $8, $9, $10)",
        )
        .bind(customer.id)
        .bind(&address.label)
        .bind(&address.street)
        .bind(&address.number)
        .bind(&address.neighborhood)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.postal_code)
        .bind(&address.reference)
        .bind(index == 0)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(customer)
}
