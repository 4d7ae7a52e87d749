use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    pub id: i32,
    pub customer_id: i32,
    pub label: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub reference: Option<String>,
    pub is_principal: bool,
}

/// One delivery address submitted at registration or from the account page.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressInput {
    pub label: String,
    pub street: String,
    #[serde(default)]
    pub number: Option<String>,
    pub neighborhood: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    pub postal_code: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub is_principal: bool,
}
