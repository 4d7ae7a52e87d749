use serde::{Deserialize, Serialize};

/// Minimal identity stored in the session for a logged-in customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCustomer {
    pub id: i32,
    pub name: String,
    pub phone: String,
}

pub mod session_keys {
    pub const CURRENT_CUSTOMER: &str = "current_customer";
}
