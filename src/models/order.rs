use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Cash,
    Pix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum DeliveryType {
    Delivery,
    Pickup,
}

// DB models

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    /// Nullable: the address may be deleted after the order was placed.
    pub address_id: Option<i32>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
    /// Snapshot taken at checkout, never recomputed from current prices.
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub notes: Option<String>,
}

// Request types

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub address_id: Option<i32>,
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
}

// Response types

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub message: String,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_uses_snake_case_slugs() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
            "\"out_for_delivery\""
        );
        let status: OrderStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, OrderStatus::Pending);
    }

    #[test]
    fn payment_and_delivery_slugs_round_trip() {
        let method: PaymentMethod = serde_json::from_str("\"pix\"").unwrap();
        assert_eq!(method, PaymentMethod::Pix);
        let delivery: DeliveryType = serde_json::from_str("\"pickup\"").unwrap();
        assert_eq!(delivery, DeliveryType::Pickup);
        assert!(serde_json::from_str::<PaymentMethod>("\"cheque\"").is_err());
    }
}
