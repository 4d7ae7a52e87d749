use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cart {
    pub id: i32,
    pub customer_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartItem {
    pub id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// Cart line joined with current product data, as returned on cart reads.
/// The unit price is the product's price right now, not a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartLine {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub image_url: Option<String>,
    pub quantity: i32,
    pub notes: Option<String>,
    pub unit_price: Decimal,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    #[serde(flatten)]
    pub line: CartLine,
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartLineResponse>,
    pub total: Decimal,
    pub item_count: i32,
}

impl CartSummary {
    /// Totals are derived on read by summing quantity x current price.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let total = lines.iter().map(CartLine::subtotal).sum();
        let item_count = lines.iter().map(|line| line.quantity).sum();
        let items = lines
            .into_iter()
            .map(|line| CartLineResponse {
                subtotal: line.subtotal(),
                line,
            })
            .collect();

        Self {
            items,
            total,
            item_count,
        }
    }
}

/// Row shape for cart mutations that need the product name for the
/// user-visible message.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartItemWithName {
    pub id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub notes: Option<String>,
    pub product_name: String,
}

#[derive(Debug)]
pub enum DecrementOutcome {
    Updated(CartItemWithName),
    /// The line was at quantity 1 and got deleted instead of reaching 0.
    Removed(String),
    NotFound,
}

/// Upper bound for a single cart line. Keeps merged quantities well away
/// from int4 range; requests beyond it are a validation error.
pub const MAX_ITEM_QUANTITY: i32 = 99;

// Request types

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct EditCartItemRequest {
    pub quantity: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

// Response types

#[derive(Debug, Serialize)]
pub struct CartMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn line(id: i32, quantity: i32, unit_price: Decimal) -> CartLine {
        CartLine {
            id,
            product_id: id,
            product_name: format!("Produto {}", id),
            image_url: None,
            quantity,
            notes: None,
            unit_price,
        }
    }

    #[test]
    fn subtotal_is_quantity_times_unit_price() {
        assert_eq!(line(1, 3, dec!(3.50)).subtotal(), dec!(10.50));
    }

    #[test]
    fn summary_totals_sum_over_all_lines() {
        let summary = CartSummary::from_lines(vec![
            line(1, 2, dec!(4.00)),
            line(2, 1, dec!(6.50)),
            line(3, 5, dec!(3.00)),
        ]);

        assert_eq!(summary.total, dec!(29.50));
        assert_eq!(summary.item_count, 8);
        assert_eq!(summary.items.len(), 3);
        assert_eq!(summary.items[1].subtotal, dec!(6.50));
    }

    #[test]
    fn empty_cart_sums_to_zero() {
        let summary = CartSummary::from_lines(vec![]);
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.item_count, 0);
        assert!(summary.items.is_empty());
    }
}
