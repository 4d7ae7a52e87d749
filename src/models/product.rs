use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Category {
    Sweet,
    Savory,
    Beverage,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: Category,
    pub featured: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Response types

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub featured: Vec<Product>,
    pub sweets: Vec<Product>,
    pub savories: Vec<Product>,
    pub beverages: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub sweets: Vec<Product>,
    pub savories: Vec<Product>,
    pub beverages: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: Category,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub product: Product,
    /// The caller's existing cart line for this product, when logged in.
    pub cart_item: Option<crate::models::CartItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_deserializes_from_lowercase_slug() {
        let category: Category = serde_json::from_str("\"sweet\"").unwrap();
        assert_eq!(category, Category::Sweet);
        let category: Category = serde_json::from_str("\"savory\"").unwrap();
        assert_eq!(category, Category::Savory);
        let category: Category = serde_json::from_str("\"beverage\"").unwrap();
        assert_eq!(category, Category::Beverage);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(serde_json::from_str::<Category>("\"frozen\"").is_err());
    }
}
