pub mod address_queries;
pub mod cart_queries;
pub mod customer_queries;
pub mod order_queries;
pub mod product_queries;
