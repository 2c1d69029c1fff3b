//! Product and order data the assistant's tools query.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use self::fixture::FixtureStore;

mod fixture;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub image: String, // URL
    pub in_stock: bool,
}

impl Product {
    /// Case-insensitive substring match on name, category and description.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub items: Vec<String>,
    pub estimated_delivery: String,
}

/// Read-only source of products and orders.
#[cfg_attr(test, mockall::automock)]
pub trait Catalog: Send + Sync {
    /// All products matching `query`, in catalog order. An empty query matches everything.
    fn search_products(&self, query: &str) -> Vec<Product>;

    /// The order whose id equals `order_id` exactly.
    fn order_by_id(&self, order_id: &str) -> Option<Order>;
}
