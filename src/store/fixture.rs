use std::collections::HashSet;

use rust_decimal::Decimal;

use super::{Catalog, Order, OrderStatus, Product};
use crate::error::FixtureError;

/// In-memory catalog backed by fixed vectors.
#[derive(Clone, Debug)]
pub struct FixtureStore {
    products: Vec<Product>,
    orders: Vec<Order>,
}

impl FixtureStore {
    pub fn new(products: Vec<Product>, orders: Vec<Order>) -> Result<Self, FixtureError> {
        let mut seen = HashSet::new();
        for p in &products {
            if !seen.insert(p.id.as_str()) {
                return Err(FixtureError::DuplicateProductId(p.id.clone()));
            }
            if p.price < Decimal::ZERO {
                return Err(FixtureError::NegativePrice(p.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for o in &orders {
            if !seen.insert(o.id.as_str()) {
                return Err(FixtureError::DuplicateOrderId(o.id.clone()));
            }
        }

        Ok(Self { products, orders })
    }

    /// The EMRN sample catalog.
    pub fn sample() -> Self {
        Self {
            products: sample_products(),
            orders: sample_orders(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::sample()
    }
}

impl Catalog for FixtureStore {
    fn search_products(&self, query: &str) -> Vec<Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.matches(&needle))
            .cloned()
            .collect()
    }

    fn order_by_id(&self, order_id: &str) -> Option<Order> {
        self.orders.iter().find(|o| o.id == order_id).cloned()
    }
}

fn product(
    id: &str,
    name: &str,
    category: &str,
    cents: i64,
    description: &str,
    image: u8,
    in_stock: bool,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price: Decimal::new(cents, 2),
        description: description.to_string(),
        image: format!("https://picsum.photos/300/300?random={image}"),
        in_stock,
    }
}

fn sample_products() -> Vec<Product> {
    vec![
        product(
            "prod_001",
            "Advanced Digital Stethoscope",
            "Diagnostic",
            19999,
            "High-precision digital stethoscope with noise cancellation and app integration.",
            1,
            true,
        ),
        product(
            "prod_002",
            "Nitrile Exam Gloves (Box of 100)",
            "Consumables",
            2450,
            "Powder-free, latex-free medical grade nitrile gloves. Available in S, M, L.",
            2,
            true,
        ),
        product(
            "prod_003",
            "Automated Blood Pressure Monitor",
            "Diagnostic",
            8995,
            "Upper arm blood pressure monitor with arrhythmia detection and large display.",
            3,
            true,
        ),
        product(
            "prod_004",
            "Folding Wheelchair Lightweight",
            "Mobility",
            34900,
            "Ultra-lightweight aluminum wheelchair, foldable for easy transport.",
            4,
            false,
        ),
        product(
            "prod_005",
            "Surgical Face Masks (Level 3)",
            "Consumables",
            1599,
            "50-pack of ASTM Level 3 surgical masks with ear loops.",
            5,
            true,
        ),
        product(
            "prod_006",
            "Pulse Oximeter Fingertip",
            "Diagnostic",
            2999,
            "Accurately measures oxygen saturation and pulse rate.",
            6,
            true,
        ),
    ]
}

fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: "ORD-12345".to_string(),
            status: OrderStatus::Shipped,
            items: vec!["Advanced Digital Stethoscope".to_string()],
            estimated_delivery: "2023-11-15".to_string(),
        },
        Order {
            id: "ORD-67890".to_string(),
            status: OrderStatus::Processing,
            items: vec!["Nitrile Exam Gloves".to_string()],
            estimated_delivery: "2023-11-20".to_string(),
        },
    ]
}
