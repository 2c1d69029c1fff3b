use uuid::Uuid;

use crate::store::Product;

pub const INTEGRATION_KEY_PREFIX: &str = "emrn_live_";

pub fn clip(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => {
            let mut out = s[..cut].to_string();
            out.push_str("… [truncated]");
            out
        }
    }
}

/// One-line summary of a product for terminal output.
pub fn product_line(product: &Product) -> String {
    let stock = if product.in_stock {
        "in stock"
    } else {
        "out of stock"
    };
    format!(
        "{} - ${:.2} ({}, {})",
        product.name, product.price, product.category, stock
    )
}

/// A fresh key for connecting an Odoo backend: the prefix plus 26 uppercase alphanumerics.
pub fn generate_integration_key() -> String {
    let random: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(26)
        .collect();
    format!("{INTEGRATION_KEY_PREFIX}{}", random.to_uppercase())
}
