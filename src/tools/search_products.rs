use serde_json::{Value, json};

use super::{ToolOutput, string_arg};
use crate::error::ToolError;
use crate::store::Catalog;

pub fn search_products(catalog: &dyn Catalog, args: &Value) -> Result<ToolOutput, ToolError> {
    let query = string_arg(args, "query")?;
    let products = catalog.search_products(query);

    Ok(ToolOutput {
        payload: json!({
            "productsFound": products.len(),
            "products": products,
        }),
        products,
    })
}
