use serde_json::{Value, json};

use super::{ToolOutput, string_arg};
use crate::error::ToolError;
use crate::store::Catalog;

pub fn track_order(catalog: &dyn Catalog, args: &Value) -> Result<ToolOutput, ToolError> {
    let order_id = string_arg(args, "orderId")?;

    // Not finding an order is an answer, not a failure.
    let payload = match catalog.order_by_id(order_id) {
        Some(order) => json!(order),
        None => json!({ "error": "Order not found" }),
    };
    Ok(ToolOutput::payload(payload))
}
