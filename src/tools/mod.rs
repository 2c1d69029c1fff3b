pub use self::search_products::search_products;
pub use self::track_order::track_order;

use serde_json::Value;

use crate::error::ToolError;
use crate::store::Product;

mod search_products;
mod track_order;

/// What a tool hands back: the payload for the model and any products worth showing the user.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolOutput {
    pub payload: Value,
    pub products: Vec<Product>,
}

impl ToolOutput {
    pub fn payload(payload: Value) -> Self {
        Self {
            payload,
            products: Vec::new(),
        }
    }
}

pub(crate) fn string_arg<'a>(args: &'a Value, key: &'static str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or(ToolError::MissingArgument(key))
}
