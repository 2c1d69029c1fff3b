use std::fmt;

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::ToolError;
use crate::store::{Catalog, Product};
use crate::tools::{self, ToolOutput};
use crate::types::{FunctionCall, FunctionDeclaration, FunctionResponse};
use crate::utils::clip;

/// The tools the assistant may ask us to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreTool {
    SearchProducts,
    TrackOrder,
}

impl StoreTool {
    pub const ALL: [StoreTool; 2] = [StoreTool::SearchProducts, StoreTool::TrackOrder];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreTool::SearchProducts => "search_products",
            StoreTool::TrackOrder => "track_order",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for StoreTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running one function call.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolExecution {
    pub response: FunctionResponse,
    pub products: Vec<Product>,
}

#[derive(Clone)]
pub struct ToolRegistry {
    declarations: Vec<FunctionDeclaration>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        // Single source of truth for the declarations the model sees
        let declarations = vec![
            FunctionDeclaration {
                name: StoreTool::SearchProducts.to_string(),
                description: "Search for medical supplies and products in the store catalog. \
                     Use this when the user asks for product recommendations or checks availability."
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description":
                                "The search term or product description (e.g., \"gloves\", \"blood pressure monitor\")."
                        }
                    },
                    "required": ["query"]
                }),
            },
            FunctionDeclaration {
                name: StoreTool::TrackOrder.to_string(),
                description: "Check the status of a customer order using the Order ID.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "orderId": {
                            "type": "string",
                            "description": "The unique order identifier (e.g., \"ORD-12345\")."
                        }
                    },
                    "required": ["orderId"]
                }),
            },
        ];
        Self { declarations }
    }

    pub fn declarations(&self) -> &[FunctionDeclaration] {
        &self.declarations
    }

    /// Runs one call against the catalog. Never fails: problems become an error payload
    /// so the model can still answer the user.
    pub fn dispatch(&self, catalog: &dyn Catalog, call: &FunctionCall) -> ToolExecution {
        info!(tool = %call.name, args = %call.args, "executing tool");

        let (result, products) = match run(catalog, call) {
            Ok(ToolOutput { payload, products }) => (payload, products),
            Err(e) => {
                warn!(tool = %call.name, error = %e, "tool execution failed");
                (error_payload(&e), Vec::new())
            }
        };

        debug!(tool = %call.name, result = %clip(&result.to_string(), 300), "tool result");

        ToolExecution {
            response: FunctionResponse {
                id: call.id.clone(),
                name: call.name.clone(),
                response: json!({ "result": result }),
            },
            products,
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn run(catalog: &dyn Catalog, call: &FunctionCall) -> Result<ToolOutput, ToolError> {
    match StoreTool::from_name(&call.name) {
        Some(StoreTool::SearchProducts) => tools::search_products(catalog, &call.args),
        Some(StoreTool::TrackOrder) => tools::track_order(catalog, &call.args),
        None => Err(ToolError::UnknownTool(call.name.clone())),
    }
}

fn error_payload(err: &ToolError) -> Value {
    json!({ "error": format!("Tool execution failed: {err}") })
}
