use crate::error::ToolError;
use crate::store::{FixtureStore, MockCatalog, Order, OrderStatus};
use crate::tool_registry::{StoreTool, ToolRegistry};
use crate::tools::{search_products, track_order};
use crate::types::FunctionCall;
use mockall::predicate::eq;
use serde_json::{Value, json};

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: Value) -> FunctionCall {
        FunctionCall {
            id: Some("call-1".to_string()),
            name: name.to_string(),
            args,
        }
    }

    #[test]
    fn test_declarations() {
        let registry = ToolRegistry::new();
        let names: Vec<&str> = registry
            .declarations()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["search_products", "track_order"]);

        let search = &registry.declarations()[0];
        assert_eq!(search.parameters["required"], json!(["query"]));
        assert_eq!(search.parameters["properties"]["query"]["type"], "string");

        let track = &registry.declarations()[1];
        assert_eq!(track.parameters["required"], json!(["orderId"]));
    }

    #[test]
    fn test_store_tool_names() {
        assert_eq!(StoreTool::from_name("search_products"), Some(StoreTool::SearchProducts));
        assert_eq!(StoreTool::from_name("track_order"), Some(StoreTool::TrackOrder));
        assert_eq!(StoreTool::from_name("Track_Order"), None);
        assert_eq!(StoreTool::TrackOrder.to_string(), "track_order");
    }

    #[test]
    fn test_search_gloves() {
        let store = FixtureStore::sample();
        let registry = ToolRegistry::new();

        let execution = registry.dispatch(&store, &call("search_products", json!({"query": "gloves"})));

        let names: Vec<&str> = execution.products.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"Nitrile Exam Gloves (Box of 100)"));
        assert!(!names.iter().any(|n| n.contains("Wheelchair")));
        assert!(!names.iter().any(|n| n.contains("Stethoscope")));

        let result = &execution.response.response["result"];
        assert_eq!(result["productsFound"], 1);
        assert_eq!(result["products"][0]["id"], "prod_002");
        assert_eq!(execution.response.name, "search_products");
        assert_eq!(execution.response.id.as_deref(), Some("call-1"));
    }

    #[test]
    fn test_search_without_matches() {
        let store = FixtureStore::sample();
        let execution = ToolRegistry::new().dispatch(
            &store,
            &call("search_products", json!({"query": "defibrillator"})),
        );
        assert!(execution.products.is_empty());
        assert_eq!(execution.response.response["result"]["productsFound"], 0);
        assert_eq!(execution.response.response["result"]["products"], json!([]));
    }

    #[test]
    fn test_track_order_processing() {
        let store = FixtureStore::sample();
        let execution =
            ToolRegistry::new().dispatch(&store, &call("track_order", json!({"orderId": "ORD-67890"})));

        let result = &execution.response.response["result"];
        assert_eq!(result["status"], "processing");
        assert_eq!(result["id"], "ORD-67890");
        assert!(execution.products.is_empty());
    }

    #[test]
    fn test_track_order_not_found_is_a_normal_result() {
        let store = FixtureStore::sample();
        let output = track_order(&store, &json!({"orderId": "ORD-00000"})).unwrap();
        assert_eq!(output.payload, json!({"error": "Order not found"}));
    }

    #[test]
    fn test_unknown_tool_yields_error_payload() {
        let store = FixtureStore::sample();
        let execution = ToolRegistry::new().dispatch(&store, &call("cancel_order", json!({})));

        assert_eq!(execution.response.name, "cancel_order");
        assert_eq!(execution.response.id.as_deref(), Some("call-1"));
        let error = execution.response.response["result"]["error"].as_str().unwrap();
        assert_eq!(error, "Tool execution failed: unknown tool 'cancel_order'");
        assert!(execution.products.is_empty());
    }

    #[test]
    fn test_malformed_arguments_yield_error_payload() {
        let store = FixtureStore::sample();
        let registry = ToolRegistry::new();

        let execution = registry.dispatch(&store, &call("search_products", json!({"q": "gloves"})));
        assert_eq!(
            execution.response.response["result"]["error"],
            "Tool execution failed: missing or invalid argument 'query'"
        );

        let execution = registry.dispatch(&store, &call("track_order", json!({"orderId": 12345})));
        assert_eq!(
            execution.response.response["result"]["error"],
            "Tool execution failed: missing or invalid argument 'orderId'"
        );

        let execution = registry.dispatch(&store, &call("track_order", Value::Null));
        assert!(execution.response.response["result"]["error"].is_string());
    }

    #[test]
    fn test_tool_functions_report_missing_argument() {
        let store = FixtureStore::sample();
        assert_eq!(
            search_products(&store, &json!({})).unwrap_err(),
            ToolError::MissingArgument("query")
        );
        assert_eq!(
            track_order(&store, &json!({})).unwrap_err(),
            ToolError::MissingArgument("orderId")
        );
    }

    #[test]
    fn test_dispatch_passes_arguments_to_catalog() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_order_by_id()
            .with(eq("ORD-42"))
            .times(1)
            .returning(|id| {
                Some(Order {
                    id: id.to_string(),
                    status: OrderStatus::Delivered,
                    items: vec!["Pulse Oximeter Fingertip".to_string()],
                    estimated_delivery: "2024-02-01".to_string(),
                })
            });
        catalog.expect_search_products().never();

        let execution =
            ToolRegistry::new().dispatch(&catalog, &call("track_order", json!({"orderId": "ORD-42"})));
        assert_eq!(execution.response.response["result"]["status"], "delivered");
    }

    #[test]
    fn test_dispatch_search_uses_query_verbatim() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_search_products()
            .with(eq("Blood Pressure"))
            .times(1)
            .returning(|_| Vec::new());

        let execution = ToolRegistry::new().dispatch(
            &catalog,
            &call("search_products", json!({"query": "Blood Pressure"})),
        );
        assert_eq!(execution.response.response["result"]["productsFound"], 0);
    }
}
