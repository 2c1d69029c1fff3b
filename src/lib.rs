//! EMRN storefront assistant: a chat assistant backed by a hosted Gemini model
//! that can search the product catalog and track orders.

pub mod agent;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm_client;
pub mod session;
pub mod store;
pub mod tool_registry;
pub mod tools;
pub mod types;
pub mod utils;

#[cfg(test)]
mod mocks;
#[cfg(test)]
mod tests;

pub use agent::{Assistant, AssistantOptions, AssistantState, TurnOutcome, TurnReply};
pub use config::Config;
pub use conversation::{ChatMessage, ChatRole, Conversation};
pub use store::{Catalog, FixtureStore, Order, OrderStatus, Product};
