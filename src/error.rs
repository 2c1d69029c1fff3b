//! Error types shared across the assistant.

use thiserror::Error;

/// Errors from the hosted chat API.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not what we expected.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Reasons a tool call could not be executed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("missing or invalid argument '{0}'")]
    MissingArgument(&'static str),
}

/// Fixture data that breaks the catalog invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixtureError {
    #[error("duplicate product id '{0}'")]
    DuplicateProductId(String),

    #[error("duplicate order id '{0}'")]
    DuplicateOrderId(String),

    #[error("product '{0}' has a negative price")]
    NegativePrice(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY (or API_KEY) is not set")]
    MissingApiKey,

    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Why a user submission was not turned into a turn.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("a previous message is still being answered")]
    TurnInProgress,
}

/// API error envelope returned by Google APIs.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
