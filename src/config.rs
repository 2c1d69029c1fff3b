use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_TOOL_ROUNDS: usize = 3;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub max_tool_rounds: usize,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;
        let model = non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = non_empty("GEMINI_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match non_empty("ASSISTANT_TIMEOUT_SECS") {
            Some(v) => parse_positive("ASSISTANT_TIMEOUT_SECS", &v)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let max_tool_rounds = match non_empty("ASSISTANT_MAX_TOOL_ROUNDS") {
            Some(v) => parse_positive("ASSISTANT_MAX_TOOL_ROUNDS", &v)? as usize,
            None => DEFAULT_MAX_TOOL_ROUNDS,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            max_tool_rounds,
        })
    }
}

fn parse_positive(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        }),
    }
}
