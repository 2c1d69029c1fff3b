use tokio::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::{ApiErrorResponse, LlmError};
use crate::types::{
    Content, FunctionDeclaration, GenerateContentRequest, GenerateContentResponse, ToolSet,
};

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct LlmClient {
    base_url: String,
    api_key: String,
    model: String,
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(8)
            .tcp_keepalive(Duration::from_secs(30))
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// One non-streaming call. Returns the first candidate's content, which may be empty.
    #[instrument(skip_all, fields(model = %self.model, turns = contents.len()))]
    pub async fn generate(
        &self,
        system_instruction: &str,
        contents: &[Content],
        tools: &[FunctionDeclaration],
    ) -> Result<Content, LlmError> {
        let req = build_request(system_instruction, contents, tools);

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::Parse(format!("Failed to parse JSON response: {e}")))?;

        if parsed.candidates.is_empty() {
            let reason = parsed
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
                .unwrap_or("none");
            warn!(block_reason = reason, "model returned no candidates");
        } else {
            debug!(
                finish_reason = ?parsed.candidates[0].finish_reason,
                "model responded"
            );
        }

        Ok(parsed.into_first_content())
    }
}

pub(crate) fn build_request(
    system_instruction: &str,
    contents: &[Content],
    tools: &[FunctionDeclaration],
) -> GenerateContentRequest {
    let tools = if tools.is_empty() {
        Vec::new()
    } else {
        vec![ToolSet {
            function_declarations: tools.to_vec(),
        }]
    };
    GenerateContentRequest {
        system_instruction: Content::instruction(system_instruction),
        contents: contents.to_vec(),
        tools,
    }
}

fn api_error(status: u16, body: &str) -> LlmError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    LlmError::Api { status, message }
}
