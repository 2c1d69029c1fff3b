use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::LlmError;
use crate::llm_client::LlmClient;
use crate::session::Session;
use crate::store::{Catalog, Product};
use crate::tool_registry::ToolRegistry;
use crate::types::{Content, FunctionCall, FunctionDeclaration};

/// Shown when the model answers without any text.
pub const FALLBACK_REPLY: &str = "I'm having trouble connecting to the store database right now.";

/// Shown when the turn could not be completed at all.
pub const APOLOGY_REPLY: &str =
    "I apologize, but I'm encountering a temporary system error. Please try again in a moment.";

pub const SYSTEM_INSTRUCTION: &str = "\
You are the official AI Assistant for EMRN (Eastern Medical Rescue Network), found at emrn.ca.

Your persona:
- Professional, knowledgeable, and safety-conscious.
- You assist healthcare professionals and the public in finding medical supplies.
- You prioritize clarity and accuracy.
- You are helpful, polite, and concise.

Your goals:
1. Assist customers in finding medical products using the search_products tool.
2. Help customers track their existing orders using the track_order tool.
3. Provide brief, accurate medical context for products (always disclaim you are an AI, not a doctor).

Guidelines:
- If a product is out of stock, suggest alternatives if possible.
- If asked about shipping, standard shipping is 3-5 business days across Canada.
- Always double-check order status before answering.
";

#[async_trait]
pub trait LlmClientTrait: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        contents: &[Content],
        tools: &[FunctionDeclaration],
    ) -> Result<Content, LlmError>;
}

// Implement trait for real LlmClient
#[async_trait]
impl LlmClientTrait for LlmClient {
    async fn generate(
        &self,
        system_instruction: &str,
        contents: &[Content],
        tools: &[FunctionDeclaration],
    ) -> Result<Content, LlmError> {
        LlmClient::generate(self, system_instruction, contents, tools).await
    }
}

#[derive(Clone, Debug)]
pub struct AssistantOptions {
    pub system_instruction: String,
    pub max_tool_rounds: usize, // tool round-trips allowed per turn
}

impl AssistantOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_tool_rounds: config.max_tool_rounds,
            ..Self::default()
        }
    }
}

impl Default for AssistantOptions {
    fn default() -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            max_tool_rounds: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssistantState {
    Idle,
    AwaitingModel,
    AwaitingToolResults,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model produced text.
    Answered,
    /// The model stopped without text, or kept calling tools past the round limit.
    NoText,
    /// The hosted call failed.
    Failed,
}

/// What one user turn produced.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReply {
    pub text: String,
    pub products: Vec<Product>,
    pub outcome: TurnOutcome,
}

impl TurnReply {
    fn fallback(products: Vec<Product>) -> Self {
        Self {
            text: FALLBACK_REPLY.to_string(),
            products,
            outcome: TurnOutcome::NoText,
        }
    }

    fn failed() -> Self {
        Self {
            text: APOLOGY_REPLY.to_string(),
            products: Vec::new(),
            outcome: TurnOutcome::Failed,
        }
    }
}

pub struct Assistant {
    llm: Box<dyn LlmClientTrait>,
    catalog: Arc<dyn Catalog>,
    tools: ToolRegistry,
    opts: AssistantOptions,
    session: Session,
    state: AssistantState,
}

impl Assistant {
    pub fn new(
        llm: Box<dyn LlmClientTrait>,
        catalog: Arc<dyn Catalog>,
        opts: AssistantOptions,
    ) -> Self {
        Self {
            llm,
            catalog,
            tools: ToolRegistry::new(),
            opts,
            session: Session::new(None),
            state: AssistantState::Idle,
        }
    }

    pub fn with_real_client(llm: LlmClient, catalog: Arc<dyn Catalog>, opts: AssistantOptions) -> Self {
        let model = llm.model().to_string();
        let mut assistant = Self::new(Box::new(llm), catalog, opts);
        assistant.session.model = Some(model);
        assistant
    }

    pub fn state(&self) -> AssistantState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Forget the conversation with the model.
    pub fn reset(&mut self) {
        self.session.clear();
        self.state = AssistantState::Idle;
    }

    fn set_state(&mut self, next: AssistantState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "assistant state");
            self.state = next;
        }
    }

    /// Runs one user turn to completion. Never fails: errors become an apology,
    /// and the model history is left as it was before the turn.
    pub async fn send_message(&mut self, message: &str) -> TurnReply {
        let checkpoint = self.session.checkpoint();
        let result = self.run_turn(message).await;
        self.set_state(AssistantState::Idle);

        match result {
            Ok(reply) => {
                if reply.outcome != TurnOutcome::Answered {
                    self.session.rollback(checkpoint);
                }
                reply
            }
            Err(e) => {
                error!(error = %e, "assistant turn failed");
                self.session.rollback(checkpoint);
                TurnReply::failed()
            }
        }
    }

    async fn run_turn(&mut self, message: &str) -> Result<TurnReply, LlmError> {
        self.session.add_content(Content::user_text(message));

        let mut products: Vec<Product> = Vec::new();
        let mut rounds = 0;

        loop {
            self.set_state(AssistantState::AwaitingModel);
            let content = self
                .llm
                .generate(
                    &self.opts.system_instruction,
                    &self.session.history,
                    self.tools.declarations(),
                )
                .await?;
            self.session.add_content(content.clone());

            let calls: Vec<FunctionCall> = content.function_calls().into_iter().cloned().collect();
            if calls.is_empty() {
                return Ok(match content.text() {
                    Some(text) if !text.trim().is_empty() => TurnReply {
                        text: text.trim().to_string(),
                        products,
                        outcome: TurnOutcome::Answered,
                    },
                    _ => {
                        warn!("model returned no text");
                        TurnReply::fallback(products)
                    }
                });
            }

            if rounds >= self.opts.max_tool_rounds {
                warn!(
                    max_tool_rounds = self.opts.max_tool_rounds,
                    "model is still calling tools, giving up"
                );
                return Ok(TurnReply::fallback(products));
            }
            rounds += 1;

            self.set_state(AssistantState::AwaitingToolResults);
            info!(calls = calls.len(), round = rounds, "running tool calls");

            let mut responses = Vec::with_capacity(calls.len());
            for call in &calls {
                let execution = self.tools.dispatch(self.catalog.as_ref(), call);
                merge_products(&mut products, execution.products);
                responses.push(execution.response);
            }
            self.session.add_content(Content::function_responses(responses));
        }
    }
}

// Keeps first-seen order and drops repeats when several searches hit the same product.
fn merge_products(into: &mut Vec<Product>, found: Vec<Product>) {
    for p in found {
        if !into.iter().any(|q| q.id == p.id) {
            into.push(p);
        }
    }
}
