//! The user-facing message log.
//!
//! A [`Conversation`] owns the ordered list of [`ChatMessage`]s shown to the user
//! and serializes turns: while one submission is being answered, another is
//! rejected with [`SubmitError::TurnInProgress`] instead of racing it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::agent::Assistant;
use crate::error::SubmitError;
use crate::store::Product;

pub const WELCOME_ID: &str = "welcome";

pub const WELCOME_TEXT: &str = "Hello! I'm the EMRN AI Assistant. I can help you find emergency \
supplies, track orders, or help you integrate this chat with your Odoo system. How can I help?";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_products: Option<Vec<Product>>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: ChatRole::User,
            text: text.into(),
            timestamp: Utc::now(),
            related_products: None,
        }
    }

    /// Products are only attached when there are some.
    pub fn assistant(text: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: ChatRole::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
            related_products: (!products.is_empty()).then_some(products),
        }
    }

    fn welcome() -> Self {
        Self {
            id: WELCOME_ID.to_string(),
            ..Self::assistant(WELCOME_TEXT, Vec::new())
        }
    }
}

pub struct Conversation {
    assistant: tokio::sync::Mutex<Assistant>,
    messages: Mutex<Vec<ChatMessage>>,
}

impl Conversation {
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant: tokio::sync::Mutex::new(assistant),
            messages: Mutex::new(Vec::new()),
        }
    }

    fn log(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Greets the user if nothing has been said yet.
    pub fn open(&self) {
        let mut log = self.log();
        if log.is_empty() {
            log.push(ChatMessage::welcome());
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.log().clone()
    }

    /// True while a submitted message is still being answered.
    pub fn is_loading(&self) -> bool {
        self.assistant.try_lock().is_err()
    }

    /// Sends `text` as one turn and returns the assistant's reply, which has
    /// also been appended to the log.
    pub async fn submit(&self, text: &str) -> Result<ChatMessage, SubmitError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SubmitError::EmptyMessage);
        }

        let mut assistant = self
            .assistant
            .try_lock()
            .map_err(|_| SubmitError::TurnInProgress)?;

        self.log().push(ChatMessage::user(text));

        let reply = assistant.send_message(text).await;
        debug!(outcome = ?reply.outcome, products = reply.products.len(), "turn finished");

        let message = ChatMessage::assistant(reply.text, reply.products);
        self.log().push(message.clone());
        Ok(message)
    }

    /// Drops the log and the model history, like reloading the page.
    pub fn clear(&self) -> Result<(), SubmitError> {
        let mut assistant = self
            .assistant
            .try_lock()
            .map_err(|_| SubmitError::TurnInProgress)?;
        assistant.reset();
        self.log().clear();
        Ok(())
    }
}
