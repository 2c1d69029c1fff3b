use crate::agent::LlmClientTrait;
use crate::error::LlmError;
use crate::types::{Content, FunctionCall, FunctionDeclaration, Part, Role};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

enum Scripted {
    Reply(Content),
    Fail(String),
}

/// Recorded arguments of one `generate` call.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub system_instruction: String,
    pub contents: Vec<Content>,
    pub tool_names: Vec<String>,
}

/// Replays scripted model turns in order. Clones share the same script and history.
#[derive(Clone, Default)]
pub struct MockLlmClient {
    responses: Arc<Mutex<Vec<Scripted>>>,
    call_history: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text_response(&self, text: &str) {
        self.push(Scripted::Reply(Content::model_text(text)));
    }

    pub fn add_tool_call_response(&self, tool_name: &str, args: Value) {
        self.add_tool_calls_response(&[(tool_name, args)]);
    }

    pub fn add_tool_calls_response(&self, calls: &[(&str, Value)]) {
        let parts = calls
            .iter()
            .enumerate()
            .map(|(i, (name, args))| {
                Part::function_call(FunctionCall {
                    id: Some(format!("call-{}", i + 1)),
                    name: name.to_string(),
                    args: args.clone(),
                })
            })
            .collect();
        self.push(Scripted::Reply(Content {
            role: Some(Role::Model),
            parts,
        }));
    }

    pub fn add_content_response(&self, content: Content) {
        self.push(Scripted::Reply(content));
    }

    pub fn add_error_response(&self, message: &str) {
        self.push(Scripted::Fail(message.to_string()));
    }

    pub fn get_call_history(&self) -> Vec<RecordedCall> {
        self.call_history.lock().unwrap().clone()
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    fn push(&self, scripted: Scripted) {
        self.responses.lock().unwrap().push(scripted);
    }

    fn pop_response(&self) -> Scripted {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Scripted::Reply(Content::model_text("No more mock responses configured"))
        } else {
            responses.remove(0)
        }
    }
}

#[async_trait]
impl LlmClientTrait for MockLlmClient {
    async fn generate(
        &self,
        system_instruction: &str,
        contents: &[Content],
        tools: &[FunctionDeclaration],
    ) -> Result<Content, LlmError> {
        // Store the call for verification
        self.call_history.lock().unwrap().push(RecordedCall {
            system_instruction: system_instruction.to_string(),
            contents: contents.to_vec(),
            tool_names: tools.iter().map(|t| t.name.clone()).collect(),
        });

        match self.pop_response() {
            Scripted::Reply(content) => Ok(content),
            Scripted::Fail(message) => Err(LlmError::Api {
                status: 503,
                message,
            }),
        }
    }
}
