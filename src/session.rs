use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Content;

/// Model-facing history of one conversation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Session {
    pub id: String,
    pub model: Option<String>,
    pub history: Vec<Content>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(model: Option<&str>) -> Session {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4().to_string(),
            model: model.map(|s| s.to_string()),
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // Append one content
    pub fn add_content(&mut self, content: Content) {
        self.history.push(content);
        self.updated_at = Utc::now();
    }

    /// Position to roll back to if the turn that follows does not complete.
    pub fn checkpoint(&self) -> usize {
        self.history.len()
    }

    pub fn rollback(&mut self, checkpoint: usize) {
        if checkpoint < self.history.len() {
            self.history.truncate(checkpoint);
            self.updated_at = Utc::now();
        }
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.updated_at = Utc::now();
    }
}
