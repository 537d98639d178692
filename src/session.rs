//! Per-session conversation history
//!
//! Keeps a bounded log of user/assistant turns so replies can reference the
//! recent exchange. History is the only mutable per-caller state in the
//! process; the server serializes access behind a mutex.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Most messages retained per session
const HISTORY_CAP: usize = 20;

/// Messages included when building a prompt
pub const RECENT_WINDOW: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded conversation log for one session
#[derive(Debug, Default, Clone)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, discarding the oldest entries beyond the cap
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
        if self.messages.len() > HISTORY_CAP {
            let excess = self.messages.len() - HISTORY_CAP;
            self.messages.drain(..excess);
        }
    }

    /// The trailing window used for prompt context
    pub fn recent(&self) -> &[Message] {
        let start = self.messages.len().saturating_sub(RECENT_WINDOW);
        &self.messages[start..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Generate an opaque session identifier
pub fn new_session_id() -> String {
    let mut rng = rand::thread_rng();
    (0..32)
        .map(|_| format!("{:x}", rng.gen_range(0..16u8)))
        .collect()
}
