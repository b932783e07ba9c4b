//! Per-user conversation state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user query and the assistant's rendered reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Oldest first
    pub history: Vec<Exchange>,
    /// Most recent city the conversation was about
    pub last_city: Option<String>,
}

impl Session {
    /// Append an exchange, dropping the oldest ones beyond `max_history`
    pub fn record(&mut self, user: impl Into<String>, assistant: impl Into<String>, max_history: usize) {
        self.history.push(Exchange {
            user: user.into(),
            assistant: assistant.into(),
            at: Utc::now(),
        });
        if self.history.len() > max_history {
            let overflow = self.history.len() - max_history;
            self.history.drain(..overflow);
        }
    }
}
