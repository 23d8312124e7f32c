use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque position in the channel history, used to ask for older messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCursor(pub String);

/// A chat message as delivered by a `MessageSource`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    pub id: String,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl RawMessage {
    /// Cursor pointing at this message.
    pub fn cursor(&self) -> MessageCursor {
        MessageCursor(self.id.clone())
    }
}
