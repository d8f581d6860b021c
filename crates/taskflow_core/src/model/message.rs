//! Message records shown in the inbox panel.

use crate::model::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name used for messages composed by the local user.
pub const SELF_SENDER_NAME: &str = "You";
const SELF_SENDER_AVATAR: &str = "👤";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: EntityId,
    pub sender: Sender,
    pub body: String,
    /// Human-readable age label (`2h`, `1d`, `now`).
    pub timestamp: String,
    pub unread: bool,
    pub created_at: DateTime<Utc>,
}

/// Creation input for a message. Id and `created_at` are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender: Sender,
    pub body: String,
    pub timestamp: String,
    pub unread: bool,
}

impl NewMessage {
    /// Message authored by the local user: already read, stamped `now`.
    pub fn from_self(body: impl Into<String>) -> Self {
        Self {
            sender: Sender {
                name: SELF_SENDER_NAME.to_string(),
                avatar: SELF_SENDER_AVATAR.to_string(),
            },
            body: body.into(),
            timestamp: "now".to_string(),
            unread: false,
        }
    }
}

impl Message {
    pub fn from_new(id: EntityId, input: NewMessage, now: DateTime<Utc>) -> Self {
        Self {
            id,
            sender: input.sender,
            body: input.body,
            timestamp: input.timestamp,
            unread: input.unread,
            created_at: now,
        }
    }
}
