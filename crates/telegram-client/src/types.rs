//! Telegram Bot API types.
//!
//! Only the fields the bot reads are deserialized; everything else is ignored.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub description: Option<String>,
    pub result: Option<T>,
}

/// Update returned by `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub date: i64,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: String,
}

/// Entry of the command menu published with `setMyCommands`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetMyCommandsRequest {
    pub commands: Vec<BotCommand>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: Vec<String>,
}

/// Outgoing message request.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}

/// Parsed message for bot processing.
#[derive(Debug, Clone)]
pub struct BotMessage {
    /// Update this message arrived in.
    pub update_id: i64,
    /// Message ID within the chat.
    pub message_id: i64,
    /// Chat to reply to.
    pub chat_id: i64,
    /// Sender user ID, absent for channel posts.
    pub sender_id: Option<i64>,
    /// Sender username, if set.
    pub sender_username: Option<String>,
    /// The message text.
    pub text: String,
    /// Unix timestamp.
    pub date: i64,
    /// Whether the chat is a group or supergroup.
    pub is_group: bool,
}

impl BotMessage {
    /// Extract a text message from an update.
    pub fn from_update(update: &Update) -> Option<Self> {
        let message = update.message.as_ref()?;
        let text = message.text.clone()?;

        Some(Self {
            update_id: update.update_id,
            message_id: message.message_id,
            chat_id: message.chat.id,
            sender_id: message.from.as_ref().map(|u| u.id),
            sender_username: message.from.as_ref().and_then(|u| u.username.clone()),
            text,
            date: message.date,
            is_group: matches!(message.chat.chat_type.as_str(), "group" | "supergroup"),
        })
    }
}
