//! Wire types for the Telegram Bot API.
//!
//! Responses decode into these DTOs first and are then mapped onto the
//! messaging port types in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::SubscriberId;
use crate::domain::ports::{BotIdentity, InboundMessage, InboundUpdate};

/// Envelope wrapping every Bot API response.
#[derive(Debug, Deserialize)]
pub(super) struct ApiEnvelope<T> {
    pub(super) ok: bool,
    pub(super) result: Option<T>,
    pub(super) description: Option<String>,
}

/// `sendMessage` request body.
#[derive(Debug, Serialize)]
pub(super) struct SendMessageBody<'a> {
    pub(super) chat_id: i64,
    pub(super) text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) reply_to_message_id: Option<i64>,
}

/// `getUpdates` request body.
#[derive(Debug, Serialize)]
pub(super) struct GetUpdatesBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) offset: Option<i64>,
    pub(super) timeout: u64,
    pub(super) allowed_updates: [&'static str; 1],
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    id: i64,
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateDto {
    update_id: i64,
    message: Option<MessageDto>,
}

#[derive(Debug, Deserialize)]
struct MessageDto {
    message_id: i64,
    chat: ChatDto,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatDto {
    id: i64,
}

impl From<UserDto> for BotIdentity {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            username: value.username,
        }
    }
}

impl From<UpdateDto> for InboundUpdate {
    fn from(value: UpdateDto) -> Self {
        Self {
            update_id: value.update_id,
            message: value.message.map(|message| InboundMessage {
                message_id: message.message_id,
                chat_id: SubscriberId::new(message.chat.id),
                text: message.text,
            }),
        }
    }
}
