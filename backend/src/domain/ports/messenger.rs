//! Driven ports for the messaging platform the bot lives on.
//!
//! [`MessageSender`] pushes text to a chat; [`UpdateFeed`] long-polls for
//! inbound messages addressed to the bot. One adapter usually implements
//! both, but the relay only needs the sender.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::SubscriberId;

use super::define_port_error;

/// Markup interpretation requested for an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageMarkup {
    /// Text is delivered verbatim.
    Plain,
    /// Text uses the platform's HTML subset.
    Html,
}

/// One message to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Target conversation.
    pub chat_id: SubscriberId,
    /// Message body.
    pub text: String,
    /// Markup mode for `text`.
    pub markup: MessageMarkup,
    /// Inbound message this one answers, if any.
    pub reply_to: Option<i64>,
}

/// A text or non-text message received by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Platform message identifier, used to thread replies.
    pub message_id: i64,
    /// Conversation the message came from.
    pub chat_id: SubscriberId,
    /// Message text; `None` for stickers, photos and similar.
    pub text: Option<String>,
}

/// One entry of the platform's update stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundUpdate {
    /// Monotonic update identifier used to acknowledge the update.
    pub update_id: i64,
    /// Message carried by the update, when it is a message update.
    pub message: Option<InboundMessage>,
}

/// Parameters of one long-poll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatePoll {
    /// First update identifier not yet acknowledged.
    pub offset: Option<i64>,
    /// How long the platform may hold the request open.
    pub wait: Duration,
}

/// Identity of the bot behind the configured credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    /// Platform user identifier of the bot.
    pub id: i64,
    /// Public username, without the leading `@`.
    pub username: Option<String>,
}

define_port_error! {
    /// Failures talking to the messaging platform.
    pub enum MessengerError {
        /// The request never produced a response.
        Transport { message: String } =>
            "messaging platform transport failed: {message}",
        /// The request exceeded its time bound.
        Timeout { message: String } =>
            "messaging platform request timed out: {message}",
        /// The platform answered with an error.
        Rejected { status: u16, description: String } =>
            "messaging platform rejected request ({status}): {description}",
        /// The platform's answer could not be decoded.
        Decode { message: String } =>
            "messaging platform response decode failed: {message}",
        /// The adapter could not build the request.
        InvalidRequest { message: String } =>
            "messaging platform request invalid: {message}",
    }
}

/// Port for delivering messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Deliver one message.
    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), MessengerError>;
}

/// Port for receiving messages addressed to the bot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpdateFeed: Send + Sync {
    /// Resolve the bot identity behind the configured credential.
    async fn bot_identity(&self) -> Result<BotIdentity, MessengerError>;

    /// Long-poll for updates at or after `poll.offset`.
    async fn fetch_updates(&self, poll: &UpdatePoll) -> Result<Vec<InboundUpdate>, MessengerError>;
}
