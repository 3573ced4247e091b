//! Long-running listener that maintains the subscriber set from bot commands.
//!
//! The listener long-polls the messaging platform, answers `/start` and
//! `/status`, and replies with help text to anything else. A failed poll is
//! fatal: the error is logged and returned so the process supervisor can
//! restart the bot. Failed replies and failed store writes only affect the
//! message being handled.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::SubscriberId;
use crate::domain::ports::{
    InboundMessage, MessageMarkup, MessageSender, MessengerError, OutgoingMessage,
    SubscriberStore, UpdateFeed, UpdatePoll,
};

mod commands;
mod shutdown;

pub use commands::BotCommand;
use commands::{
    ALREADY_SUBSCRIBED_REPLY, HELP_REPLY, NOT_SUBSCRIBED_REPLY, SUBSCRIBED_REPLY,
    subscribed_status_reply,
};
pub use shutdown::{ListenerShutdown, ShutdownTrigger, shutdown_channel};

/// Default time the platform may hold a long-poll open.
pub const DEFAULT_LONG_POLL: Duration = Duration::from_secs(5);

/// Listener tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Long-poll wait per `getUpdates`-style request.
    pub long_poll: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            long_poll: DEFAULT_LONG_POLL,
        }
    }
}

/// Fatal listener failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenerError {
    /// The bot credential could not be resolved at start-up.
    #[error("bot identity lookup failed: {0}")]
    Identity(#[source] MessengerError),
    /// Polling for updates failed.
    #[error("polling for updates failed: {0}")]
    Poll(#[source] MessengerError),
}

/// Subscription listener bound to its ports.
pub struct SubscriptionListener {
    feed: Arc<dyn UpdateFeed>,
    sender: Arc<dyn MessageSender>,
    store: Arc<dyn SubscriberStore>,
    config: ListenerConfig,
}

impl SubscriptionListener {
    /// Wire the listener to its ports.
    pub fn new(
        feed: Arc<dyn UpdateFeed>,
        sender: Arc<dyn MessageSender>,
        store: Arc<dyn SubscriberStore>,
        config: ListenerConfig,
    ) -> Self {
        Self {
            feed,
            sender,
            store,
            config,
        }
    }

    /// Poll until `shutdown` fires or a poll fails.
    ///
    /// # Errors
    /// Returns [`ListenerError`] when the bot identity cannot be resolved or
    /// a poll fails; both are logged before returning.
    pub async fn run(&self, mut shutdown: ListenerShutdown) -> Result<(), ListenerError> {
        let identity = self.feed.bot_identity().await.map_err(|err| {
            error!(error = %err, "failed to resolve bot identity");
            ListenerError::Identity(err)
        })?;
        info!(
            bot_id = identity.id,
            bot_username = identity.username.as_deref(),
            "subscription listener started"
        );

        let mut offset: Option<i64> = None;
        loop {
            if shutdown.is_triggered() {
                break;
            }
            let poll = UpdatePoll {
                offset,
                wait: self.config.long_poll,
            };
            let updates = tokio::select! {
                biased;
                () = shutdown.triggered() => break,
                result = self.feed.fetch_updates(&poll) => result.map_err(|err| {
                    error!(error = %err, "polling for bot updates failed");
                    ListenerError::Poll(err)
                })?,
            };

            for update in updates {
                let next = update.update_id.saturating_add(1);
                offset = Some(offset.map_or(next, |current| current.max(next)));
                match update.message {
                    Some(message) => self.handle_message(&message).await,
                    None => debug!(update_id = update.update_id, "skipping non-message update"),
                }
            }
        }

        info!("subscription listener stopped");
        Ok(())
    }

    /// Answer one inbound message. Non-text messages are ignored.
    pub async fn handle_message(&self, message: &InboundMessage) {
        let Some(text) = message.text.as_deref() else {
            debug!(chat_id = %message.chat_id, "ignoring non-text message");
            return;
        };

        let reply = OutgoingMessage {
            chat_id: message.chat_id,
            text: self.reply_for(message.chat_id, text).await,
            markup: MessageMarkup::Plain,
            reply_to: Some(message.message_id),
        };
        if let Err(err) = self.sender.send_message(&reply).await {
            warn!(chat_id = %message.chat_id, error = %err, "failed to deliver bot reply");
        }
    }

    /// Execute the command in `text` on behalf of `chat_id` and return the reply.
    pub async fn reply_for(&self, chat_id: SubscriberId, text: &str) -> String {
        match BotCommand::parse(text) {
            BotCommand::Subscribe => self.subscribe(chat_id).await.to_owned(),
            BotCommand::Status => {
                if self.store.contains(chat_id).await {
                    subscribed_status_reply(chat_id)
                } else {
                    NOT_SUBSCRIBED_REPLY.to_owned()
                }
            }
            BotCommand::Help => HELP_REPLY.to_owned(),
        }
    }

    async fn subscribe(&self, chat_id: SubscriberId) -> &'static str {
        match self.store.add(chat_id).await {
            Ok(true) => {
                info!(%chat_id, "subscriber added");
                SUBSCRIBED_REPLY
            }
            Ok(false) => {
                debug!(%chat_id, "subscriber already registered");
                ALREADY_SUBSCRIBED_REPLY
            }
            Err(err) => {
                error!(%chat_id, error = %err, "failed to persist subscriber");
                ALREADY_SUBSCRIBED_REPLY
            }
        }
    }
}
