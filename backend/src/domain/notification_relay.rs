//! Fan-out of accepted orders to every subscriber.
//!
//! Each subscriber gets an independent delivery attempt bounded by a
//! timeout. A failed delivery is logged and dropped; it never affects the
//! other subscribers or the caller.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{error, info, warn};

use crate::domain::ports::{
    MessageMarkup, MessageSender, MessengerError, OrderNotifier, OutgoingMessage, SubscriberStore,
};
use crate::domain::{Order, SubscriberId, format_order_message};

/// Default bound on one delivery.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Domain service sending order notifications to subscribers.
pub struct NotificationRelay {
    store: Arc<dyn SubscriberStore>,
    sender: Arc<dyn MessageSender>,
    send_timeout: Duration,
}

impl NotificationRelay {
    /// Build a relay with the default per-delivery timeout.
    pub fn new(store: Arc<dyn SubscriberStore>, sender: Arc<dyn MessageSender>) -> Self {
        Self::with_timeout(store, sender, DEFAULT_SEND_TIMEOUT)
    }

    /// Build a relay with an explicit per-delivery timeout.
    pub fn with_timeout(
        store: Arc<dyn SubscriberStore>,
        sender: Arc<dyn MessageSender>,
        send_timeout: Duration,
    ) -> Self {
        Self {
            store,
            sender,
            send_timeout,
        }
    }

    async fn deliver(&self, chat_id: SubscriberId, text: &str) -> bool {
        let message = OutgoingMessage {
            chat_id,
            text: text.to_owned(),
            markup: MessageMarkup::Html,
            reply_to: None,
        };
        let outcome = tokio::time::timeout(self.send_timeout, self.sender.send_message(&message))
            .await
            .unwrap_or_else(|_| {
                Err(MessengerError::timeout(format!(
                    "no answer within {} ms",
                    self.send_timeout.as_millis()
                )))
            });

        match outcome {
            Ok(()) => {
                info!(%chat_id, "order notification delivered");
                true
            }
            Err(MessengerError::Rejected {
                status,
                description,
            }) => {
                warn!(%chat_id, status, %description, "order notification rejected");
                false
            }
            Err(error) => {
                error!(%chat_id, %error, "order notification failed");
                false
            }
        }
    }
}

#[async_trait]
impl OrderNotifier for NotificationRelay {
    async fn notify(&self, order: &Order) -> bool {
        let subscribers = self.store.load().await;
        if subscribers.is_empty() {
            warn!("no subscribers registered; order notification skipped");
            return false;
        }

        let text = format_order_message(order);
        let results = join_all(
            subscribers
                .iter()
                .map(|chat_id| self.deliver(*chat_id, &text)),
        )
        .await;
        let delivered = results.into_iter().filter(|ok| *ok).count();

        info!(
            subscribers = subscribers.len(),
            delivered, "order notification fan-out finished"
        );
        delivered > 0
    }
}
