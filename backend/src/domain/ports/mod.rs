//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`SubscriberStore`], [`MessageSender`], [`UpdateFeed`],
//! [`OrderNotifier`]) are implemented by outbound adapters or domain
//! services; the driving port [`OrderIntake`] is what the HTTP adapter calls.

mod macros;
pub(crate) use macros::define_port_error;

mod messenger;
mod order_intake;
mod order_notifier;
mod subscriber_store;

#[cfg(test)]
pub use messenger::{MockMessageSender, MockUpdateFeed};
pub use messenger::{
    BotIdentity, InboundMessage, InboundUpdate, MessageMarkup, MessageSender, MessengerError,
    OutgoingMessage, UpdateFeed, UpdatePoll,
};
#[cfg(test)]
pub use order_intake::MockOrderIntake;
pub use order_intake::{FixtureOrderIntake, OrderIntake, OrderReceipt};
#[cfg(test)]
pub use order_notifier::MockOrderNotifier;
pub use order_notifier::{FixtureOrderNotifier, OrderNotifier};
#[cfg(test)]
pub use subscriber_store::MockSubscriberStore;
pub use subscriber_store::{FixtureSubscriberStore, SubscriberStore, SubscriberStoreError};
