//! Domain primitives, services and ports.
//!
//! Purpose: hold the order-relay rules independent of HTTP, Telegram and the
//! filesystem. Adapters in `inbound` and `outbound` depend on this module,
//! never the other way round.
//!
//! Public surface:
//! - [`Order`], [`OrderDraft`], [`Product`] — validated customer orders.
//! - [`SubscriberId`] — notification target identifier.
//! - [`NotificationRelay`] — fans orders out to subscribers.
//! - [`OrderIntakeService`] — accepts orders and triggers the relay.
//! - [`SubscriptionListener`] — maintains subscribers from bot commands.
//! - [`Error`] / [`ErrorCode`] — transport-agnostic failures.

pub mod error;
pub mod notification_relay;
pub mod order;
pub mod order_intake;
pub mod order_message;
pub mod ports;
pub mod subscriber;
pub mod subscription_listener;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification_relay::{DEFAULT_SEND_TIMEOUT, NotificationRelay};
pub use self::order::{Order, OrderDraft, OrderField, OrderValidationError, Product};
pub use self::order_intake::OrderIntakeService;
pub use self::order_message::format_order_message;
pub use self::subscriber::SubscriberId;
pub use self::subscription_listener::{
    BotCommand, DEFAULT_LONG_POLL, ListenerConfig, ListenerError, ListenerShutdown,
    ShutdownTrigger, SubscriptionListener, shutdown_channel,
};
pub use self::trace_id::TraceId;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
