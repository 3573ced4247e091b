//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **subscribers**: subscriber set persisted as a JSON file
//! - **telegram**: Telegram Bot API client for sending and polling
//!
//! Adapters are thin translators between domain types and wire or file
//! formats. They contain no business logic.

pub mod subscribers;
pub mod telegram;
