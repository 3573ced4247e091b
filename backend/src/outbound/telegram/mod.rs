//! Telegram Bot API adapter.
//!
//! Implements the `MessageSender` and `UpdateFeed` ports over HTTPS.

mod dto;
mod http_client;
mod token;

pub use http_client::{DEFAULT_API_BASE, TelegramClient, TelegramClientConfig};
pub use token::{BotToken, BotTokenError};
