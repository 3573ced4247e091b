//! Reqwest-backed Telegram Bot API client.
//!
//! This adapter owns transport details only: URL construction, per-call
//! timeouts, envelope decoding and error mapping. Request URLs embed the bot
//! token, so every `reqwest::Error` is stripped of its URL before it is
//! turned into a message that may reach the logs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use super::dto::{ApiEnvelope, GetUpdatesBody, SendMessageBody, UpdateDto, UserDto};
use super::token::BotToken;
use crate::domain::ports::{
    BotIdentity, InboundUpdate, MessageMarkup, MessageSender, MessengerError, OutgoingMessage,
    UpdateFeed, UpdatePoll,
};

/// Public Bot API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";
const USER_AGENT: &str = concat!("order-relay/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`TelegramClient`].
#[derive(Debug, Clone)]
pub struct TelegramClientConfig {
    /// Base URL of the Bot API, without the `/bot<token>` segment.
    pub api_base: Url,
    /// Bot credential.
    pub token: BotToken,
    /// Time bound for `sendMessage` and `getMe`.
    pub send_timeout: Duration,
    /// Extra time granted to `getUpdates` on top of the long-poll wait.
    pub poll_timeout: Duration,
}

/// Bot API adapter implementing [`MessageSender`] and [`UpdateFeed`].
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: Client,
    api_base: String,
    token: BotToken,
    send_timeout: Duration,
    poll_timeout: Duration,
}

impl TelegramClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: TelegramClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_base: config.api_base.as_str().trim_end_matches('/').to_owned(),
            token: config.token,
            send_timeout: config.send_timeout,
            poll_timeout: config.poll_timeout,
        })
    }

    fn method_url(&self, method: &str) -> Result<Url, MessengerError> {
        let raw = format!("{}/bot{}/{method}", self.api_base, self.token.expose());
        // Never echo `raw`: it contains the token.
        Url::parse(&raw).map_err(|_| {
            MessengerError::invalid_request(format!("cannot build URL for Bot API method {method}"))
        })
    }

    async fn call<B, T>(&self, method: &str, body: &B, timeout: Duration) -> Result<T, MessengerError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method)?)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        decode_envelope(status, bytes.as_ref())
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), MessengerError> {
        let body = SendMessageBody {
            chat_id: message.chat_id.get(),
            text: &message.text,
            parse_mode: match message.markup {
                MessageMarkup::Plain => None,
                MessageMarkup::Html => Some("HTML"),
            },
            reply_to_message_id: message.reply_to,
        };
        self.call::<_, IgnoredAny>("sendMessage", &body, self.send_timeout)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl UpdateFeed for TelegramClient {
    async fn bot_identity(&self) -> Result<BotIdentity, MessengerError> {
        let empty = serde_json::Map::new();
        self.call::<_, UserDto>("getMe", &empty, self.send_timeout)
            .await
            .map(BotIdentity::from)
    }

    async fn fetch_updates(&self, poll: &UpdatePoll) -> Result<Vec<InboundUpdate>, MessengerError> {
        let body = GetUpdatesBody {
            offset: poll.offset,
            timeout: poll.wait.as_secs(),
            allowed_updates: ["message"],
        };
        let updates: Vec<UpdateDto> = self
            .call(
                "getUpdates",
                &body,
                poll.wait.saturating_add(self.poll_timeout),
            )
            .await?;
        Ok(updates.into_iter().map(InboundUpdate::from).collect())
    }
}

fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, MessengerError> {
    let envelope: ApiEnvelope<T> = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => return Err(map_status_error(status, body)),
        Err(error) => {
            return Err(MessengerError::decode(format!(
                "invalid Bot API JSON payload: {error}"
            )));
        }
    };

    if !envelope.ok || !status.is_success() {
        let description = envelope
            .description
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| body_preview(body));
        return Err(MessengerError::rejected(status.as_u16(), description));
    }
    envelope
        .result
        .ok_or_else(|| MessengerError::decode("Bot API response has no result"))
}

fn map_transport_error(error: reqwest::Error) -> MessengerError {
    let error = error.without_url();
    if error.is_timeout() {
        MessengerError::timeout(error.to_string())
    } else {
        MessengerError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MessengerError {
    let preview = body_preview(body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            MessengerError::timeout(format!("status {}", status.as_u16()))
        }
        _ if preview.is_empty() => MessengerError::rejected(
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown status"),
        ),
        _ => MessengerError::rejected(status.as_u16(), preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
