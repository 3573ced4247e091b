//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from the environment (and any OrthoConfig configuration file);
//! command-line parsing stays with `clap` in the binary, so loaders are fed
//! only the program name. Every optional value has an accessor applying its
//! default. The bot token has no default: start-up fails without it.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::ListenerConfig;
use crate::outbound::telegram::{BotToken, BotTokenError, DEFAULT_API_BASE, TelegramClientConfig};

const PROGRAM_NAME: &str = "order-relay";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_SUBSCRIBERS_FILE: &str = "chat_ids.json";
const DEFAULT_SEND_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LONG_POLL_SECS: u64 = 5;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 10;
const MAX_LONG_POLL_SECS: u64 = 50;

/// Problems turning loaded settings into runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// OrthoConfig could not load or merge the sources.
    #[error("failed to load {section} settings: {message}")]
    Load {
        /// Settings section being loaded.
        section: &'static str,
        /// Loader error text.
        message: String,
    },
    /// `TELEGRAM_BOT_TOKEN` is unset or blank.
    #[error("TELEGRAM_BOT_TOKEN must be set")]
    MissingBotToken,
    /// The token is present but unusable.
    #[error("TELEGRAM_BOT_TOKEN is invalid: {0}")]
    InvalidBotToken(#[from] BotTokenError),
    /// The Bot API base URL does not parse.
    #[error("TELEGRAM_API_BASE_URL is invalid: {0}")]
    InvalidApiBase(#[from] url::ParseError),
}

/// HTTP server and storage settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ORDER_RELAY")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Directory holding `index.html` and static assets.
    pub static_dir: Option<PathBuf>,
    /// JSON file persisting subscribed chat identifiers.
    pub subscribers_file: Option<PathBuf>,
}

impl ServerSettings {
    /// Load from the environment.
    ///
    /// # Errors
    /// Returns [`SettingsError::Load`] when OrthoConfig rejects the sources.
    pub fn load_from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|err| SettingsError::Load {
            section: "server",
            message: err.to_string(),
        })
    }

    /// Interface to bind, defaulting to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// `(host, port)` pair accepted by `HttpServer::bind`.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host().to_owned(), self.port)
    }

    /// Static asset directory, defaulting to `static`.
    pub fn static_dir(&self) -> PathBuf {
        self.static_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
    }

    /// Subscriber file, defaulting to `chat_ids.json`.
    pub fn subscribers_file(&self) -> PathBuf {
        self.subscribers_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SUBSCRIBERS_FILE))
    }
}

/// Telegram Bot API settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TELEGRAM")]
pub struct TelegramSettings {
    /// Bot credential. Required.
    pub bot_token: Option<String>,
    /// Bot API base URL.
    pub api_base_url: Option<String>,
    /// Per-message delivery timeout in seconds.
    #[ortho_config(default = DEFAULT_SEND_TIMEOUT_SECS)]
    pub send_timeout_secs: u64,
    /// Long-poll wait in seconds.
    #[ortho_config(default = DEFAULT_LONG_POLL_SECS)]
    pub long_poll_secs: u64,
    /// Extra `getUpdates` allowance on top of the wait, in seconds.
    #[ortho_config(default = DEFAULT_POLL_TIMEOUT_SECS)]
    pub poll_timeout_secs: u64,
}

impl std::fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("send_timeout_secs", &self.send_timeout_secs)
            .field("long_poll_secs", &self.long_poll_secs)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

impl TelegramSettings {
    /// Load from the environment.
    ///
    /// # Errors
    /// Returns [`SettingsError::Load`] when OrthoConfig rejects the sources.
    pub fn load_from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|err| SettingsError::Load {
            section: "telegram",
            message: err.to_string(),
        })
    }

    /// The bot token.
    ///
    /// # Errors
    /// Fails when the token is unset, blank, or not URL-safe.
    pub fn bot_token(&self) -> Result<BotToken, SettingsError> {
        let raw = self
            .bot_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or(SettingsError::MissingBotToken)?;
        Ok(BotToken::new(raw)?)
    }

    /// Bot API base URL, defaulting to the public endpoint.
    ///
    /// # Errors
    /// Fails when the configured URL does not parse.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        Ok(Url::parse(
            self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE),
        )?)
    }

    /// Per-message delivery timeout, at least one second.
    pub fn send_timeout(&self) -> Duration {
        at_least_one_second(self.send_timeout_secs)
    }

    /// Long-poll wait; zero means short polling. Capped at the Bot API
    /// maximum of 50 seconds.
    pub fn long_poll(&self) -> Duration {
        Duration::from_secs(self.long_poll_secs.min(MAX_LONG_POLL_SECS))
    }

    /// Extra `getUpdates` allowance, at least one second.
    pub fn poll_timeout(&self) -> Duration {
        at_least_one_second(self.poll_timeout_secs)
    }

    /// Connection settings for the Telegram client.
    ///
    /// # Errors
    /// Fails when the token is missing or invalid, or the base URL is invalid.
    pub fn client_config(&self) -> Result<TelegramClientConfig, SettingsError> {
        Ok(TelegramClientConfig {
            api_base: self.api_base_url()?,
            token: self.bot_token()?,
            send_timeout: self.send_timeout(),
            poll_timeout: self.poll_timeout(),
        })
    }

    /// Subscription listener tuning.
    pub fn listener_config(&self) -> ListenerConfig {
        ListenerConfig {
            long_poll: self.long_poll(),
        }
    }
}

const fn at_least_one_second(secs: u64) -> Duration {
    Duration::from_secs(if secs == 0 { 1 } else { secs })
}
