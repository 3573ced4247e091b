//! HTTP server configuration object.

use std::path::PathBuf;

use order_relay::config::ServerSettings;

/// Settings needed to bind and serve the HTTP interface.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) static_dir: PathBuf,
}

impl ServerConfig {
    /// Construct a configuration from explicit values.
    #[must_use]
    pub fn new(bind_addr: (String, u16), static_dir: PathBuf) -> Self {
        Self {
            bind_addr,
            static_dir,
        }
    }

    /// Derive the configuration from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &ServerSettings) -> Self {
        Self::new(settings.bind_addr(), settings.static_dir())
    }
}
