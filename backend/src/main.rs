//! Order relay entry-point: serves the landing page and runs the Telegram
//! subscription listener, together or separately.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use order_relay::config::{ServerSettings, TelegramSettings};
use order_relay::domain::ports::{SubscriberStore, UpdateFeed};
use order_relay::domain::{
    ListenerConfig, NotificationRelay, OrderIntakeService, SubscriptionListener,
    shutdown_channel,
};
use order_relay::inbound::http::health::HealthState;
use order_relay::outbound::subscribers::JsonFileSubscriberStore;
use order_relay::outbound::telegram::TelegramClient;

use server::{ServerConfig, create_server, serve_with_listener};

/// Which parts of the service to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// HTTP server and subscription listener in one process.
    #[default]
    All,
    /// HTTP server only.
    Web,
    /// Subscription listener only.
    Bot,
}

#[derive(Debug, Parser)]
#[command(name = "order-relay", version, about)]
struct Cli {
    /// Components to run.
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,
}

struct Components {
    store: Arc<dyn SubscriberStore>,
    telegram: Arc<TelegramClient>,
    listener_config: ListenerConfig,
    relay_timeout: std::time::Duration,
    server: ServerConfig,
}

impl Components {
    fn order_intake(&self) -> Arc<OrderIntakeService> {
        let relay = NotificationRelay::with_timeout(
            Arc::clone(&self.store),
            self.telegram.clone(),
            self.relay_timeout,
        );
        Arc::new(OrderIntakeService::new(Arc::new(relay)))
    }

    fn listener(&self) -> SubscriptionListener {
        let feed: Arc<dyn UpdateFeed> = self.telegram.clone();
        SubscriptionListener::new(
            feed,
            self.telegram.clone(),
            Arc::clone(&self.store),
            self.listener_config,
        )
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let components = load_components().inspect_err(|err| {
        error!(error = %err, "start-up failed");
    })?;

    match cli.mode {
        Mode::Web => run_web(components).await,
        Mode::Bot => run_bot(components).await,
        Mode::All => run_all(components).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

fn load_components() -> io::Result<Components> {
    let server_settings = ServerSettings::load_from_env().map_err(io::Error::other)?;
    let telegram_settings = TelegramSettings::load_from_env().map_err(io::Error::other)?;
    let client_config = telegram_settings.client_config().map_err(io::Error::other)?;

    info!(
        token_fingerprint = %client_config.token.fingerprint(),
        api_base = %client_config.api_base,
        subscribers_file = %server_settings.subscribers_file().display(),
        "configuration loaded"
    );

    let telegram = TelegramClient::new(client_config)
        .map_err(|err| io::Error::other(err.without_url()))?;
    let store = JsonFileSubscriberStore::open(server_settings.subscribers_file())?;

    Ok(Components {
        store: Arc::new(store),
        telegram: Arc::new(telegram),
        listener_config: telegram_settings.listener_config(),
        relay_timeout: telegram_settings.send_timeout(),
        server: ServerConfig::from_settings(&server_settings),
    })
}

async fn run_web(components: Components) -> io::Result<()> {
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        components.order_intake(),
        components.server.clone(),
    )?;
    server.await
}

async fn run_bot(components: Components) -> io::Result<()> {
    let listener = components.listener();
    let (trigger, shutdown) = shutdown_channel();
    let mut run = std::pin::pin!(listener.run(shutdown));

    tokio::select! {
        result = &mut run => return result.map_err(io::Error::other),
        signal = actix_web::rt::signal::ctrl_c() => {
            signal?;
            info!("interrupt received; stopping subscription listener");
            trigger.trigger();
        }
    }
    run.await.map_err(io::Error::other)
}

async fn run_all(components: Components) -> io::Result<()> {
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        components.order_intake(),
        components.server.clone(),
    )?;
    let listener = components.listener();
    let (trigger, shutdown) = shutdown_channel();

    serve_with_listener(
        server,
        health_state,
        async move { listener.run(shutdown).await },
        trigger,
    )
    .await
}
