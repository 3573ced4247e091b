//! Cooperative stop signal for the listener loop.

use tokio::sync::watch;

/// Create a connected trigger/receiver pair.
#[must_use]
pub fn shutdown_channel() -> (ShutdownTrigger, ListenerShutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, ListenerShutdown { rx })
}

/// Owner side: asks the listener to stop.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    /// Request shutdown. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

/// Listener side of the stop signal.
///
/// Dropping the [`ShutdownTrigger`] without triggering leaves the listener
/// running.
#[derive(Debug, Clone)]
pub struct ListenerShutdown {
    rx: watch::Receiver<bool>,
}

impl ListenerShutdown {
    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown is requested.
    pub async fn triggered(&mut self) {
        if self.rx.wait_for(|stop| *stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
