//! Runs the HTTP server and the subscription listener side by side.
//!
//! Order intake never depends on the listener: when the listener stops with
//! an error the server keeps accepting orders and only the liveness probe
//! reports the failure. When the server stops, the listener is asked to stop
//! too.

use std::future::Future;
use std::io;

use actix_web::dev::Server;
use actix_web::web;
use tracing::{error, info, warn};

use order_relay::domain::{ListenerError, ShutdownTrigger};
use order_relay::inbound::http::health::HealthState;

/// Serve HTTP until the server stops, running `listener` alongside it.
///
/// # Errors
/// Returns the server's own error, or an error when either task panics.
pub async fn serve_with_listener<L>(
    server: Server,
    health_state: web::Data<HealthState>,
    listener: L,
    trigger: ShutdownTrigger,
) -> io::Result<()>
where
    L: Future<Output = Result<(), ListenerError>> + 'static,
{
    let mut server_task = actix_web::rt::spawn(server);
    let mut listener_task = actix_web::rt::spawn(listener);

    tokio::select! {
        served = &mut server_task => {
            trigger.trigger();
            match listener_task.await {
                Ok(Err(err)) => warn!(error = %err, "listener failed while shutting down"),
                Err(err) => warn!(error = %err, "listener task aborted"),
                Ok(Ok(())) => {}
            }
            served.map_err(io::Error::other)?
        }
        listened = &mut listener_task => {
            match listened {
                Ok(Ok(())) => info!("subscription listener stopped"),
                Ok(Err(err)) => error!(error = %err, "subscription listener failed"),
                Err(err) => error!(error = %err, "subscription listener task aborted"),
            }
            health_state.mark_unhealthy();
            warn!("order intake keeps serving without the subscription listener");
            server_task.await.map_err(io::Error::other)?
        }
    }
}
