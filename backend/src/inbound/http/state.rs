//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::ports::OrderIntake;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Accepts validated orders.
    pub order_intake: Arc<dyn OrderIntake>,
    /// Directory holding `index.html` and the `/static` assets.
    pub static_dir: PathBuf,
}

impl HttpState {
    /// Bundle the intake port with the static asset directory.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use order_relay::domain::ports::FixtureOrderIntake;
    /// use order_relay::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureOrderIntake), "static");
    /// assert_eq!(state.static_dir, std::path::PathBuf::from("static"));
    /// ```
    pub fn new(order_intake: Arc<dyn OrderIntake>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            order_intake,
            static_dir: static_dir.into(),
        }
    }
}
