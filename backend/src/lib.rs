//! Order relay library: landing page order intake and Telegram notification.
//!
//! Layout follows a ports-and-adapters split: [`domain`] holds the rules and
//! port traits, [`inbound`] and [`outbound`] adapt them to HTTP, the Bot API
//! and the filesystem.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
