//! HTTP inbound adapter serving the landing page and the order API.

pub mod error;
pub mod health;
pub mod orders;
pub mod pages;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
