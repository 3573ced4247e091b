//! Port through which accepted orders are announced.

use async_trait::async_trait;

use crate::domain::Order;

/// Announce an accepted order to whoever is listening.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    /// Returns `true` when at least one recipient received the order.
    async fn notify(&self, order: &Order) -> bool;
}

/// Notifier that reaches nobody.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureOrderNotifier;

#[async_trait]
impl OrderNotifier for FixtureOrderNotifier {
    async fn notify(&self, _order: &Order) -> bool {
        false
    }
}
