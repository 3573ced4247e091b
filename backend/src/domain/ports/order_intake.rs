//! Driving port used by inbound adapters to submit validated orders.

use async_trait::async_trait;

use crate::domain::{Error, Order};

/// Outcome of accepting an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReceipt {
    /// Whether any subscriber was notified.
    pub notified: bool,
}

/// Accept validated orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderIntake: Send + Sync {
    /// Accept `order`. Notification failures never surface here; an error
    /// means the order itself could not be accepted.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use order_relay::domain::ports::{FixtureOrderIntake, OrderIntake};
    ///
    /// let receipt = FixtureOrderIntake.submit(order).await?;
    /// assert!(!receipt.notified);
    /// # Ok::<(), order_relay::domain::Error>(())
    /// ```
    async fn submit(&self, order: Order) -> Result<OrderReceipt, Error>;
}

/// Intake that accepts everything and notifies nobody.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureOrderIntake;

#[async_trait]
impl OrderIntake for FixtureOrderIntake {
    async fn submit(&self, _order: Order) -> Result<OrderReceipt, Error> {
        Ok(OrderReceipt { notified: false })
    }
}
