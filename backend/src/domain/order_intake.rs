//! Order acceptance use-case.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::{error, info, warn};

use crate::domain::ports::{OrderIntake, OrderNotifier, OrderReceipt};
use crate::domain::{Error, Order};

/// Accepts orders and hands them to the notifier.
///
/// Acceptance is unconditional once an [`Order`] exists: whatever happens in
/// the notifier, including a panic, is logged and reported only through
/// [`OrderReceipt::notified`].
pub struct OrderIntakeService {
    notifier: Arc<dyn OrderNotifier>,
}

impl OrderIntakeService {
    /// Create the service around a notifier.
    pub fn new(notifier: Arc<dyn OrderNotifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl OrderIntake for OrderIntakeService {
    async fn submit(&self, order: Order) -> Result<OrderReceipt, Error> {
        info!(
            name = order.name(),
            phone = order.phone(),
            product = order.product().code(),
            quantity = order.quantity(),
            comment = order.comment(),
            "new order received"
        );

        let notified = match AssertUnwindSafe(self.notifier.notify(&order))
            .catch_unwind()
            .await
        {
            Ok(true) => true,
            Ok(false) => {
                warn!("order accepted but no subscriber was notified");
                false
            }
            Err(_) => {
                error!("order notifier panicked; order accepted without notification");
                false
            }
        };

        Ok(OrderReceipt { notified })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderDraft;
    use crate::domain::ports::{FixtureOrderNotifier, MockOrderNotifier};
    use rstest::{fixture, rstest};

    #[fixture]
    fn order() -> Order {
        Order::try_from_draft(OrderDraft {
            name: Some("Ann".to_owned()),
            phone: Some("123".to_owned()),
            product: Some("oak".to_owned()),
            quantity: Some("2".to_owned()),
            comment: Some("после обеда".to_owned()),
        })
        .expect("valid order")
    }

    #[rstest]
    #[tokio::test]
    async fn reports_successful_notification(order: Order) {
        let mut notifier = MockOrderNotifier::new();
        notifier
            .expect_notify()
            .withf(|order| order.product().code() == "oak")
            .times(1)
            .return_const(true);

        let receipt = OrderIntakeService::new(Arc::new(notifier))
            .submit(order)
            .await
            .expect("order accepted");
        assert!(receipt.notified);
    }

    #[rstest]
    #[tokio::test]
    async fn accepts_order_when_nobody_is_notified(order: Order) {
        let receipt = OrderIntakeService::new(Arc::new(FixtureOrderNotifier))
            .submit(order)
            .await
            .expect("order accepted");
        assert!(!receipt.notified);
    }

    struct PanickingNotifier;

    #[async_trait]
    impl OrderNotifier for PanickingNotifier {
        async fn notify(&self, _order: &Order) -> bool {
            panic!("relay exploded");
        }
    }

    #[rstest]
    #[tokio::test]
    async fn notifier_panic_does_not_reject_order(order: Order) {
        let receipt = OrderIntakeService::new(Arc::new(PanickingNotifier))
            .submit(order)
            .await
            .expect("order accepted");
        assert!(!receipt.notified);
    }
}
