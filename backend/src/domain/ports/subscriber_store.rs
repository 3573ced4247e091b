//! Driven port for the persisted subscriber set.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::SubscriberId;

use super::define_port_error;

define_port_error! {
    /// Failures raised while persisting the subscriber set.
    pub enum SubscriberStoreError {
        /// The backing storage could not be opened, read or written.
        Io { message: String } => "subscriber store I/O failed: {message}",
        /// The subscriber set could not be serialised.
        Encode { message: String } => "subscriber store encoding failed: {message}",
    }
}

/// Port for loading and growing the subscriber set.
///
/// Reads never fail: adapters degrade unreadable storage to an empty set and
/// log the cause. Only writes report errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Load every persisted subscriber, deduplicated.
    async fn load(&self) -> BTreeSet<SubscriberId>;

    /// Add `id` unless already present.
    ///
    /// Returns `Ok(true)` when the subscriber was newly persisted and
    /// `Ok(false)` when it was already known (nothing is written).
    async fn add(&self, id: SubscriberId) -> Result<bool, SubscriberStoreError>;

    /// Whether `id` is currently subscribed.
    async fn contains(&self, id: SubscriberId) -> bool {
        self.load().await.contains(&id)
    }
}

/// In-memory store for tests and file-less wiring.
#[derive(Debug, Default)]
pub struct FixtureSubscriberStore {
    ids: Mutex<BTreeSet<SubscriberId>>,
}

impl FixtureSubscriberStore {
    /// Seed the fixture with existing subscribers.
    pub fn with_subscribers(ids: impl IntoIterator<Item = SubscriberId>) -> Self {
        Self {
            ids: Mutex::new(ids.into_iter().collect()),
        }
    }
}

#[async_trait]
impl SubscriberStore for FixtureSubscriberStore {
    async fn load(&self) -> BTreeSet<SubscriberId> {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn add(&self, id: SubscriberId) -> Result<bool, SubscriberStoreError> {
        Ok(self
            .ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id))
    }
}
