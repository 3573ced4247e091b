//! Notification subscribers.

use serde::{Deserialize, Serialize};

/// Messaging-platform conversation identifier of a subscriber.
///
/// Telegram chat ids are signed: group chats use negative values.
///
/// Serialises transparently as a bare integer so the persisted subscriber
/// file stays a plain JSON list of numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(i64);

impl SubscriberId {
    /// Wrap a raw chat identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw chat identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for SubscriberId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
