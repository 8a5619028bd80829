//! Lifecycle events emitted by transports to their listeners.

use serde::{Deserialize, Serialize};

/// An event observable through a transport's subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TransportEvent {
    /// A record was accepted for processing. Fires whether or not the
    /// write later succeeds.
    Logged { level: String },
}
