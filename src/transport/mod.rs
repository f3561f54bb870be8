//! Dispatcher abstraction layer
//!
//! This module defines the seam to the external messaging collaborator. The
//! node core knows nothing about any concrete transport: a dispatcher
//! delivers subscribed messages by invoking handlers and carries published
//! messages away.
//!
//! # Thread safety
//!
//! Implementations must be `Send + Sync`. Handlers may be invoked
//! concurrently from multiple dispatcher threads; each invocation runs to
//! completion synchronously.

use crate::data::StreamData;
use crate::Result;
use std::sync::Arc;

pub mod local;
pub mod reconcile;

pub use local::LocalDispatcher;
pub use reconcile::{reconcile, Resubscribe};

/// Identifier for an active subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Receives messages for one subscription
pub trait SubscriptionHandler: Send + Sync {
    /// Called by the dispatcher for each message on the subscribed topic
    fn on_message(&self, data: StreamData);
}

/// Messaging collaborator interface
///
/// The two capabilities this core depends on, plus unsubscription so that
/// runtime topic changes can move a subscription.
pub trait Dispatcher: Send + Sync {
    /// Subscribe `handler` to `topic`
    fn subscribe(
        &self,
        topic: &str,
        handler: Arc<dyn SubscriptionHandler>,
    ) -> Result<SubscriptionId>;

    /// Cancel an active subscription
    ///
    /// # Errors
    ///
    /// * `Error::Transport` - the id does not name an active subscription
    fn unsubscribe(&self, id: SubscriptionId) -> Result<()>;

    /// Publish a message to `topic`
    fn publish(&self, topic: &str, data: StreamData) -> Result<()>;
}
