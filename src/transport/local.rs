//! In-process dispatcher
//!
//! A minimal `Dispatcher` for tests and single-process runs: messages are
//! delivered synchronously to every handler subscribed to the topic. Real
//! deployments swap in a transport-backed implementation.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{Dispatcher, SubscriptionHandler, SubscriptionId};
use crate::data::StreamData;
use crate::{Error, Result};

type HandlerList = Vec<(SubscriptionId, Arc<dyn SubscriptionHandler>)>;

/// In-process, synchronous-delivery dispatcher
#[derive(Default)]
pub struct LocalDispatcher {
    next_id: AtomicU64,
    subscriptions: RwLock<HashMap<String, HandlerList>>,
}

impl LocalDispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dispatcher for LocalDispatcher {
    fn subscribe(
        &self,
        topic: &str,
        handler: Arc<dyn SubscriptionHandler>,
    ) -> Result<SubscriptionId> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions
            .write()
            .entry(topic.to_string())
            .or_default()
            .push((id, handler));
        tracing::debug!(topic, id = id.0, "subscribed");
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<()> {
        let mut subscriptions = self.subscriptions.write();
        for handlers in subscriptions.values_mut() {
            if let Some(pos) = handlers.iter().position(|(sub_id, _)| *sub_id == id) {
                handlers.remove(pos);
                tracing::debug!(id = id.0, "unsubscribed");
                return Ok(());
            }
        }
        Err(Error::Transport(format!("unknown subscription id {}", id.0)))
    }

    fn publish(&self, topic: &str, data: StreamData) -> Result<()> {
        // Snapshot the handlers so the lock is not held across callbacks.
        let handlers: Vec<Arc<dyn SubscriptionHandler>> = self
            .subscriptions
            .read()
            .get(topic)
            .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default();

        for handler in handlers {
            handler.on_message(data.clone());
        }
        Ok(())
    }
}
