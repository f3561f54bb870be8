//! Subscription reconciliation
//!
//! The desired source topics are polled from the parameter surface; a
//! subscription only moves when the desired topic actually changed. The
//! comparison is a pure function so it can be tested independently of any
//! dispatcher.

/// Action produced when a subscription must move to a new topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resubscribe {
    /// Topic to subscribe to
    pub topic: String,
}

/// Compare the current subscription topic against the desired one
///
/// Returns `None` when they already match or when the desired topic is
/// empty (an empty topic is never subscribable), `Some(Resubscribe)` when
/// the subscription must move.
pub fn reconcile(current: Option<&str>, desired: &str) -> Option<Resubscribe> {
    if desired.is_empty() {
        return None;
    }
    match current {
        Some(topic) if topic == desired => None,
        _ => Some(Resubscribe {
            topic: desired.to_string(),
        }),
    }
}
