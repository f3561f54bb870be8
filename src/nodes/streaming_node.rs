//! Streaming node trait for synchronous data processing

use crate::data::StreamData;
use crate::Error;

/// Synchronous streaming node
///
/// Implementations process one message at a time and run to completion
/// before returning; there is no suspension or cancellation. The dispatcher
/// may invoke `process` concurrently from multiple threads, so
/// implementations guard their own shared state.
pub trait SyncStreamingNode: Send + Sync {
    /// Get the node type name
    fn node_type(&self) -> &str;

    /// Process a single message
    ///
    /// Returns `Ok(None)` when the input is consumed without producing an
    /// output (e.g. accumulated into internal state), `Ok(Some(_))` when the
    /// input maps to one output message.
    fn process(&self, data: StreamData) -> Result<Option<StreamData>, Error>;
}
