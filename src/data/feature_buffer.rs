//! Bounded shared buffer for pending features
//!
//! Both the accumulator callback and the renderer callback touch this buffer,
//! possibly from different dispatcher threads. One mutex guards it; critical
//! sections are append and swap-out only, never drawing work.

use parking_lot::Mutex;
use std::sync::Arc;

use super::Feature;

/// Maximum number of features held between frames
pub const FEATURE_BUFFER_CAPACITY: usize = 256;

/// Mutex-guarded feature buffer with a fixed capacity
///
/// Insertions beyond capacity are silently dropped (drop-newest policy);
/// existing entries are preserved. `drain` reads and clears the buffer as one
/// critical section, so a concurrent insertion lands either before or after
/// the swap, never mid-render. Clones share the underlying buffer.
pub struct FeatureBuffer {
    entries: Arc<Mutex<Vec<Feature>>>,
    capacity: usize,
}

impl FeatureBuffer {
    /// Create a buffer with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(FEATURE_BUFFER_CAPACITY)
    }

    /// Create a buffer with a custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append a feature if the buffer is not full
    ///
    /// Returns `true` when stored. A full buffer drops the feature without
    /// error; the drop is a back-pressure policy, not a failure.
    pub fn push(&self, feature: Feature) -> bool {
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            tracing::trace!(capacity = self.capacity, "feature buffer full, dropping feature");
            return false;
        }
        entries.push(feature);
        tracing::debug!(len = entries.len(), "buffered feature");
        true
    }

    /// Atomically take every buffered feature, leaving the buffer empty
    pub fn drain(&self) -> Vec<Feature> {
        std::mem::take(&mut *self.entries.lock())
    }

    /// Get the current number of buffered features
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Get the buffer capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Clone for FeatureBuffer {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            capacity: self.capacity,
        }
    }
}

impl Default for FeatureBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(n: i32) -> Feature {
        Feature::new(n, -n, 1.0)
    }

    #[test]
    fn test_push_within_capacity() {
        let buffer = FeatureBuffer::new();

        assert!(buffer.push(feature(1)));
        assert!(buffer.push(feature(2)));

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.capacity(), FEATURE_BUFFER_CAPACITY);
    }

    #[test]
    fn test_push_beyond_capacity_drops_newest() {
        let buffer = FeatureBuffer::new();

        for n in 0..300 {
            buffer.push(feature(n));
        }

        // The 257th and later insertions are no-ops.
        assert_eq!(buffer.len(), 256);

        // Existing entries are preserved; the overflow never displaced them.
        let drained = buffer.drain();
        assert_eq!(drained.len(), 256);
        assert_eq!(drained[0], feature(0));
        assert_eq!(drained[255], feature(255));
    }

    #[test]
    fn test_drain_preserves_arrival_order() {
        let buffer = FeatureBuffer::new();
        buffer.push(feature(1));
        buffer.push(feature(2));
        buffer.push(feature(3));

        let drained = buffer.drain();
        assert_eq!(drained, vec![feature(1), feature(2), feature(3)]);
    }

    #[test]
    fn test_drain_leaves_buffer_empty() {
        let buffer = FeatureBuffer::new();
        buffer.push(feature(1));

        assert_eq!(buffer.drain().len(), 1);
        assert!(buffer.is_empty());

        // Draining an empty buffer is fine too.
        assert!(buffer.drain().is_empty());
    }

    #[test]
    fn test_clone_shares_underlying_buffer() {
        let buffer1 = FeatureBuffer::new();
        let buffer2 = buffer1.clone();

        buffer1.push(feature(1));
        assert_eq!(buffer2.len(), 1);

        buffer2.drain();
        assert!(buffer1.is_empty());
    }

    #[test]
    fn test_concurrent_push_and_drain() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::thread;

        let buffer = FeatureBuffer::with_capacity(64);
        let accepted = Arc::new(AtomicUsize::new(0));
        let drained = Arc::new(AtomicUsize::new(0));

        let mut handles = vec![];
        for i in 0..4 {
            let buf = buffer.clone();
            let accepted = Arc::clone(&accepted);
            handles.push(thread::spawn(move || {
                for j in 0..500 {
                    if buf.push(feature(i * 500 + j)) {
                        accepted.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }));
        }

        let drainer = {
            let buf = buffer.clone();
            let drained = Arc::clone(&drained);
            thread::spawn(move || {
                for _ in 0..200 {
                    drained.fetch_add(buf.drain().len(), Ordering::Relaxed);
                    thread::yield_now();
                }
            })
        };

        for handle in handles {
            handle.join().unwrap();
        }
        drainer.join().unwrap();

        // Every accepted insertion shows up in exactly one drain: no
        // insertion is lost or double-counted.
        let leftover = buffer.drain().len();
        assert_eq!(
            accepted.load(Ordering::Relaxed),
            drained.load(Ordering::Relaxed) + leftover
        );
    }
}
