//! Feature highlighter - marker overlay node for robot vision pipelines
//!
//! Buffers feature coordinates arriving on one stream and draws a marker for
//! each buffered feature onto the next frame of an image stream, then
//! republishes the annotated image.
//!
//! # Architecture
//!
//! - `data`: the message types (`Feature`, `VideoFrame`, `StreamData`) and
//!   the bounded `FeatureBuffer` both callbacks share
//! - `nodes`: the `FeatureHighlighterNode` (accumulate + overlay) and the
//!   `SyncStreamingNode` trait
//! - `transport`: the `Dispatcher` seam to the external messaging
//!   collaborator, subscription reconciliation, and an in-process dispatcher
//! - `config` / `service`: the polled parameter surface and the context
//!   object keeping subscriptions aligned with it
//!
//! # Example
//!
//! ```
//! use feature_highlighter::data::{Feature, PixelFormat, VideoFrame};
//! use feature_highlighter::nodes::FeatureHighlighterNode;
//!
//! let node = FeatureHighlighterNode::new();
//! node.on_feature(Feature::new(10, -5, 0.5));
//!
//! let frame = VideoFrame::filled(100, 100, PixelFormat::Rgb24, 0);
//! let annotated = node.on_frame(frame).unwrap();
//! assert_eq!(annotated.width, 100);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod data;
mod draw;
mod error;
pub mod nodes;
pub mod service;
pub mod transport;

pub use error::{Error, Result};

/// Initialize logging for the feature highlighter
///
/// This should be called once at startup.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("feature highlighter initialized");
    Ok(())
}
