//! Node implementations
//!
//! This module contains the streaming node trait and the feature highlighter
//! node itself.

pub mod highlighter;
pub mod streaming_node;

pub use highlighter::FeatureHighlighterNode;
pub use streaming_node::SyncStreamingNode;
