//! Data types carried across the dispatcher boundary
//!
//! This module contains the message types the highlighter consumes and
//! produces:
//! - Feature: one detected point of interest (offset + inverse-size)
//! - FeatureBuffer: bounded shared buffer of pending features
//! - VideoFrame: one image plus sequence/timestamp metadata

pub mod feature;
pub mod feature_buffer;
pub mod video;

pub use feature::Feature;
pub use feature_buffer::{FeatureBuffer, FEATURE_BUFFER_CAPACITY};
pub use video::{PixelFormat, VideoFrame};

/// Message envelope for the streams this node consumes and produces
#[derive(Debug, Clone, PartialEq)]
pub enum StreamData {
    /// Video frame data
    Video(VideoFrame),
    /// Detected feature data
    Feature(Feature),
}

impl StreamData {
    /// Get the type of this data
    pub fn data_type(&self) -> &str {
        match self {
            StreamData::Video(_) => "video",
            StreamData::Feature(_) => "feature",
        }
    }
}
