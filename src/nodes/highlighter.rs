//! Feature highlighter node
//!
//! Accumulates feature coordinates from a detection stream and draws one
//! marker per buffered feature onto the next video frame, then clears the
//! buffer. The two callbacks share nothing but the buffer.

use crate::data::{Feature, FeatureBuffer, PixelFormat, StreamData, VideoFrame};
use crate::draw::{draw_ellipse_outline, MARKER_COLOR, MARKER_STROKE_WIDTH};
use crate::nodes::SyncStreamingNode;
use crate::Error;

/// Feature highlighter node
///
/// `on_feature` and `on_frame` may be invoked concurrently from different
/// dispatcher threads; the shared buffer is the only cross-call state.
pub struct FeatureHighlighterNode {
    features: FeatureBuffer,
}

impl FeatureHighlighterNode {
    /// Create a node with a fresh feature buffer
    pub fn new() -> Self {
        Self {
            features: FeatureBuffer::new(),
        }
    }

    /// Create a node sharing an existing feature buffer
    pub fn with_buffer(features: FeatureBuffer) -> Self {
        Self { features }
    }

    /// Buffer one feature for the next frame
    ///
    /// Features arriving while the buffer is full are silently dropped
    /// (capacity-drop policy, not a failure).
    pub fn on_feature(&self, feature: Feature) {
        self.features.push(feature);
    }

    /// Render the buffered features onto `frame`
    ///
    /// Drains the buffer atomically, draws one marker per drained feature at
    /// `(x + width/2, y + height/2)` with radius `1 / inverse_size`, and
    /// returns the annotated frame with `frame_number` and `timestamp_us`
    /// carried over unchanged. The input is consumed by value, so the caller
    /// never observes it mutated.
    pub fn on_frame(&self, frame: VideoFrame) -> Result<VideoFrame, Error> {
        if frame.format.bytes_per_pixel().is_none() {
            return Err(Error::Execution(format!(
                "FeatureHighlighter only supports RGB24 and RGBA32, got format={:?}",
                frame.format
            )));
        }
        frame.validate()?;

        let features = self.features.drain();
        tracing::debug!(
            count = features.len(),
            frame_number = frame.frame_number,
            "highlighting features"
        );

        let mut work = frame;
        for feature in &features {
            let cx = i64::from(feature.x) + i64::from(work.width / 2);
            let cy = i64::from(feature.y) + i64::from(work.height / 2);
            let radius = feature.radius();
            draw_ellipse_outline(
                &mut work,
                cx,
                cy,
                radius,
                radius,
                MARKER_STROKE_WIDTH,
                MARKER_COLOR,
            );
        }

        Ok(work)
    }
}

impl Default for FeatureHighlighterNode {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncStreamingNode for FeatureHighlighterNode {
    fn node_type(&self) -> &str {
        "FeatureHighlighter"
    }

    fn process(&self, data: StreamData) -> Result<Option<StreamData>, Error> {
        match data {
            StreamData::Feature(feature) => {
                self.on_feature(feature);
                Ok(None)
            }
            StreamData::Video(frame) => Ok(Some(StreamData::Video(self.on_frame(frame)?))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_at(frame: &VideoFrame, x: u32, y: u32) -> bool {
        let bpp = frame.format.bytes_per_pixel().unwrap();
        let idx = (y as usize * frame.width as usize + x as usize) * bpp;
        frame.pixel_data[idx..idx + 3] == MARKER_COLOR
    }

    fn test_frame(width: u32, height: u32) -> VideoFrame {
        VideoFrame {
            frame_number: 42,
            timestamp_us: 1_234_567,
            ..VideoFrame::filled(width, height, PixelFormat::Rgb24, 0)
        }
    }

    #[test]
    fn test_empty_buffer_passes_frame_through() {
        let node = FeatureHighlighterNode::new();
        let input = test_frame(64, 48);
        let expected_pixels = input.pixel_data.clone();

        let output = node.on_frame(input).unwrap();

        assert_eq!(output.pixel_data, expected_pixels);
        assert_eq!(output.frame_number, 42);
        assert_eq!(output.timestamp_us, 1_234_567);
    }

    #[test]
    fn test_marker_centered_relative_to_image_center() {
        let node = FeatureHighlighterNode::new();
        // Offset (10, -5) on a 100x100 frame puts the marker at (60, 45);
        // inverse_size 0.5 gives radius 2, so with stroke 4 the painted band
        // is every pixel within distance 4 of the center.
        node.on_feature(Feature::new(10, -5, 0.5));

        let output = node.on_frame(test_frame(100, 100)).unwrap();

        assert!(marker_at(&output, 60, 45)); // center, d = 0
        assert!(marker_at(&output, 64, 45)); // d = 4, outer edge
        assert!(marker_at(&output, 56, 45)); // d = 4, outer edge
        assert!(marker_at(&output, 60, 49)); // d = 4, outer edge
        assert!(!marker_at(&output, 65, 45)); // d = 5, past the band
        assert!(!marker_at(&output, 60, 50)); // d = 5, past the band
    }

    #[test]
    fn test_render_drains_buffer() {
        let node = FeatureHighlighterNode::new();
        node.on_feature(Feature::new(0, 0, 0.5));
        node.on_feature(Feature::new(5, 5, 0.5));

        let first = node.on_frame(test_frame(32, 32)).unwrap();
        assert!(marker_at(&first, 16, 16));

        // The buffer was cleared by the first render, so a second frame
        // comes back untouched.
        let input = test_frame(32, 32);
        let expected_pixels = input.pixel_data.clone();
        let second = node.on_frame(input).unwrap();
        assert_eq!(second.pixel_data, expected_pixels);
    }

    #[test]
    fn test_overflow_renders_exactly_capacity_markers() {
        let node = FeatureHighlighterNode::new();
        for n in 0..300 {
            node.on_feature(Feature::new(n, 0, 1.0));
        }
        assert_eq!(node.features.len(), 256);

        node.on_frame(test_frame(16, 16)).unwrap();
        assert!(node.features.is_empty());
    }

    #[test]
    fn test_degenerate_inverse_size_leaves_frame_unpainted() {
        let node = FeatureHighlighterNode::new();
        node.on_feature(Feature::new(0, 0, 0.0)); // infinite radius
        node.on_feature(Feature::new(0, 0, -1.0)); // negative radius

        let input = test_frame(32, 32);
        let expected_pixels = input.pixel_data.clone();
        let output = node.on_frame(input).unwrap();

        assert_eq!(output.pixel_data, expected_pixels);
        assert!(node.features.is_empty());
    }

    #[test]
    fn test_rejects_planar_formats() {
        let node = FeatureHighlighterNode::new();
        let frame = VideoFrame::filled(16, 16, PixelFormat::I420, 0);

        let result = node.on_frame(frame);
        assert!(matches!(result, Err(Error::Execution(_))));
    }

    #[test]
    fn test_rejects_size_mismatch() {
        let node = FeatureHighlighterNode::new();
        let mut frame = test_frame(16, 16);
        frame.pixel_data.truncate(10);

        let result = node.on_frame(frame);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_process_routes_both_streams() {
        let node = FeatureHighlighterNode::new();

        let absorbed = node
            .process(StreamData::Feature(Feature::new(1, 2, 0.5)))
            .unwrap();
        assert!(absorbed.is_none());
        assert_eq!(node.features.len(), 1);

        let emitted = node
            .process(StreamData::Video(test_frame(32, 32)))
            .unwrap();
        assert!(matches!(emitted, Some(StreamData::Video(_))));
        assert!(node.features.is_empty());
    }
}
