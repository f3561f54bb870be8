//! Video frame types

use serde::{Deserialize, Serialize};

/// Pixel format for video frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum PixelFormat {
    /// YUV 4:2:0 planar
    /// Layout: Y plane (width*height), U plane (width/2 * height/2), V plane (width/2 * height/2)
    Yuv420p = 1,

    /// I420 (identical to YUV420P, alternate name for WebRTC compat)
    I420 = 2,

    /// NV12 (semi-planar, Y plane + interleaved UV)
    Nv12 = 3,

    /// RGB24 (packed 24-bit RGB, no padding)
    Rgb24 = 4,

    /// RGBA32 (packed 32-bit RGBA with alpha)
    Rgba32 = 5,
}

impl PixelFormat {
    /// Calculate expected buffer size in bytes
    pub fn buffer_size(&self, width: u32, height: u32) -> usize {
        // Widen before multiplying: width * height * 4 overflows u32 for
        // large dimensions.
        let pixels = width as usize * height as usize;
        match self {
            PixelFormat::Yuv420p | PixelFormat::I420 | PixelFormat::Nv12 => pixels * 3 / 2,
            PixelFormat::Rgb24 => pixels * 3,
            PixelFormat::Rgba32 => pixels * 4,
        }
    }

    /// Bytes per pixel for packed formats; `None` for planar YUV layouts
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            PixelFormat::Rgb24 => Some(3),
            PixelFormat::Rgba32 => Some(4),
            _ => None,
        }
    }
}

/// One video frame with sequence and timestamp metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFrame {
    /// Raw pixel data, laid out according to `format`
    pub pixel_data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format of `pixel_data`
    pub format: PixelFormat,
    /// Monotonic frame sequence number, assigned by the producer
    pub frame_number: u64,
    /// Capture timestamp in microseconds, assigned by the producer
    pub timestamp_us: i64,
}

impl VideoFrame {
    /// Create a frame filled with a single byte value (useful in tests)
    pub fn filled(width: u32, height: u32, format: PixelFormat, value: u8) -> Self {
        Self {
            pixel_data: vec![value; format.buffer_size(width, height)],
            width,
            height,
            format,
            frame_number: 0,
            timestamp_us: 0,
        }
    }

    /// Check that `pixel_data` matches the declared dimensions and format
    pub fn validate(&self) -> crate::Result<()> {
        let expected = self.format.buffer_size(self.width, self.height);
        if self.pixel_data.len() != expected {
            return Err(crate::Error::InvalidData(format!(
                "{:?} data size mismatch: expected {}, got {}",
                self.format,
                expected,
                self.pixel_data.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_format_buffer_size() {
        assert_eq!(PixelFormat::Yuv420p.buffer_size(1280, 720), 1_382_400);
        assert_eq!(PixelFormat::Rgb24.buffer_size(1280, 720), 2_764_800);
        assert_eq!(PixelFormat::Rgba32.buffer_size(1280, 720), 3_686_400);
    }

    #[test]
    fn test_buffer_size_large_dimensions() {
        // Pixel counts past u32::MAX bytes must not wrap.
        assert_eq!(
            PixelFormat::Rgb24.buffer_size(40_000, 40_000),
            4_800_000_000
        );
        assert_eq!(
            PixelFormat::Rgba32.buffer_size(40_000, 40_000),
            6_400_000_000
        );
    }

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelFormat::Rgb24.bytes_per_pixel(), Some(3));
        assert_eq!(PixelFormat::Rgba32.bytes_per_pixel(), Some(4));
        assert_eq!(PixelFormat::I420.bytes_per_pixel(), None);
    }

    #[test]
    fn test_validate() {
        let frame = VideoFrame::filled(4, 4, PixelFormat::Rgb24, 0);
        assert!(frame.validate().is_ok());

        let mut truncated = frame;
        truncated.pixel_data.pop();
        assert!(truncated.validate().is_err());
    }
}
