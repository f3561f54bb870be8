//! Software marker rasterization
//!
//! Draws ellipse outlines directly into raw pixel buffers. Only packed RGB
//! formats are drawable; the node rejects planar formats before calling in
//! here.

use crate::data::{PixelFormat, VideoFrame};

/// Marker stroke width in pixels
pub const MARKER_STROKE_WIDTH: u32 = 4;

/// Marker color (full-intensity green)
pub const MARKER_COLOR: [u8; 3] = [0, 255, 0];

/// Draw a full-360° ellipse outline centered at (cx, cy)
///
/// The stroke band is centered on the ellipse curve: a pixel is painted when
/// its radial distance from the curve is at most half the stroke width,
/// matching OpenCV-style thickness semantics. Pixels outside the frame are
/// clipped. A non-finite or negative radius paints nothing; a zero radius
/// collapses to a filled dot the size of the stroke.
pub(crate) fn draw_ellipse_outline(
    frame: &mut VideoFrame,
    cx: i64,
    cy: i64,
    radius_x: f64,
    radius_y: f64,
    stroke: u32,
    color: [u8; 3],
) {
    if !radius_x.is_finite() || !radius_y.is_finite() || radius_x < 0.0 || radius_y < 0.0 {
        return;
    }
    let bytes_per_pixel = match frame.format.bytes_per_pixel() {
        Some(bpp) => bpp,
        None => return,
    };

    let half = f64::from(stroke) / 2.0;

    // Scan only the bounding box of the outer edge of the stroke band.
    let x0 = ((cx as f64 - radius_x - half).floor() as i64).max(0);
    let x1 = ((cx as f64 + radius_x + half).ceil() as i64).min(i64::from(frame.width) - 1);
    let y0 = ((cy as f64 - radius_y - half).floor() as i64).max(0);
    let y1 = ((cy as f64 + radius_y + half).ceil() as i64).min(i64::from(frame.height) - 1);

    let width = frame.width as usize;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = (x - cx) as f64;
            let dy = (y - cy) as f64;

            // Signed distance from the ellipse curve, exact for circles and
            // a min-axis approximation otherwise.
            let dist = if radius_x == radius_y {
                (dx * dx + dy * dy).sqrt() - radius_x
            } else {
                let nx = dx / radius_x.max(f64::EPSILON);
                let ny = dy / radius_y.max(f64::EPSILON);
                ((nx * nx + ny * ny).sqrt() - 1.0) * radius_x.min(radius_y)
            };

            if dist.abs() <= half {
                let idx = (y as usize * width + x as usize) * bytes_per_pixel;
                frame.pixel_data[idx..idx + 3].copy_from_slice(&color);
                if bytes_per_pixel == 4 {
                    // Markers are opaque.
                    frame.pixel_data[idx + 3] = 0xFF;
                }
            }
        }
    }
}
