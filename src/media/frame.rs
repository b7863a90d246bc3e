//! Raster frame types
//!
//! This module defines the pixel frame exchanged between tracks, the
//! compositor and the delegate recorder, plus the placement rectangle used
//! when painting a frame onto the composite surface.

use bytes::Bytes;

use crate::error::{MixerError, Result};

/// Bytes per pixel for RGBA8 frames
pub const BYTES_PER_PIXEL: usize = 4;

/// A single video frame: an RGBA8 raster in row-major order
///
/// This is designed to be cheap to clone due to `Bytes` reference counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel data, `width * height * 4` bytes (zero-copy via reference counting)
    pub data: Bytes,
}

impl VideoFrame {
    /// Create a frame, validating that the payload matches the dimensions
    pub fn new(width: u32, height: u32, data: Bytes) -> Result<Self> {
        let expected = Self::expected_len(width, height);
        if data.len() != expected {
            return Err(MixerError::InvalidFrame {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a frame from parts already known to be consistent
    pub(crate) fn from_raw_parts(width: u32, height: u32, data: Bytes) -> Self {
        debug_assert_eq!(data.len(), Self::expected_len(width, height));
        Self {
            width,
            height,
            data,
        }
    }

    /// Create a frame filled with a single color
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(Self::expected_len(width, height));
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data: Bytes::from(data),
        }
    }

    /// Byte length implied by the given dimensions
    pub fn expected_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * BYTES_PER_PIXEL
    }

    /// Whether the frame has no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Sample one pixel, or `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = &self.data[offset..offset + BYTES_PER_PIXEL];
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Placement rectangle on the composite surface
///
/// Coordinates are signed: hints may place a source partially (or fully)
/// outside the surface, and painting clips instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    /// Left edge in surface coordinates
    pub x: i32,
    /// Top edge in surface coordinates
    pub y: i32,
    /// Painted width in pixels
    pub width: u32,
    /// Painted height in pixels
    pub height: u32,
}

impl FrameRect {
    /// Create a new rectangle
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Right edge in surface coordinates (exclusive)
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Bottom edge in surface coordinates (exclusive)
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}

impl std::fmt::Display for FrameRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}@({},{})", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_new_valid() {
        let data = Bytes::from(vec![0u8; 2 * 2 * 4]);
        let frame = VideoFrame::new(2, 2, data).unwrap();

        assert_eq!(frame.width, 2);
        assert_eq!(frame.height, 2);
        assert_eq!(frame.data.len(), 16);
    }

    #[test]
    fn test_frame_new_rejects_short_payload() {
        let data = Bytes::from(vec![0u8; 10]);
        let err = VideoFrame::new(2, 2, data).unwrap_err();

        assert_eq!(
            err,
            MixerError::InvalidFrame {
                expected: 16,
                actual: 10,
            }
        );
    }

    #[test]
    fn test_frame_new_rejects_long_payload() {
        let data = Bytes::from(vec![0u8; 32]);
        let err = VideoFrame::new(2, 2, data).unwrap_err();

        assert_eq!(
            err,
            MixerError::InvalidFrame {
                expected: 16,
                actual: 32,
            }
        );
    }

    #[test]
    fn test_frame_solid() {
        let frame = VideoFrame::solid(3, 2, [10, 20, 30, 255]);

        assert_eq!(frame.data.len(), 3 * 2 * 4);
        assert_eq!(frame.pixel(0, 0), Some([10, 20, 30, 255]));
        assert_eq!(frame.pixel(2, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_frame_pixel_out_of_bounds() {
        let frame = VideoFrame::solid(2, 2, [1, 2, 3, 4]);

        assert_eq!(frame.pixel(2, 0), None);
        assert_eq!(frame.pixel(0, 2), None);
    }

    #[test]
    fn test_frame_empty() {
        let frame = VideoFrame::new(0, 0, Bytes::new()).unwrap();

        assert!(frame.is_empty());
        assert_eq!(frame.pixel(0, 0), None);
    }

    #[test]
    fn test_rect_empty() {
        assert!(FrameRect::new(0, 0, 0, 10).is_empty());
        assert!(FrameRect::new(0, 0, 10, 0).is_empty());
        assert!(!FrameRect::new(-5, -5, 1, 1).is_empty());
    }

    #[test]
    fn test_rect_edges() {
        let rect = FrameRect::new(-10, 20, 30, 40);

        assert_eq!(rect.right(), 20);
        assert_eq!(rect.bottom(), 60);
    }

    #[test]
    fn test_rect_display() {
        let rect = FrameRect::new(360, 0, 360, 240);

        assert_eq!(rect.to_string(), "360x240@(360,0)");
    }
}
