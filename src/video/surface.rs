//! Composite raster surface
//!
//! The owned RGBA8 canvas every sink paints into. The surface resizes when
//! the layout changes and keeps its content between same-size ticks, so
//! each tick only has to paint over the cells that have frames. Painting
//! scales with nearest-neighbour sampling and clips at the surface edges
//! instead of failing.

use bytes::Bytes;

use crate::media::frame::{FrameRect, VideoFrame, BYTES_PER_PIXEL};

/// Background color: opaque black
pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// The raster all sinks composite into
#[derive(Debug, Clone)]
pub struct CompositeSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CompositeSurface {
    /// Create a surface cleared to the background color
    pub fn new(width: u32, height: u32) -> Self {
        let mut surface = Self {
            width,
            height,
            pixels: vec![0; VideoFrame::expected_len(width, height)],
        };
        surface.clear();
        surface
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixel data, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Adopt new dimensions, clearing the surface
    ///
    /// A same-size resize is a no-op and keeps the current content.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; VideoFrame::expected_len(width, height)];
        self.clear();
    }

    /// Fill the whole surface with the background color
    pub fn clear(&mut self) {
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&BACKGROUND);
        }
    }

    /// Paint a frame into `rect`, scaling to fit and clipping at the edges
    pub fn paint(&mut self, frame: &VideoFrame, rect: FrameRect) {
        if rect.is_empty() || frame.is_empty() || self.width == 0 || self.height == 0 {
            return;
        }
        // Visible span of the rect; empty ranges skip off-surface rects
        let y0 = rect.y.max(0) as i64;
        let y1 = rect.bottom().min(self.height as i64);
        let x0 = rect.x.max(0) as i64;
        let x1 = rect.right().min(self.width as i64);
        for ty in y0..y1 {
            let dy = (ty - rect.y as i64) as u64;
            let sy = (dy * frame.height as u64 / rect.height as u64) as usize;
            for tx in x0..x1 {
                let dx = (tx - rect.x as i64) as u64;
                let sx = (dx * frame.width as u64 / rect.width as u64) as usize;
                let src = (sy * frame.width as usize + sx) * BYTES_PER_PIXEL;
                let dst = (ty as usize * self.width as usize + tx as usize) * BYTES_PER_PIXEL;
                self.pixels[dst..dst + BYTES_PER_PIXEL]
                    .copy_from_slice(&frame.data[src..src + BYTES_PER_PIXEL]);
            }
        }
    }

    /// Fill `rect` with a solid color, clipping at the edges
    ///
    /// Drawing primitive for render hooks (borders, overlays).
    pub fn fill_rect(&mut self, rect: FrameRect, rgba: [u8; 4]) {
        if rect.is_empty() || self.width == 0 || self.height == 0 {
            return;
        }
        let y0 = rect.y.max(0) as i64;
        let y1 = rect.bottom().min(self.height as i64);
        let x0 = rect.x.max(0) as i64;
        let x1 = rect.right().min(self.width as i64);
        for ty in y0..y1 {
            for tx in x0..x1 {
                let dst = (ty as usize * self.width as usize + tx as usize) * BYTES_PER_PIXEL;
                self.pixels[dst..dst + BYTES_PER_PIXEL].copy_from_slice(&rgba);
            }
        }
    }

    /// Snapshot the surface as an immutable frame
    pub fn to_frame(&self) -> VideoFrame {
        VideoFrame::from_raw_parts(self.width, self.height, Bytes::copy_from_slice(&self.pixels))
    }

    /// Sample one pixel, or `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = &self.pixels[offset..offset + BYTES_PER_PIXEL];
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_background() {
        let surface = CompositeSurface::new(2, 2);

        assert_eq!(surface.pixel(0, 0), Some(BACKGROUND));
        assert_eq!(surface.pixel(1, 1), Some(BACKGROUND));
    }

    #[test]
    fn test_paint_one_to_one() {
        let mut surface = CompositeSurface::new(4, 4);
        let frame = VideoFrame::solid(2, 2, [200, 0, 0, 255]);

        surface.paint(&frame, FrameRect::new(1, 1, 2, 2));

        assert_eq!(surface.pixel(0, 0), Some(BACKGROUND));
        assert_eq!(surface.pixel(1, 1), Some([200, 0, 0, 255]));
        assert_eq!(surface.pixel(2, 2), Some([200, 0, 0, 255]));
        assert_eq!(surface.pixel(3, 3), Some(BACKGROUND));
    }

    #[test]
    fn test_paint_scales_up() {
        let mut surface = CompositeSurface::new(4, 4);
        let frame = VideoFrame::solid(1, 1, [0, 200, 0, 255]);

        surface.paint(&frame, FrameRect::new(0, 0, 4, 4));

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(surface.pixel(x, y), Some([0, 200, 0, 255]));
            }
        }
    }

    #[test]
    fn test_paint_scales_down_nearest_neighbour() {
        // Four 2x2 quadrants with distinct colors
        let mut data = Vec::new();
        for y in 0..4u32 {
            for x in 0..4u32 {
                let color = match (x < 2, y < 2) {
                    (true, true) => [10, 0, 0, 255],
                    (false, true) => [0, 10, 0, 255],
                    (true, false) => [0, 0, 10, 255],
                    (false, false) => [10, 10, 0, 255],
                };
                data.extend_from_slice(&color);
            }
        }
        let frame = VideoFrame::new(4, 4, Bytes::from(data)).unwrap();

        let mut surface = CompositeSurface::new(2, 2);
        surface.paint(&frame, FrameRect::new(0, 0, 2, 2));

        // Each target pixel samples the top-left of its source block
        assert_eq!(surface.pixel(0, 0), Some([10, 0, 0, 255]));
        assert_eq!(surface.pixel(1, 0), Some([0, 10, 0, 255]));
        assert_eq!(surface.pixel(0, 1), Some([0, 0, 10, 255]));
        assert_eq!(surface.pixel(1, 1), Some([10, 10, 0, 255]));
    }

    #[test]
    fn test_paint_clips_negative_origin() {
        let mut surface = CompositeSurface::new(2, 2);
        let frame = VideoFrame::solid(2, 2, [99, 99, 99, 255]);

        surface.paint(&frame, FrameRect::new(-1, -1, 2, 2));

        assert_eq!(surface.pixel(0, 0), Some([99, 99, 99, 255]));
        assert_eq!(surface.pixel(1, 0), Some(BACKGROUND));
        assert_eq!(surface.pixel(0, 1), Some(BACKGROUND));
    }

    #[test]
    fn test_paint_clips_past_far_edge() {
        let mut surface = CompositeSurface::new(2, 2);
        let frame = VideoFrame::solid(4, 4, [77, 0, 77, 255]);

        surface.paint(&frame, FrameRect::new(1, 1, 4, 4));

        assert_eq!(surface.pixel(0, 0), Some(BACKGROUND));
        assert_eq!(surface.pixel(1, 1), Some([77, 0, 77, 255]));
    }

    #[test]
    fn test_paint_empty_rect_is_noop() {
        let mut surface = CompositeSurface::new(2, 2);
        let frame = VideoFrame::solid(2, 2, [1, 2, 3, 255]);

        surface.paint(&frame, FrameRect::new(0, 0, 0, 2));

        assert_eq!(surface.pixel(0, 0), Some(BACKGROUND));
    }

    #[test]
    fn test_resize_clears() {
        let mut surface = CompositeSurface::new(2, 2);
        surface.paint(&VideoFrame::solid(2, 2, [5, 5, 5, 255]), FrameRect::new(0, 0, 2, 2));

        surface.resize(3, 2);

        assert_eq!((surface.width(), surface.height()), (3, 2));
        assert_eq!(surface.pixel(0, 0), Some(BACKGROUND));
    }

    #[test]
    fn test_same_size_resize_keeps_content() {
        let mut surface = CompositeSurface::new(2, 2);
        surface.paint(&VideoFrame::solid(2, 2, [5, 5, 5, 255]), FrameRect::new(0, 0, 2, 2));

        surface.resize(2, 2);

        assert_eq!(surface.pixel(0, 0), Some([5, 5, 5, 255]));
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut surface = CompositeSurface::new(3, 3);

        surface.fill_rect(FrameRect::new(2, 2, 5, 5), [8, 8, 8, 255]);

        assert_eq!(surface.pixel(2, 2), Some([8, 8, 8, 255]));
        assert_eq!(surface.pixel(1, 1), Some(BACKGROUND));
    }

    #[test]
    fn test_to_frame_snapshot_is_independent() {
        let mut surface = CompositeSurface::new(2, 1);
        surface.fill_rect(FrameRect::new(0, 0, 1, 1), [42, 0, 0, 255]);

        let snapshot = surface.to_frame();
        surface.fill_rect(FrameRect::new(0, 0, 2, 1), [0, 42, 0, 255]);

        assert_eq!(snapshot.pixel(0, 0), Some([42, 0, 0, 255]));
        assert_eq!(snapshot.pixel(1, 0), Some(BACKGROUND));
        assert_eq!(surface.pixel(0, 0), Some([0, 42, 0, 255]));
    }
}
