//! Composite grid layout
//!
//! Pure placement arithmetic. The grid is two columns wide: one source
//! fills the surface, two sit side by side, and every further pair adds a
//! row. Cell positions are multiples of the base cell size, which is taken
//! from the first registered sink. Per-source hints override individual
//! fields of the computed placement.

use crate::media::frame::FrameRect;
use crate::source::input::LayoutHints;

/// Columns in the default grid
pub const GRID_COLUMNS: u32 = 2;

/// Surface dimensions needed to hold `sink_count` grid cells
///
/// With no sinks the base dimensions pass through unchanged. The
/// arithmetic saturates rather than wrapping, so even an absurd roster
/// yields a well-defined surface.
pub fn grid_dimensions(sink_count: usize, base_width: u32, base_height: u32) -> (u32, u32) {
    let count = u32::try_from(sink_count).unwrap_or(u32::MAX);
    if count == 0 {
        return (base_width, base_height);
    }
    let columns = count.min(GRID_COLUMNS);
    let rows = count.div_ceil(GRID_COLUMNS);
    (
        base_width.saturating_mul(columns),
        base_height.saturating_mul(rows),
    )
}

/// Default top-left corner for the sink at `index` in registration order
///
/// Positions saturate at the `i32` edge instead of wrapping.
pub fn default_position(index: usize, base_width: u32, base_height: u32) -> (i32, i32) {
    let column = (index % GRID_COLUMNS as usize) as u64;
    let row = (index / GRID_COLUMNS as usize) as u64;
    let x = column
        .saturating_mul(base_width as u64)
        .min(i32::MAX as u64) as i32;
    let y = row
        .saturating_mul(base_height as u64)
        .min(i32::MAX as u64) as i32;
    (x, y)
}

/// Final placement for one sink
///
/// `width`/`height` are the sink's resolved dimensions; `hints` may
/// override either coordinate of the grid position independently.
pub fn draw_rect(
    hints: &LayoutHints,
    index: usize,
    width: u32,
    height: u32,
    base_width: u32,
    base_height: u32,
) -> FrameRect {
    let (default_x, default_y) = default_position(index, base_width, base_height);
    FrameRect {
        x: hints.left.unwrap_or(default_x),
        y: hints.top.unwrap_or(default_y),
        width,
        height,
    }
}
