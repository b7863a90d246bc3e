//! Video compositing
//!
//! This module provides:
//! - Grid layout arithmetic for sink placement
//! - The RGBA8 composite surface with clipped, scaling paint
//! - The compositor driving one surface render per tick

pub mod compositor;
pub mod layout;
pub mod surface;

pub use compositor::VideoCompositor;
pub use layout::GRID_COLUMNS;
pub use surface::{CompositeSurface, BACKGROUND};
