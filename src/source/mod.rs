//! Source registration types
//!
//! Defines what callers hand to the recorder: input sources bundling
//! tracks with per-source layout hints.

pub mod input;

pub use input::{InputSource, LayoutHints, RenderHook, SourceId};
