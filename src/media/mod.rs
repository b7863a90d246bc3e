//! Media primitives for mixing and compositing
//!
//! This module provides:
//! - RGBA8 video frames and placement rectangles
//! - Latest-frame video tracks and pull-based audio tracks
//! - The mixed output stream handed to delegate recorders

pub mod frame;
pub mod stream;
pub mod track;

pub use frame::{FrameRect, VideoFrame, BYTES_PER_PIXEL};
pub use stream::MixedStream;
pub use track::{AudioTrack, AudioTrackWriter, VideoTrack, VideoTrackWriter, AUDIO_QUEUE_CAPACITY};
