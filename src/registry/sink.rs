//! Registered video sinks
//!
//! A sink binds one source's video track into the composite. It resolves
//! its cell dimensions once, at registration, and carries the owning
//! source's layout hints so the compositor can place it each tick.

use crate::config::MAX_VIDEO_DIMENSION;
use crate::media::frame::VideoFrame;
use crate::media::track::VideoTrack;
use crate::source::input::{LayoutHints, SourceId};

/// A video component registered with the compositor
#[derive(Debug, Clone)]
pub struct VideoSink {
    source_id: SourceId,
    track: VideoTrack,
    width: u32,
    height: u32,
    hints: LayoutHints,
}

impl VideoSink {
    /// Bind a track, resolving cell dimensions
    ///
    /// Each dimension resolves independently: explicit hint, then the
    /// track's declared native size, then the configured default. A native
    /// size with a zero component is treated as undeclared; resolved
    /// dimensions are capped at [`MAX_VIDEO_DIMENSION`].
    pub(crate) fn new(
        source_id: SourceId,
        track: VideoTrack,
        hints: LayoutHints,
        default_width: u32,
        default_height: u32,
    ) -> Self {
        let native = track.native_size().filter(|&(w, h)| w > 0 && h > 0);
        let width = hints
            .width
            .or(native.map(|(w, _)| w))
            .unwrap_or(default_width)
            .min(MAX_VIDEO_DIMENSION);
        let height = hints
            .height
            .or(native.map(|(_, h)| h))
            .unwrap_or(default_height)
            .min(MAX_VIDEO_DIMENSION);
        Self {
            source_id,
            track,
            width,
            height,
            hints,
        }
    }

    /// Id of the source this sink belongs to
    pub fn source_id(&self) -> SourceId {
        self.source_id
    }

    /// Resolved cell width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Resolved cell height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Layout hints of the owning source
    pub fn hints(&self) -> &LayoutHints {
        &self.hints
    }

    /// The track's most recent frame, if any has arrived
    pub fn latest_frame(&self) -> Option<VideoFrame> {
        self.track.latest()
    }
}
