//! Input sources and layout hints
//!
//! An input source bundles the tracks one participant contributes (any mix
//! of audio and video) together with per-source layout hints. Sources are
//! registered with the recorder; what each component contributes to the
//! output is decided at registration time, never by the caller.

use std::sync::Arc;

use crate::config::MAX_VIDEO_DIMENSION;
use crate::media::frame::FrameRect;
use crate::media::track::{AudioTrack, VideoTrack};
use crate::video::surface::CompositeSurface;

/// Identifier assigned to a source at registration
pub type SourceId = u64;

/// Callback invoked after a source's cell is painted each tick
///
/// Receives the composite surface and the rectangle the source occupies,
/// and may draw over it (overlays, borders, text rendered by the caller).
pub type RenderHook = Arc<dyn Fn(&mut CompositeSurface, FrameRect) + Send + Sync>;

/// Per-source layout overrides
///
/// Every field is optional; unset fields fall back to the positional grid
/// default (for left/top) or to the dimension precedence chain (for
/// width/height: hint, then track native size, then config default).
#[derive(Clone, Default)]
pub struct LayoutHints {
    /// Override for the cell's left edge
    pub left: Option<i32>,
    /// Override for the cell's top edge
    pub top: Option<i32>,
    /// Override for the cell's width
    pub width: Option<u32>,
    /// Override for the cell's height
    pub height: Option<u32>,
    /// Claim the entire surface; the composite adopts this source's dimensions
    pub fullsurface: bool,
    /// Post-paint draw callback
    pub on_render: Option<RenderHook>,
}

impl LayoutHints {
    /// Create empty hints (grid defaults apply)
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the cell's top-left corner
    pub fn position(mut self, left: i32, top: i32) -> Self {
        self.left = Some(left);
        self.top = Some(top);
        self
    }

    /// Pin the cell's dimensions
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Claim the entire surface
    pub fn fullsurface(mut self) -> Self {
        self.fullsurface = true;
        self
    }

    /// Install a post-paint draw callback
    pub fn on_render(
        mut self,
        hook: impl Fn(&mut CompositeSurface, FrameRect) + Send + Sync + 'static,
    ) -> Self {
        self.on_render = Some(Arc::new(hook));
        self
    }

    /// Bring the overrides into range, returning whether anything changed
    ///
    /// A zero dimension would produce an invisible cell and divide the
    /// scaler by zero, so it is treated as unset. Dimensions past
    /// [`MAX_VIDEO_DIMENSION`] are capped to it.
    pub(crate) fn normalize(&mut self) -> bool {
        let mut adjusted = false;
        for dim in [&mut self.width, &mut self.height] {
            match *dim {
                Some(0) => {
                    *dim = None;
                    adjusted = true;
                }
                Some(value) if value > MAX_VIDEO_DIMENSION => {
                    *dim = Some(MAX_VIDEO_DIMENSION);
                    adjusted = true;
                }
                _ => {}
            }
        }
        adjusted
    }
}

impl std::fmt::Debug for LayoutHints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutHints")
            .field("left", &self.left)
            .field("top", &self.top)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fullsurface", &self.fullsurface)
            .field("on_render", &self.on_render.is_some())
            .finish()
    }
}

/// One participant's contribution to the composite
#[derive(Debug, Clone, Default)]
pub struct InputSource {
    audio: Vec<AudioTrack>,
    video: Vec<VideoTrack>,
    hints: LayoutHints,
}

impl InputSource {
    /// Create a source with no tracks and default hints
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an audio track
    pub fn with_audio(mut self, track: AudioTrack) -> Self {
        self.audio.push(track);
        self
    }

    /// Add a video track
    pub fn with_video(mut self, track: VideoTrack) -> Self {
        self.video.push(track);
        self
    }

    /// Attach layout hints
    pub fn with_hints(mut self, hints: LayoutHints) -> Self {
        self.hints = hints;
        self
    }

    /// All audio tracks this source contributes
    pub fn audio_tracks(&self) -> &[AudioTrack] {
        &self.audio
    }

    /// All video tracks this source contributes
    pub fn video_tracks(&self) -> &[VideoTrack] {
        &self.video
    }

    /// The video track a sink binds to (the first one added)
    pub fn primary_video(&self) -> Option<&VideoTrack> {
        self.video.first()
    }

    /// Layout hints for this source
    pub fn hints(&self) -> &LayoutHints {
        &self.hints
    }

    pub(crate) fn hints_mut(&mut self) -> &mut LayoutHints {
        &mut self.hints
    }

    /// Whether any audio track is present
    pub fn has_audio(&self) -> bool {
        !self.audio.is_empty()
    }

    /// Whether any video track is present
    pub fn has_video(&self) -> bool {
        !self.video.is_empty()
    }

    /// Whether the source contributes nothing at all
    pub fn is_empty(&self) -> bool {
        self.audio.is_empty() && self.video.is_empty()
    }
}
