//! Composite renderer
//!
//! One render tick resolves the surface dimensions, paints every sink's
//! latest frame into its cell, runs the per-source render hooks and
//! publishes a snapshot into the session's capture track. A sink whose
//! track has not produced a frame yet leaves its cell untouched; the tick
//! never fails.

use crate::config::MixerConfig;
use crate::media::frame::FrameRect;
use crate::media::track::{VideoTrack, VideoTrackWriter};
use crate::registry::store::SourceRegistry;
use crate::video::layout;
use crate::video::surface::CompositeSurface;

/// Paints registered sinks into the composite surface
pub struct VideoCompositor {
    surface: CompositeSurface,
    default_width: u32,
    default_height: u32,
    capture: Option<VideoTrackWriter>,
    disable_logs: bool,
    ticks: u64,
    frames_painted: u64,
    publish_stalled: bool,
}

impl VideoCompositor {
    /// Create a compositor with a surface at the configured fallback size
    pub fn new(config: &MixerConfig) -> Self {
        Self {
            surface: CompositeSurface::new(config.video_width, config.video_height),
            default_width: config.video_width,
            default_height: config.video_height,
            capture: None,
            disable_logs: config.disable_logs,
            ticks: 0,
            frames_painted: 0,
            publish_stalled: false,
        }
    }

    /// Open the capture track for a new session
    ///
    /// The returned track carries one snapshot per tick. Any previous
    /// session's capture writer is replaced, which closes its track once
    /// the old consumers drop their ends. The tick and paint counters
    /// restart so they stay in step with the session clock.
    pub(crate) fn begin_capture(&mut self) -> VideoTrack {
        let (writer, track) =
            VideoTrack::channel_sized(self.surface.width(), self.surface.height());
        self.capture = Some(writer);
        self.publish_stalled = false;
        self.ticks = 0;
        self.frames_painted = 0;
        track
    }

    /// Render one composite frame
    pub fn render_tick(&mut self, registry: &SourceRegistry) {
        let (base_width, base_height) = registry
            .base_cell()
            .unwrap_or((self.default_width, self.default_height));

        let (width, height) = match registry.fullsurface_dimensions() {
            Some(dims) => dims,
            None => layout::grid_dimensions(registry.sink_count(), base_width, base_height),
        };
        self.surface.resize(width, height);

        for (index, sink) in registry.sinks().iter().enumerate() {
            let rect = if sink.hints().fullsurface {
                // Defaults to the surface origin; explicit hints still win
                FrameRect::new(
                    sink.hints().left.unwrap_or(0),
                    sink.hints().top.unwrap_or(0),
                    sink.width(),
                    sink.height(),
                )
            } else {
                layout::draw_rect(
                    sink.hints(),
                    index,
                    sink.width(),
                    sink.height(),
                    base_width,
                    base_height,
                )
            };

            if let Some(frame) = sink.latest_frame() {
                self.surface.paint(&frame, rect);
                self.frames_painted += 1;
            }

            // Hooks run whether or not a frame arrived, with the cell rect
            if let Some(hook) = &sink.hints().on_render {
                hook(&mut self.surface, rect);
            }
        }

        if let Some(capture) = &self.capture {
            match capture.publish(self.surface.to_frame()) {
                Ok(()) => self.publish_stalled = false,
                Err(_) => {
                    // Warn once per stall, not once per tick
                    if !self.publish_stalled {
                        self.publish_stalled = true;
                        if !self.disable_logs {
                            tracing::warn!("Composite capture has no consumers; ticking on");
                        }
                    }
                }
            }
        }

        self.ticks += 1;
    }

    /// The composite surface as of the last tick
    pub fn surface(&self) -> &CompositeSurface {
        &self.surface
    }

    /// Wipe the surface back to the background color
    pub(crate) fn clear_surface(&mut self) {
        self.surface.clear();
    }

    /// Render ticks since the current session opened its capture track
    /// (or since creation, before any session)
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Sink frames painted since the current session opened its capture
    /// track (or since creation, before any session)
    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }
}

impl std::fmt::Debug for VideoCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoCompositor")
            .field("surface", &(self.surface.width(), self.surface.height()))
            .field("capturing", &self.capture.is_some())
            .field("ticks", &self.ticks)
            .field("frames_painted", &self.frames_painted)
            .finish()
    }
}
