//! Recorder configuration

use std::sync::Arc;
use std::time::Duration;

use crate::media::MixedStream;

/// Default interval between composite render ticks
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(10);

/// Smallest interval the render loop will schedule
pub const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Default composite width when no source supplies dimensions
pub const DEFAULT_VIDEO_WIDTH: u32 = 360;

/// Default composite height when no source supplies dimensions
pub const DEFAULT_VIDEO_HEIGHT: u32 = 240;

/// Largest per-axis pixel dimension accepted for cells and surfaces
///
/// Applied wherever dimensions enter the system (config, hints, track
/// native sizes), keeping the grid arithmetic inside `u32`.
pub const MAX_VIDEO_DIMENSION: u32 = 8192;

/// Default container format requested from the delegate recorder
pub const DEFAULT_FORMAT: &str = "video/webm";

/// Callback invoked with the freshly built mixed stream before recording starts
pub type PreviewSink = Arc<dyn Fn(&MixedStream) + Send + Sync>;

/// Recorder configuration options
#[derive(Clone)]
pub struct MixerConfig {
    /// Interval between composite render ticks
    pub frame_interval: Duration,

    /// Fallback composite width (used when a source declares no dimensions)
    pub video_width: u32,

    /// Fallback composite height (used when a source declares no dimensions)
    pub video_height: u32,

    /// Container format passed through to the delegate recorder
    pub format: String,

    /// Observer handed the mixed stream when a session starts
    pub preview: Option<PreviewSink>,

    /// Suppress info-level lifecycle logging
    pub disable_logs: bool,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            frame_interval: DEFAULT_FRAME_INTERVAL,
            video_width: DEFAULT_VIDEO_WIDTH,
            video_height: DEFAULT_VIDEO_HEIGHT,
            format: DEFAULT_FORMAT.to_string(),
            preview: None,
            disable_logs: false,
        }
    }
}

impl MixerConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the render tick interval
    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval.max(MIN_FRAME_INTERVAL);
        self
    }

    /// Set the fallback composite dimensions
    pub fn video_size(mut self, width: u32, height: u32) -> Self {
        self.video_width = width.clamp(1, MAX_VIDEO_DIMENSION);
        self.video_height = height.clamp(1, MAX_VIDEO_DIMENSION);
        self
    }

    /// Set the container format requested from the delegate recorder
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Install a preview observer for the mixed stream
    pub fn preview(mut self, sink: impl Fn(&MixedStream) + Send + Sync + 'static) -> Self {
        self.preview = Some(Arc::new(sink));
        self
    }

    /// Suppress info-level lifecycle logging
    pub fn disable_logs(mut self) -> Self {
        self.disable_logs = true;
        self
    }
}

impl std::fmt::Debug for MixerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MixerConfig")
            .field("frame_interval", &self.frame_interval)
            .field("video_width", &self.video_width)
            .field("video_height", &self.video_height)
            .field("format", &self.format)
            .field("preview", &self.preview.is_some())
            .field("disable_logs", &self.disable_logs)
            .finish()
    }
}
