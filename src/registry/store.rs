//! Source registry implementation
//!
//! The central roster of registered sources and the video sinks derived
//! from them. The controller wraps the registry in `Arc<RwLock<..>>` so
//! the render loop can read it concurrently; all methods here are plain
//! synchronous mutations.

use crate::config::MixerConfig;
use crate::registry::sink::VideoSink;
use crate::source::input::{InputSource, SourceId};

/// Roster of registered sources and their video sinks
///
/// Sources keep their registration order; the grid layout is defined by
/// the order sinks were added, so it is never reshuffled.
#[derive(Debug)]
pub struct SourceRegistry {
    sources: Vec<(SourceId, InputSource)>,
    sinks: Vec<VideoSink>,
    next_id: SourceId,
    default_width: u32,
    default_height: u32,
    disable_logs: bool,
}

impl SourceRegistry {
    /// Create an empty registry from the recorder configuration
    ///
    /// Keeps the fallback cell dimensions and the log suppression flag;
    /// the config is not read again after this.
    pub fn new(config: &MixerConfig) -> Self {
        Self {
            sources: Vec::new(),
            sinks: Vec::new(),
            next_id: 0,
            default_width: config.video_width,
            default_height: config.video_height,
            disable_logs: config.disable_logs,
        }
    }

    /// Register one source, returning its assigned id
    ///
    /// A video-bearing source gets a sink for its primary video track. A
    /// source with no tracks at all still registers (its hints may matter)
    /// but contributes nothing to the output.
    pub fn add_source(&mut self, mut source: InputSource) -> SourceId {
        let id = self.next_id;
        self.next_id += 1;

        if source.hints_mut().normalize() {
            tracing::debug!(source_id = id, "Adjusted out-of-range layout hints");
        }

        if let Some(track) = source.primary_video() {
            self.sinks.push(VideoSink::new(
                id,
                track.clone(),
                source.hints().clone(),
                self.default_width,
                self.default_height,
            ));
        }
        if source.is_empty() {
            tracing::debug!(source_id = id, "Source has no tracks; roster entry only");
        }

        if !self.disable_logs {
            tracing::info!(
                source_id = id,
                audio = source.has_audio(),
                video = source.has_video(),
                sinks = self.sinks.len(),
                "Source registered"
            );
        }

        self.sources.push((id, source));
        id
    }

    /// Register several sources in order, returning their ids
    pub fn add_sources(
        &mut self,
        sources: impl IntoIterator<Item = InputSource>,
    ) -> Vec<SourceId> {
        sources
            .into_iter()
            .map(|source| self.add_source(source))
            .collect()
    }

    /// Drop every registered source and sink
    ///
    /// Ids keep increasing across resets. The audio graph is not touched:
    /// the session bus owns its taps and outlives the roster.
    pub fn reset(&mut self) {
        let sources = self.sources.len();
        let sinks = self.sinks.len();
        self.sources.clear();
        self.sinks.clear();
        if !self.disable_logs {
            tracing::info!(sources = sources, sinks = sinks, "Registry reset");
        }
    }

    /// Sinks in registration order
    pub fn sinks(&self) -> &[VideoSink] {
        &self.sinks
    }

    /// Number of video sinks
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Number of registered sources
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources are registered
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Look up a source by id
    pub fn source(&self, id: SourceId) -> Option<&InputSource> {
        self.sources
            .iter()
            .find(|(source_id, _)| *source_id == id)
            .map(|(_, source)| source)
    }

    /// Iterate sources with their ids, in registration order
    pub fn sources(&self) -> impl Iterator<Item = (SourceId, &InputSource)> {
        self.sources.iter().map(|(id, source)| (*id, source))
    }

    /// Cell size the grid is based on: the first sink's dimensions
    pub fn base_cell(&self) -> Option<(u32, u32)> {
        self.sinks.first().map(|sink| (sink.width(), sink.height()))
    }

    /// Dimensions claimed by a fullsurface source, if any declares one
    ///
    /// When several sources claim the surface, the last registered wins.
    /// A fullsurface source without a sink (audio only) falls back to its
    /// size hints, then to the configured defaults.
    pub fn fullsurface_dimensions(&self) -> Option<(u32, u32)> {
        let mut claimed = None;
        for (id, source) in &self.sources {
            if !source.hints().fullsurface {
                continue;
            }
            let sink_dims = self
                .sinks
                .iter()
                .find(|sink| sink.source_id() == *id)
                .map(|sink| (sink.width(), sink.height()));
            claimed = Some(match sink_dims {
                Some(dims) => dims,
                None => (
                    source.hints().width.unwrap_or(self.default_width),
                    source.hints().height.unwrap_or(self.default_height),
                ),
            });
        }
        claimed
    }
}
