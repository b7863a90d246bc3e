//! Delegate recorder boundary
//!
//! The controller does not encode or store anything itself; it hands the
//! mixed stream to a single-stream recorder supplied by the caller. This
//! module defines that seam: the recorder trait, the factory that builds
//! one per session, and the artifact callback invoked at stop.

use std::time::Duration;

use bytes::Bytes;

use crate::media::stream::MixedStream;

/// Callback receiving the finished recording artifact
pub type ArtifactCallback = Box<dyn FnOnce(Bytes) + Send + 'static>;

/// Settings handed to the factory when a session starts
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Container format requested (e.g. "video/webm")
    pub format: String,
    /// Interval the session's render loop publishes frames at
    pub frame_interval: Duration,
}

/// A single-stream recorder consuming the composite output
///
/// Implementations own encoding and storage. All methods are expected to
/// degrade gracefully rather than panic; the controller never inspects
/// their outcome.
pub trait StreamRecorder: Send {
    /// Begin consuming the mixed stream
    fn record(&mut self);

    /// Suspend consumption without tearing the recorder down
    fn pause(&mut self);

    /// Continue after a pause
    fn resume(&mut self);

    /// Finish and deliver the artifact through `on_done`
    ///
    /// The recorder is dropped right after this call returns, so
    /// implementations that finalize asynchronously must move whatever
    /// they need into the task that eventually invokes the callback.
    fn stop(&mut self, on_done: ArtifactCallback);

    /// Discard everything captured so far without stopping
    fn clear_recorded_data(&mut self);
}

/// Builds one delegate recorder per session
pub trait RecorderFactory: Send + Sync {
    /// Create a recorder that will consume `stream`
    fn create(&self, stream: MixedStream, config: RecorderConfig) -> Box<dyn StreamRecorder>;
}

impl<F> RecorderFactory for F
where
    F: Fn(MixedStream, RecorderConfig) -> Box<dyn StreamRecorder> + Send + Sync,
{
    fn create(&self, stream: MixedStream, config: RecorderConfig) -> Box<dyn StreamRecorder> {
        self(stream, config)
    }
}
