//! Recorder lifecycle state
//!
//! Tracks the recorder's phase from idle through recording, pausing and
//! stopping, plus the session handle bundling everything one recording
//! owns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use crate::audio::bus::MixBus;
use crate::media::stream::MixedStream;
use crate::recorder::delegate::StreamRecorder;

/// Recorder lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderPhase {
    /// No session started yet
    Idle,
    /// Session live, delegate consuming
    Recording,
    /// Session live, delegate suspended
    Paused,
    /// Session finished, artifact delivered (or on its way)
    Stopped,
}

impl RecorderPhase {
    /// Whether a session currently exists
    pub fn is_live(&self) -> bool {
        matches!(self, RecorderPhase::Recording | RecorderPhase::Paused)
    }
}

impl Default for RecorderPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Everything one recording session owns
///
/// Dropped as a unit at stop or rebuild. The delegate is consumed here:
/// no handle to it ever leaves the session.
pub(crate) struct RecordingSession {
    /// The external recorder consuming the mixed stream
    pub delegate: Box<dyn StreamRecorder>,
    /// Summing bus, kept so late sources can be tapped in
    pub bus: Option<MixBus>,
    /// The composite output handed to the delegate and preview
    pub stream: MixedStream,
    /// Raised to halt the render loop at its next iteration
    pub stop_flag: Arc<AtomicBool>,
    /// The render loop task
    pub render_task: JoinHandle<()>,
    /// When the session started
    pub started_at: Instant,
}

impl RecordingSession {
    /// Ask the render loop to exit at the top of its next iteration
    pub fn halt_render(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Time since the session started
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
