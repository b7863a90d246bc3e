//! Statistics for composite recording sessions

use std::time::Duration;

use crate::recorder::state::RecorderPhase;

/// Snapshot of the recorder's state and counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingStats {
    /// Current lifecycle phase
    pub phase: RecorderPhase,
    /// Registered sources
    pub source_count: usize,
    /// Video sinks bound to the compositor
    pub video_sink_count: usize,
    /// Audio taps feeding the session bus (0 without a session or audio)
    pub audio_tap_count: usize,
    /// Render ticks completed in the current (or last) session
    pub ticks_rendered: u64,
    /// Sink frames painted in the current (or last) session
    pub frames_painted: u64,
    /// Time the current or last session has been recording
    pub elapsed: Duration,
}

impl Default for RecordingStats {
    fn default() -> Self {
        Self {
            phase: RecorderPhase::Idle,
            source_count: 0,
            video_sink_count: 0,
            audio_tap_count: 0,
            ticks_rendered: 0,
            frames_painted: 0,
            elapsed: Duration::ZERO,
        }
    }
}

impl RecordingStats {
    /// Create a zeroed snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Average render rate in ticks per second
    pub fn tick_rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.ticks_rendered as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = RecordingStats::new();

        assert_eq!(stats.phase, RecorderPhase::Idle);
        assert_eq!(stats.source_count, 0);
        assert_eq!(stats.ticks_rendered, 0);
        assert_eq!(stats.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_tick_rate() {
        let stats = RecordingStats {
            ticks_rendered: 500,
            elapsed: Duration::from_secs(5),
            ..Default::default()
        };

        assert!((stats.tick_rate() - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_tick_rate_zero_elapsed() {
        let stats = RecordingStats::new();

        assert_eq!(stats.tick_rate(), 0.0);
    }
}
