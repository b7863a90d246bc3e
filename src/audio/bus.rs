//! Zero-gain summing bus
//!
//! All audio taps feed one summing junction. The bus has two outputs: the
//! capture track that carries the mixed samples to the delegate recorder,
//! and a monitor track whose gain is fixed at zero so the mixing process
//! never plays the mix back locally.
//!
//! Mixing is pull-driven: nothing runs until a consumer drains the capture
//! track, at which point every tap is drained and summed sample by sample.
//! There is no dedicated audio task.

use std::sync::{Arc, Mutex};

use crate::media::track::AudioTrack;
use crate::source::input::SourceId;

/// The summing bus for all registered audio taps
///
/// Clones share the same tap list, so a tap added through any handle is
/// heard by the capture output immediately.
#[derive(Debug, Clone)]
pub struct MixBus {
    core: Arc<BusCore>,
}

/// Shared state behind a bus and its output tracks
pub(crate) struct BusCore {
    taps: Mutex<Vec<AudioTrack>>,
}

impl MixBus {
    /// Create a bus with no taps
    pub fn new() -> Self {
        Self {
            core: Arc::new(BusCore {
                taps: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Wire a source's audio track into the summing junction
    pub fn add_tap(&self, source_id: SourceId, track: AudioTrack) {
        let count = {
            let Ok(mut taps) = self.core.taps.lock() else {
                return;
            };
            taps.push(track);
            taps.len()
        };
        tracing::debug!(source_id = source_id, taps = count, "Audio tap added");
    }

    /// Number of taps currently feeding the bus
    pub fn tap_count(&self) -> usize {
        self.core
            .taps
            .lock()
            .map(|taps| taps.len())
            .unwrap_or(0)
    }

    /// The capture output: pulling it drains and sums every tap
    pub fn output(&self) -> AudioTrack {
        AudioTrack::from_bus(self.core.clone())
    }

    /// The monitor output
    ///
    /// Gain is fixed at zero, so this yields silence without draining the
    /// shared sample queues. The capture output stays the only consumer
    /// that advances them.
    pub fn monitor(&self) -> AudioTrack {
        AudioTrack::silence()
    }
}

impl Default for MixBus {
    fn default() -> Self {
        Self::new()
    }
}

impl BusCore {
    /// Sum every tap into `out`
    ///
    /// `out` must arrive zeroed (the track pull path guarantees it).
    /// Returns the longest run of real samples any tap produced; shorter
    /// taps simply stop contributing past their end.
    pub(crate) fn mix_into(&self, out: &mut [f32]) -> usize {
        let Ok(taps) = self.taps.lock() else {
            return 0;
        };
        let mut scratch = vec![0.0f32; out.len()];
        let mut produced = 0;
        for tap in taps.iter() {
            let n = tap.pull(&mut scratch);
            for (slot, sample) in out.iter_mut().zip(scratch.iter()).take(n) {
                *slot += sample;
            }
            produced = produced.max(n);
        }
        produced
    }
}

impl std::fmt::Debug for BusCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.taps.lock().map(|taps| taps.len()).unwrap_or(0);
        f.debug_struct("BusCore").field("taps", &count).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bus_produces_nothing() {
        let bus = MixBus::new();
        let output = bus.output();

        let mut out = [9.0f32; 4];
        assert_eq!(output.pull(&mut out), 0);
        assert_eq!(out, [0.0; 4]);
        assert_eq!(bus.tap_count(), 0);
    }

    #[test]
    fn test_single_tap_passes_through() {
        let bus = MixBus::new();
        let (writer, track) = AudioTrack::channel();
        bus.add_tap(1, track);
        writer.push(&[0.5, -0.25, 1.0]);

        let mut out = [0.0f32; 3];
        assert_eq!(bus.output().pull(&mut out), 3);
        assert_eq!(out, [0.5, -0.25, 1.0]);
    }

    #[test]
    fn test_two_taps_sum() {
        let bus = MixBus::new();
        let (writer_a, track_a) = AudioTrack::channel();
        let (writer_b, track_b) = AudioTrack::channel();
        bus.add_tap(1, track_a);
        bus.add_tap(2, track_b);

        writer_a.push(&[0.5, 0.5]);
        writer_b.push(&[0.25, 0.25]);

        let mut out = [0.0f32; 2];
        assert_eq!(bus.output().pull(&mut out), 2);
        assert!((out[0] - 0.75).abs() < 0.001);
        assert!((out[1] - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_short_tap_stops_contributing() {
        let bus = MixBus::new();
        let (writer_a, track_a) = AudioTrack::channel();
        let (writer_b, track_b) = AudioTrack::channel();
        bus.add_tap(1, track_a);
        bus.add_tap(2, track_b);

        writer_a.push(&[1.0, 1.0, 1.0, 1.0]);
        writer_b.push(&[0.5, 0.5]);

        let mut out = [0.0f32; 4];
        assert_eq!(bus.output().pull(&mut out), 4);
        assert_eq!(out, [1.5, 1.5, 1.0, 1.0]);
    }

    #[test]
    fn test_lagging_tap_does_not_stall_the_mix() {
        let bus = MixBus::new();
        let (writer_a, track_a) = AudioTrack::channel();
        let (_writer_b, track_b) = AudioTrack::channel();
        bus.add_tap(1, track_a);
        bus.add_tap(2, track_b);

        writer_a.push(&[0.3, 0.3]);

        let mut out = [0.0f32; 2];
        assert_eq!(bus.output().pull(&mut out), 2);
        assert!((out[0] - 0.3).abs() < 0.001);
        assert!((out[1] - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_tap_added_mid_session_is_heard() {
        let bus = MixBus::new();
        let output = bus.output();
        let (writer_a, track_a) = AudioTrack::channel();
        bus.add_tap(1, track_a);
        writer_a.push(&[0.5]);

        let mut out = [0.0f32; 1];
        assert_eq!(output.pull(&mut out), 1);
        assert_eq!(out, [0.5]);

        // New participant joins after the output track was created
        let (writer_b, track_b) = AudioTrack::channel();
        bus.add_tap(2, track_b);
        writer_a.push(&[0.5]);
        writer_b.push(&[0.25]);

        assert_eq!(output.pull(&mut out), 1);
        assert!((out[0] - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_monitor_is_silent_and_does_not_drain() {
        let bus = MixBus::new();
        let (writer, track) = AudioTrack::channel();
        bus.add_tap(1, track);
        writer.push(&[0.8, 0.8]);

        let monitor = bus.monitor();
        let mut out = [5.0f32; 2];
        assert_eq!(monitor.pull(&mut out), 2);
        assert_eq!(out, [0.0, 0.0]);

        // The samples are still there for the capture output
        assert_eq!(writer.queued(), 2);
        assert_eq!(bus.output().pull(&mut out), 2);
        assert_eq!(out, [0.8, 0.8]);
    }

    #[test]
    fn test_clones_share_taps() {
        let bus = MixBus::new();
        let clone = bus.clone();
        let (_writer, track) = AudioTrack::channel();
        clone.add_tap(7, track);

        assert_eq!(bus.tap_count(), 1);
    }
}
