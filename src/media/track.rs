//! Live media tracks
//!
//! Tracks are the edges of the mixing graph. A video track carries
//! latest-frame semantics: the compositor samples whatever frame is current
//! at each render tick, and stale frames are overwritten, never queued. An
//! audio track is pull-based: consumers drain samples on demand, which is
//! how the summing bus reads its taps without a dedicated audio task.
//!
//! Both come in writer/reader pairs. Writers stay with the producer (a
//! capture device, a decoder, a test); readers are cheap to clone and are
//! what sources, the registry and the bus hold.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::audio::bus::BusCore;
use crate::error::{MixerError, Result};
use crate::media::frame::VideoFrame;

/// Samples retained per audio track before the oldest are discarded
///
/// Two seconds of mono 48 kHz audio. Live mixing favors fresh samples, so
/// overflow drops from the front of the queue.
pub const AUDIO_QUEUE_CAPACITY: usize = 96_000;

/// Receiving side of a video track
///
/// Holds the latest published frame. Cloning yields another reader over the
/// same underlying channel.
#[derive(Clone)]
pub struct VideoTrack {
    rx: watch::Receiver<Option<VideoFrame>>,
    native_size: Option<(u32, u32)>,
}

/// Publishing side of a video track
pub struct VideoTrackWriter {
    tx: watch::Sender<Option<VideoFrame>>,
}

impl VideoTrack {
    /// Create a writer/reader pair with no declared native dimensions
    pub fn channel() -> (VideoTrackWriter, VideoTrack) {
        Self::build(None)
    }

    /// Create a writer/reader pair that declares the producer's native dimensions
    pub fn channel_sized(width: u32, height: u32) -> (VideoTrackWriter, VideoTrack) {
        Self::build(Some((width, height)))
    }

    fn build(native_size: Option<(u32, u32)>) -> (VideoTrackWriter, VideoTrack) {
        let (tx, rx) = watch::channel(None);
        (VideoTrackWriter { tx }, VideoTrack { rx, native_size })
    }

    /// The most recently published frame, if any has arrived yet
    pub fn latest(&self) -> Option<VideoFrame> {
        self.rx.borrow().clone()
    }

    /// Dimensions the producer declared at creation, if any
    pub fn native_size(&self) -> Option<(u32, u32)> {
        self.native_size
    }
}

impl std::fmt::Debug for VideoTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoTrack")
            .field("native_size", &self.native_size)
            .finish()
    }
}

impl VideoTrackWriter {
    /// Publish a frame, replacing whatever readers currently see
    ///
    /// Fails only when every reader has been dropped.
    pub fn publish(&self, frame: VideoFrame) -> Result<()> {
        self.tx
            .send(Some(frame))
            .map_err(|_| MixerError::TrackClosed)
    }

    /// Whether all readers have been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl std::fmt::Debug for VideoTrackWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoTrackWriter")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Receiving side of an audio track
///
/// Pulling drains samples from the producer's queue. Clones share the same
/// queue, so exactly one consumer should drain any given track.
#[derive(Clone)]
pub struct AudioTrack {
    node: TrackNode,
}

/// Publishing side of an audio track
pub struct AudioTrackWriter {
    queue: Arc<SampleQueue>,
}

#[derive(Clone)]
enum TrackNode {
    /// Samples pushed by a writer
    Source(Arc<SampleQueue>),
    /// Sum of a bus's taps, mixed on demand
    Bus(Arc<BusCore>),
    /// Fixed silence (the bus monitor path, gain zero)
    Silence,
}

impl AudioTrack {
    /// Create a writer/reader pair backed by a bounded sample queue
    pub fn channel() -> (AudioTrackWriter, AudioTrack) {
        let queue = Arc::new(SampleQueue::new(AUDIO_QUEUE_CAPACITY));
        (
            AudioTrackWriter {
                queue: queue.clone(),
            },
            AudioTrack {
                node: TrackNode::Source(queue),
            },
        )
    }

    /// Track that always yields a full buffer of silence
    pub(crate) fn silence() -> AudioTrack {
        AudioTrack {
            node: TrackNode::Silence,
        }
    }

    /// Track that mixes a bus's taps on demand
    pub(crate) fn from_bus(core: Arc<BusCore>) -> AudioTrack {
        AudioTrack {
            node: TrackNode::Bus(core),
        }
    }

    /// Fill `out` with the next samples, zero-padding past what is available
    ///
    /// Returns how many samples were actually produced (for silence, the
    /// whole buffer counts as produced).
    pub fn pull(&self, out: &mut [f32]) -> usize {
        out.fill(0.0);
        match &self.node {
            TrackNode::Source(queue) => queue.drain_into(out),
            TrackNode::Bus(core) => core.mix_into(out),
            TrackNode::Silence => out.len(),
        }
    }

    /// Samples currently queued (zero for bus and silence tracks)
    pub fn queued(&self) -> usize {
        match &self.node {
            TrackNode::Source(queue) => queue.len(),
            TrackNode::Bus(_) | TrackNode::Silence => 0,
        }
    }
}

impl std::fmt::Debug for AudioTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.node {
            TrackNode::Source(_) => "source",
            TrackNode::Bus(_) => "bus",
            TrackNode::Silence => "silence",
        };
        f.debug_struct("AudioTrack").field("kind", &kind).finish()
    }
}

impl AudioTrackWriter {
    /// Append samples for consumers to pull
    ///
    /// Best effort: when the queue is full the oldest samples are dropped
    /// to make room.
    pub fn push(&self, samples: &[f32]) {
        self.queue.push_slice(samples);
    }

    /// Samples currently queued and not yet pulled
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl std::fmt::Debug for AudioTrackWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioTrackWriter")
            .field("queued", &self.queued())
            .finish()
    }
}

/// Bounded FIFO of f32 samples shared between one writer and its readers
pub(crate) struct SampleQueue {
    inner: Mutex<VecDeque<f32>>,
    capacity: usize,
}

impl SampleQueue {
    fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    fn push_slice(&self, samples: &[f32]) {
        let Ok(mut queue) = self.inner.lock() else {
            return;
        };
        for &sample in samples {
            if queue.len() == self.capacity {
                queue.pop_front();
            }
            queue.push_back(sample);
        }
    }

    fn drain_into(&self, out: &mut [f32]) -> usize {
        let Ok(mut queue) = self.inner.lock() else {
            return 0;
        };
        let n = out.len().min(queue.len());
        for slot in out.iter_mut().take(n) {
            // pop_front cannot fail here, n is bounded by queue.len()
            if let Some(sample) = queue.pop_front() {
                *slot = sample;
            }
        }
        n
    }

    fn len(&self) -> usize {
        self.inner.lock().map(|queue| queue.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_video_track_starts_empty() {
        let (_writer, track) = VideoTrack::channel();

        assert!(track.latest().is_none());
    }

    #[test]
    fn test_video_track_latest_wins() {
        let (writer, track) = VideoTrack::channel();

        assert_ok!(writer.publish(VideoFrame::solid(2, 2, [1, 1, 1, 255])));
        assert_ok!(writer.publish(VideoFrame::solid(2, 2, [9, 9, 9, 255])));

        let frame = track.latest().unwrap();
        assert_eq!(frame.pixel(0, 0), Some([9, 9, 9, 255]));
    }

    #[test]
    fn test_video_track_clone_sees_latest() {
        let (writer, track) = VideoTrack::channel();
        writer
            .publish(VideoFrame::solid(1, 1, [5, 6, 7, 255]))
            .unwrap();

        let clone = track.clone();
        assert_eq!(clone.latest().unwrap().pixel(0, 0), Some([5, 6, 7, 255]));
    }

    #[test]
    fn test_video_publish_fails_without_readers() {
        let (writer, track) = VideoTrack::channel();
        drop(track);

        assert!(writer.is_closed());
        let err = assert_err!(writer.publish(VideoFrame::new(0, 0, Bytes::new()).unwrap()));
        assert_eq!(err, MixerError::TrackClosed);
    }

    #[test]
    fn test_video_track_native_size() {
        let (_writer, sized) = VideoTrack::channel_sized(1920, 1080);
        let (_writer, unsized_) = VideoTrack::channel();

        assert_eq!(sized.native_size(), Some((1920, 1080)));
        assert_eq!(unsized_.native_size(), None);
    }

    #[test]
    fn test_audio_push_then_pull_in_order() {
        let (writer, track) = AudioTrack::channel();
        writer.push(&[0.1, 0.2, 0.3]);

        let mut out = [0.0f32; 3];
        assert_eq!(track.pull(&mut out), 3);
        assert_eq!(out, [0.1, 0.2, 0.3]);
        assert_eq!(track.queued(), 0);
    }

    #[test]
    fn test_audio_partial_pull_leaves_remainder() {
        let (writer, track) = AudioTrack::channel();
        writer.push(&[1.0, 2.0, 3.0, 4.0]);

        let mut out = [0.0f32; 2];
        assert_eq!(track.pull(&mut out), 2);
        assert_eq!(out, [1.0, 2.0]);
        assert_eq!(track.queued(), 2);

        assert_eq!(track.pull(&mut out), 2);
        assert_eq!(out, [3.0, 4.0]);
    }

    #[test]
    fn test_audio_underrun_zero_pads() {
        let (writer, track) = AudioTrack::channel();
        writer.push(&[0.5]);

        let mut out = [9.0f32; 4];
        assert_eq!(track.pull(&mut out), 1);
        assert_eq!(out, [0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_audio_empty_pull() {
        let (_writer, track) = AudioTrack::channel();

        let mut out = [9.0f32; 2];
        assert_eq!(track.pull(&mut out), 0);
        assert_eq!(out, [0.0, 0.0]);
    }

    #[test]
    fn test_audio_overflow_drops_oldest() {
        let (writer, track) = AudioTrack::channel();
        let big = vec![1.0f32; AUDIO_QUEUE_CAPACITY];
        writer.push(&big);
        writer.push(&[7.0]);

        assert_eq!(writer.queued(), AUDIO_QUEUE_CAPACITY);

        // Drain everything; the final sample must have survived
        let mut out = vec![0.0f32; AUDIO_QUEUE_CAPACITY];
        assert_eq!(track.pull(&mut out), AUDIO_QUEUE_CAPACITY);
        assert_eq!(out[AUDIO_QUEUE_CAPACITY - 1], 7.0);
    }

    #[test]
    fn test_audio_clones_share_queue() {
        let (writer, track) = AudioTrack::channel();
        let clone = track.clone();
        writer.push(&[1.0, 2.0]);

        let mut out = [0.0f32; 1];
        assert_eq!(track.pull(&mut out), 1);
        assert_eq!(out, [1.0]);

        assert_eq!(clone.pull(&mut out), 1);
        assert_eq!(out, [2.0]);
    }

    #[test]
    fn test_silence_track_yields_full_zero_buffer() {
        let track = AudioTrack::silence();

        let mut out = [3.0f32; 8];
        assert_eq!(track.pull(&mut out), 8);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(track.queued(), 0);
    }
}
