//! Multi-source audio/video mixing and compositing recorder
//!
//! `streammix` merges any number of live sources into one recordable
//! stream. Video components are painted into a grid composite at a fixed
//! tick rate, audio components are summed into a single track, and the
//! combined stream is handed to a caller-supplied single-stream recorder
//! that produces the final artifact.
//!
//! # Pipeline
//!
//! ```text
//!  InputSource ─┬─ video ─► SourceRegistry ──► VideoCompositor ──┐
//!               │           (sinks + cells)     (render loop,    │
//!               │                                one tick per    │
//!               │                                frame_interval) │
//!               │                                                ▼
//!               └─ audio ─► MixBus ─────────────────────► MixedStream
//!                           (summing taps on demand)             │
//!                                                                ▼
//!                                                     StreamRecorder
//!                                                     (record ... stop ─► Bytes)
//! ```
//!
//! Sources may join mid-session: their video gets a grid cell on the next
//! tick and their audio is tapped into the live mix. Missing components
//! degrade silently; a roster with no audio at all simply records a
//! video-only stream.
//!
//! # Example
//!
//! ```no_run
//! use streammix::{
//!     ArtifactCallback, CompositeRecorder, InputSource, MixedStream, MixerConfig,
//!     RecorderConfig, StreamRecorder, VideoFrame, VideoTrack,
//! };
//!
//! struct NullRecorder;
//!
//! impl StreamRecorder for NullRecorder {
//!     fn record(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn resume(&mut self) {}
//!     fn stop(&mut self, on_done: ArtifactCallback) {
//!         on_done(bytes::Bytes::new());
//!     }
//!     fn clear_recorded_data(&mut self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (camera, track) = VideoTrack::channel_sized(1280, 720);
//!     let source = InputSource::new().with_video(track);
//!
//!     let factory = |_stream: MixedStream, _config: RecorderConfig| {
//!         Box::new(NullRecorder) as Box<dyn StreamRecorder>
//!     };
//!
//!     let mut recorder = CompositeRecorder::new([source], MixerConfig::default(), factory);
//!     recorder.record().await;
//!
//!     let _ = camera.publish(VideoFrame::solid(1280, 720, [0, 0, 0, 255]));
//!
//!     recorder.stop(|artifact| println!("{} bytes", artifact.len())).await;
//! }
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod media;
pub mod recorder;
pub mod registry;
pub mod source;
pub mod video;

pub use audio::MixBus;
pub use config::{MixerConfig, PreviewSink};
pub use error::{MixerError, Result};
pub use media::{
    AudioTrack, AudioTrackWriter, FrameRect, MixedStream, VideoFrame, VideoTrack, VideoTrackWriter,
};
pub use recorder::{
    ArtifactCallback, CompositeRecorder, RecorderConfig, RecorderFactory, RecorderPhase,
    RecordingStats, StreamRecorder,
};
pub use registry::{SourceRegistry, VideoSink};
pub use source::{InputSource, LayoutHints, RenderHook, SourceId};
pub use video::{CompositeSurface, VideoCompositor};
