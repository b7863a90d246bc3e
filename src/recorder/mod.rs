//! Recording session lifecycle
//!
//! Everything between "start recording" and "hand me the artifact":
//! - [`CompositeRecorder`] drives the session and owns the render loop
//! - [`StreamRecorder`] / [`RecorderFactory`] form the delegate seam
//! - [`RecorderPhase`] and [`RecordingStats`] expose observable state

pub mod controller;
pub mod delegate;
pub mod state;
pub mod stats;

pub use controller::CompositeRecorder;
pub use delegate::{ArtifactCallback, RecorderConfig, RecorderFactory, StreamRecorder};
pub use state::RecorderPhase;
pub use stats::RecordingStats;
