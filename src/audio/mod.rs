//! Audio mixing
//!
//! This module provides:
//! - The zero-gain summing bus all audio taps feed
//! - One-shot assembly of the mixed track at session start

pub mod bus;
pub mod mixer;

pub use bus::MixBus;
pub use mixer::build_mixed_track;
