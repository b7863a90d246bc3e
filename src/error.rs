//! Crate error types
//!
//! Error types for mixing and compositing operations. Most runtime
//! degradation (a source without usable tracks, a capture output nobody
//! reads) is logged and skipped rather than surfaced here; these variants
//! cover the cases a caller can actually act on.

use thiserror::Error;

/// Error type for mixing and compositing operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MixerError {
    /// Frame payload does not match its declared dimensions
    #[error("invalid frame: expected {expected} bytes for declared dimensions, got {actual}")]
    InvalidFrame {
        /// Byte length implied by width * height * 4 (RGBA8)
        expected: usize,
        /// Byte length actually supplied
        actual: usize,
    },

    /// Published into a track whose consumers have all been dropped
    #[error("track closed: no live consumers")]
    TrackClosed,
}

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MixerError>;
