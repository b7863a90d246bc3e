//! Source registry for the composite pipeline
//!
//! The registry is the roster the render loop walks every tick: sources in
//! registration order, each video-bearing source bound to a sink with
//! resolved cell dimensions.
//!
//! # Architecture
//!
//! ```text
//!                  Arc<RwLock<SourceRegistry>>
//!                 ┌──────────────────────────┐
//!                 │ sources: Vec<(id, src)>  │
//!                 │ sinks:   Vec<VideoSink { │
//!                 │   track, width, height,  │
//!                 │   hints,                 │
//!                 │ }>                       │
//!                 └────────────┬─────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          │                   │                   │
//!          ▼                   ▼                   ▼
//!    [add_stream()]      [render loop]       [audio mixer]
//!    write().add_source  read().sinks()      sources() at
//!          │             paint each tick     session start
//!          └──► sink dims resolved once, at registration
//! ```
//!
//! Sinks hold cloned `VideoTrack` readers, so a tick samples frames without
//! copying pixel data (`bytes::Bytes` payloads are reference-counted).

pub mod sink;
pub mod store;

pub use sink::VideoSink;
pub use store::SourceRegistry;
