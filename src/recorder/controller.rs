//! Composite recorder controller
//!
//! Owns the registry, the compositor and the delegate seam, and drives the
//! session lifecycle: record spawns the render loop and hands the mixed
//! stream to a freshly built delegate; stop halts the loop and asks the
//! delegate for the artifact; sources can join at any point in between.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use tokio::sync::{Mutex, RwLock};

use crate::audio::mixer::build_mixed_track;
use crate::config::MixerConfig;
use crate::media::stream::MixedStream;
use crate::recorder::delegate::{RecorderConfig, RecorderFactory};
use crate::recorder::state::{RecorderPhase, RecordingSession};
use crate::recorder::stats::RecordingStats;
use crate::registry::store::SourceRegistry;
use crate::source::input::{InputSource, SourceId};
use crate::video::compositor::VideoCompositor;

/// Records N live sources as one composite stream
///
/// The registry and compositor are shared with the render loop task; the
/// controller keeps the only handles to the delegate and the session.
pub struct CompositeRecorder {
    config: MixerConfig,
    registry: Arc<RwLock<SourceRegistry>>,
    compositor: Arc<Mutex<VideoCompositor>>,
    factory: Box<dyn RecorderFactory>,
    session: Option<RecordingSession>,
    phase: RecorderPhase,
    last_elapsed: Option<Duration>,
}

impl CompositeRecorder {
    /// Create a recorder over an initial set of sources
    ///
    /// Nothing runs until [`record`](Self::record) is called.
    pub fn new(
        sources: impl IntoIterator<Item = InputSource>,
        config: MixerConfig,
        factory: impl RecorderFactory + 'static,
    ) -> Self {
        let mut registry = SourceRegistry::new(&config);
        registry.add_sources(sources);
        let compositor = VideoCompositor::new(&config);

        Self {
            registry: Arc::new(RwLock::new(registry)),
            compositor: Arc::new(Mutex::new(compositor)),
            factory: Box::new(factory),
            session: None,
            phase: RecorderPhase::Idle,
            last_elapsed: None,
            config,
        }
    }

    /// Start recording the current roster
    ///
    /// Calling this while a session is live silently rebuilds: the old
    /// render loop is halted and the old delegate is dropped without its
    /// stop callback ever firing.
    pub async fn record(&mut self) {
        if let Some(previous) = self.session.take() {
            previous.halt_render();
            let _ = previous.render_task.await;
            tracing::debug!("Previous session abandoned; rebuilding");
        }

        // Assemble the audio graph from the roster as it stands right now
        let mixed_audio = {
            let registry = self.registry.read().await;
            build_mixed_track(registry.sources())
        };
        let (bus, audio_track) = match mixed_audio {
            Some((bus, track)) => (Some(bus), Some(track)),
            None => (None, None),
        };

        // Prime the surface so the capture track opens at session size
        let video_track = {
            let registry = self.registry.read().await;
            let mut compositor = self.compositor.lock().await;
            compositor.render_tick(&registry);
            compositor.begin_capture()
        };

        let stream = MixedStream::new(video_track, audio_track);

        if let Some(preview) = &self.config.preview {
            preview(&stream);
        }

        let mut delegate = self.factory.create(
            stream.clone(),
            RecorderConfig {
                format: self.config.format.clone(),
                frame_interval: self.config.frame_interval,
            },
        );
        delegate.record();

        let stop_flag = Arc::new(AtomicBool::new(false));
        let render_task = spawn_render_loop(
            Arc::clone(&self.registry),
            Arc::clone(&self.compositor),
            Arc::clone(&stop_flag),
            self.config.frame_interval,
        );

        let has_audio = bus.is_some();
        self.session = Some(RecordingSession {
            delegate,
            bus,
            stream,
            stop_flag,
            render_task,
            started_at: Instant::now(),
        });
        self.phase = RecorderPhase::Recording;

        if !self.config.disable_logs {
            tracing::info!(
                format = %self.config.format,
                interval_ms = self.config.frame_interval.as_millis() as u64,
                audio = has_audio,
                "Recording started"
            );
        }
    }

    /// Suspend the delegate recorder; the render loop keeps ticking
    pub fn pause(&mut self) {
        if self.phase != RecorderPhase::Recording {
            tracing::debug!(phase = ?self.phase, "Pause ignored");
            return;
        }
        if let Some(session) = &mut self.session {
            session.delegate.pause();
        }
        self.phase = RecorderPhase::Paused;
        if !self.config.disable_logs {
            tracing::info!("Recording paused");
        }
    }

    /// Resume a paused delegate recorder
    pub fn resume(&mut self) {
        if self.phase != RecorderPhase::Paused {
            tracing::debug!(phase = ?self.phase, "Resume ignored");
            return;
        }
        if let Some(session) = &mut self.session {
            session.delegate.resume();
        }
        self.phase = RecorderPhase::Recording;
        if !self.config.disable_logs {
            tracing::info!("Recording resumed");
        }
    }

    /// Stop the session and deliver the artifact through `on_done`
    ///
    /// The render loop is halted before the delegate finalizes, so the
    /// artifact never gains frames past this call. Without a live session
    /// this is a no-op and the callback is never invoked.
    pub async fn stop(&mut self, on_done: impl FnOnce(Bytes) + Send + 'static) {
        let Some(session) = self.session.take() else {
            tracing::debug!("Stop without active session; callback dropped");
            return;
        };

        session.halt_render();
        self.last_elapsed = Some(session.elapsed());
        let RecordingSession {
            mut delegate,
            render_task,
            ..
        } = session;
        let _ = render_task.await;

        delegate.stop(Box::new(on_done));
        self.phase = RecorderPhase::Stopped;

        if !self.config.disable_logs {
            tracing::info!(
                elapsed_ms = self.last_elapsed.unwrap_or(Duration::ZERO).as_millis() as u64,
                "Recording stopped"
            );
        }
    }

    /// Register a new source, returning its id
    ///
    /// The video component joins the composite on the next tick. Audio
    /// joins the live mix immediately when a session with a bus exists;
    /// otherwise it waits for the next [`record`](Self::record).
    pub async fn add_stream(&mut self, source: InputSource) -> SourceId {
        let id = self.registry.write().await.add_source(source);

        if let Some(session) = &self.session {
            let registry = self.registry.read().await;
            if let Some(added) = registry.source(id) {
                if added.has_audio() {
                    match &session.bus {
                        Some(bus) => {
                            for track in added.audio_tracks() {
                                bus.add_tap(id, track.clone());
                            }
                        }
                        None => {
                            tracing::debug!(
                                source_id = id,
                                "Session has no audio mix; audio components wait for re-record"
                            );
                        }
                    }
                }
            }
        }

        id
    }

    /// Register several sources, returning their ids in order
    pub async fn add_streams(
        &mut self,
        sources: impl IntoIterator<Item = InputSource>,
    ) -> Vec<SourceId> {
        let mut ids = Vec::new();
        for source in sources {
            ids.push(self.add_stream(source).await);
        }
        ids
    }

    /// Discard everything recorded so far without stopping
    ///
    /// Propagates to the delegate first, then empties the roster and
    /// wipes the surface. The session stays live and the render loop
    /// keeps ticking over the now-empty registry.
    pub async fn clear_recorded_data(&mut self) {
        if let Some(session) = &mut self.session {
            session.delegate.clear_recorded_data();
        }
        self.registry.write().await.reset();
        self.compositor.lock().await.clear_surface();

        if !self.config.disable_logs {
            tracing::info!("Recorded data cleared");
        }
    }

    /// The live session's mixed stream, if one exists
    pub fn mixed_stream(&self) -> Option<MixedStream> {
        self.session.as_ref().map(|session| session.stream.clone())
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> RecorderPhase {
        self.phase
    }

    /// Elapsed time of the live session, or of the last stopped one
    pub fn duration(&self) -> Option<Duration> {
        if self.phase.is_live() {
            self.session.as_ref().map(|session| session.elapsed())
        } else {
            self.last_elapsed
        }
    }

    /// The configuration this recorder was built with
    pub fn config(&self) -> &MixerConfig {
        &self.config
    }

    /// Snapshot the recorder's counters and roster sizes
    pub async fn stats(&self) -> RecordingStats {
        let registry = self.registry.read().await;
        let compositor = self.compositor.lock().await;

        RecordingStats {
            phase: self.phase,
            source_count: registry.source_count(),
            video_sink_count: registry.sink_count(),
            audio_tap_count: self
                .session
                .as_ref()
                .and_then(|session| session.bus.as_ref())
                .map(|bus| bus.tap_count())
                .unwrap_or(0),
            ticks_rendered: compositor.ticks(),
            frames_painted: compositor.frames_painted(),
            elapsed: self.duration().unwrap_or(Duration::ZERO),
        }
    }
}

impl Drop for CompositeRecorder {
    /// An unfinished session is abandoned: the render loop is told to
    /// halt and the delegate is dropped without its stop callback.
    fn drop(&mut self) {
        if let Some(session) = &self.session {
            session.halt_render();
        }
    }
}

impl std::fmt::Debug for CompositeRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeRecorder")
            .field("phase", &self.phase)
            .field("live", &self.session.is_some())
            .finish()
    }
}

/// Spawn the periodic render loop for one session
///
/// The stop flag is checked at the top of every iteration, so the loop
/// exits within one interval of it being raised. Scheduling is
/// sleep-after-tick: a slow tick stretches the period rather than
/// bunching frames.
fn spawn_render_loop(
    registry: Arc<RwLock<SourceRegistry>>,
    compositor: Arc<Mutex<VideoCompositor>>,
    stop_flag: Arc<AtomicBool>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if stop_flag.load(Ordering::SeqCst) {
                break;
            }
            {
                let registry = registry.read().await;
                let mut compositor = compositor.lock().await;
                compositor.render_tick(&registry);
            }
            tokio::time::sleep(interval).await;
        }
        tracing::debug!("Render loop halted");
    })
}
