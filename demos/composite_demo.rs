//! Composite recording demo with synthetic sources
//!
//! Run with: cargo run --example composite_demo
//!
//! With debug logging:
//!   RUST_LOG=streammix=debug cargo run --example composite_demo
//!
//! Two synthetic sources (a color-cycling "camera" with a tone, and a
//! second silent camera) are mixed into one composite stream and recorded
//! by an in-memory delegate. A third source joins mid-session. The
//! "artifact" is a stream of 12-byte records, one per captured frame:
//! composite width, composite height, and the audio peak for that span.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use bytes::{BufMut, Bytes};
use tokio::task::JoinHandle;

use streammix::{
    ArtifactCallback, AudioTrack, AudioTrackWriter, CompositeRecorder, InputSource, LayoutHints,
    MixedStream, MixerConfig, RecorderConfig, StreamRecorder, VideoFrame, VideoTrack,
    VideoTrackWriter,
};

/// Delegate recorder that captures into memory
///
/// One pump task samples the mixed stream at the configured interval and
/// appends a fixed-size record per captured frame. Finalization happens on
/// a spawned task so the artifact callback fires after the pump drains.
struct MemoryRecorder {
    stream: MixedStream,
    interval: Duration,
    chunks: Arc<StdMutex<Vec<u8>>>,
    running: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
    pump: Option<JoinHandle<()>>,
}

impl MemoryRecorder {
    fn new(stream: MixedStream, config: RecorderConfig) -> Self {
        println!(
            "recorder created: format={} interval={:?} audio={}",
            config.format,
            config.frame_interval,
            stream.has_audio()
        );
        Self {
            stream,
            interval: config.frame_interval,
            chunks: Arc::new(StdMutex::new(Vec::new())),
            running: Arc::new(AtomicBool::new(false)),
            paused: Arc::new(AtomicBool::new(false)),
            pump: None,
        }
    }
}

impl StreamRecorder for MemoryRecorder {
    fn record(&mut self) {
        self.running.store(true, Ordering::SeqCst);

        let stream = self.stream.clone();
        let chunks = Arc::clone(&self.chunks);
        let running = Arc::clone(&self.running);
        let paused = Arc::clone(&self.paused);
        let interval = self.interval;

        self.pump = Some(tokio::spawn(async move {
            let mut audio = vec![0.0f32; 480];
            while running.load(Ordering::SeqCst) {
                let produced = stream.pull_audio(&mut audio);
                if !paused.load(Ordering::SeqCst) {
                    if let Some(frame) = stream.latest_frame() {
                        let peak = audio[..produced]
                            .iter()
                            .fold(0.0f32, |max, s| max.max(s.abs()));
                        if let Ok(mut chunks) = chunks.lock() {
                            chunks.put_u32(frame.width);
                            chunks.put_u32(frame.height);
                            chunks.put_f32(peak);
                        }
                    }
                }
                tokio::time::sleep(interval).await;
            }
        }));
    }

    fn pause(&mut self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    fn resume(&mut self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    fn stop(&mut self, on_done: ArtifactCallback) {
        self.running.store(false, Ordering::SeqCst);
        let pump = self.pump.take();
        let chunks = Arc::clone(&self.chunks);
        tokio::spawn(async move {
            if let Some(pump) = pump {
                let _ = pump.await;
            }
            let data = chunks.lock().map(|chunks| chunks.clone()).unwrap_or_default();
            on_done(Bytes::from(data));
        });
    }

    fn clear_recorded_data(&mut self) {
        if let Ok(mut chunks) = self.chunks.lock() {
            chunks.clear();
        }
    }
}

/// Publish a color-cycling solid frame every ~33 ms
fn spawn_camera(writer: VideoTrackWriter, width: u32, height: u32, tint: [u8; 3]) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut step = 0u32;
        loop {
            let phase = (step * 8 % 256) as u8;
            let frame = VideoFrame::solid(
                width,
                height,
                [tint[0].wrapping_add(phase), tint[1], tint[2], 255],
            );
            if writer.publish(frame).is_err() {
                break;
            }
            step += 1;
            tokio::time::sleep(Duration::from_millis(33)).await;
        }
    })
}

/// Push 10 ms blocks of a sine tone at 48 kHz
fn spawn_tone(writer: AudioTrackWriter, freq: f32) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut t = 0u64;
        let mut block = vec![0.0f32; 480];
        loop {
            for slot in block.iter_mut() {
                *slot = (2.0 * std::f32::consts::PI * freq * (t as f32 / 48_000.0)).sin() * 0.2;
                t += 1;
            }
            writer.push(&block);
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("streammix=info".parse()?),
        )
        .init();

    // Source 1: camera with a tone
    let (cam_writer, cam_track) = VideoTrack::channel_sized(320, 240);
    let (tone_writer, tone_track) = AudioTrack::channel();
    let _cam = spawn_camera(cam_writer, 320, 240, [0, 64, 200]);
    let _tone = spawn_tone(tone_writer, 440.0);
    let talker = InputSource::new().with_video(cam_track).with_audio(tone_track);

    // Source 2: silent camera
    let (screen_writer, screen_track) = VideoTrack::channel_sized(320, 240);
    let _screen = spawn_camera(screen_writer, 320, 240, [200, 32, 0]);
    let screen = InputSource::new().with_video(screen_track);

    let config = MixerConfig::new()
        .frame_interval(Duration::from_millis(33))
        .preview(|stream: &MixedStream| {
            println!("preview stream ready (audio: {})", stream.has_audio());
        });

    let factory = |stream: MixedStream, config: RecorderConfig| -> Box<dyn StreamRecorder> {
        Box::new(MemoryRecorder::new(stream, config))
    };

    let mut recorder = CompositeRecorder::new([talker, screen], config, factory);

    println!("recording two sources side by side...");
    recorder.record().await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    // A third participant joins mid-session with a small fixed-size cell
    let (late_writer, late_track) = VideoTrack::channel_sized(320, 240);
    let _late = spawn_camera(late_writer, 320, 240, [0, 180, 0]);
    let id = recorder
        .add_stream(
            InputSource::new()
                .with_video(late_track)
                .with_hints(LayoutHints::new().size(160, 120)),
        )
        .await;
    println!("source {} joined mid-session", id);
    tokio::time::sleep(Duration::from_secs(1)).await;

    println!("pausing for a moment...");
    recorder.pause();
    tokio::time::sleep(Duration::from_millis(500)).await;
    recorder.resume();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let stats = recorder.stats().await;
    println!(
        "before stop: {} ticks, {} frames painted, {:.0} ticks/s",
        stats.ticks_rendered,
        stats.frames_painted,
        stats.tick_rate()
    );

    let (tx, rx) = tokio::sync::oneshot::channel();
    recorder
        .stop(move |artifact| {
            let _ = tx.send(artifact);
        })
        .await;

    let artifact = rx.await?;
    println!(
        "stopped after {:?}: artifact {} bytes ({} frame records)",
        recorder.duration().unwrap_or_default(),
        artifact.len(),
        artifact.len() / 12
    );

    Ok(())
}
