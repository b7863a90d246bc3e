//! Mixed output stream
//!
//! The handle a recording session exposes: one composite video track and,
//! when any source carried audio, one mixed audio track.

use crate::media::frame::VideoFrame;
use crate::media::track::{AudioTrack, VideoTrack};

/// The composite output of a recording session
///
/// Cheap to clone; the delegate recorder, the preview sink and the
/// controller all hold the same underlying tracks.
#[derive(Debug, Clone)]
pub struct MixedStream {
    /// Composite video, published once per render tick
    pub video: VideoTrack,
    /// Mixed audio, absent when no registered source carried audio
    pub audio: Option<AudioTrack>,
}

impl MixedStream {
    /// Create a mixed stream from its tracks
    pub fn new(video: VideoTrack, audio: Option<AudioTrack>) -> Self {
        Self { video, audio }
    }

    /// Whether the session produced a mixed audio track
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    /// The most recent composite frame, if any tick has published yet
    pub fn latest_frame(&self) -> Option<VideoFrame> {
        self.video.latest()
    }

    /// Pull mixed audio samples into `out`
    ///
    /// With no audio track the buffer is zeroed and 0 is returned.
    pub fn pull_audio(&self, out: &mut [f32]) -> usize {
        match &self.audio {
            Some(track) => track.pull(out),
            None => {
                out.fill(0.0);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_audio() {
        let (_writer, video) = VideoTrack::channel();
        let (_audio_writer, audio) = AudioTrack::channel();

        assert!(!MixedStream::new(video.clone(), None).has_audio());
        assert!(MixedStream::new(video, Some(audio)).has_audio());
    }

    #[test]
    fn test_latest_frame_passthrough() {
        let (writer, video) = VideoTrack::channel();
        let stream = MixedStream::new(video, None);

        assert!(stream.latest_frame().is_none());
        writer
            .publish(VideoFrame::solid(1, 1, [4, 4, 4, 255]))
            .unwrap();
        assert_eq!(
            stream.latest_frame().unwrap().pixel(0, 0),
            Some([4, 4, 4, 255])
        );
    }

    #[test]
    fn test_pull_audio_without_track_zeroes() {
        let (_writer, video) = VideoTrack::channel();
        let stream = MixedStream::new(video, None);

        let mut out = [5.0f32; 4];
        assert_eq!(stream.pull_audio(&mut out), 0);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_pull_audio_with_track() {
        let (_writer, video) = VideoTrack::channel();
        let (audio_writer, audio) = AudioTrack::channel();
        audio_writer.push(&[0.25, 0.75]);

        let stream = MixedStream::new(video, Some(audio));
        let mut out = [0.0f32; 2];
        assert_eq!(stream.pull_audio(&mut out), 2);
        assert_eq!(out, [0.25, 0.75]);
    }
}
