//! One-shot mix assembly
//!
//! Walks the registered sources once, at session start, and wires every
//! audio track into a fresh summing bus. Sources without audio contribute
//! nothing; when no source carries audio at all there is no bus and the
//! composite stays video only.

use crate::audio::bus::MixBus;
use crate::media::track::AudioTrack;
use crate::source::input::{InputSource, SourceId};

/// Build the mixed audio track for a session
///
/// Returns the bus (kept by the session so late sources can be tapped in)
/// and its capture output, or `None` when no source carries audio.
pub fn build_mixed_track<'a>(
    sources: impl IntoIterator<Item = (SourceId, &'a InputSource)>,
) -> Option<(MixBus, AudioTrack)> {
    let mut bus: Option<MixBus> = None;
    for (source_id, source) in sources {
        if !source.has_audio() {
            continue;
        }
        let bus = bus.get_or_insert_with(MixBus::new);
        for track in source.audio_tracks() {
            bus.add_tap(source_id, track.clone());
        }
    }

    match bus {
        Some(bus) => {
            tracing::debug!(taps = bus.tap_count(), "Audio mix assembled");
            let output = bus.output();
            Some((bus, output))
        }
        None => {
            tracing::debug!("No audio components; composite is video only");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::track::VideoTrack;

    #[test]
    fn test_no_sources_yields_no_mix() {
        assert!(build_mixed_track(std::iter::empty()).is_none());
    }

    #[test]
    fn test_video_only_roster_yields_no_mix() {
        let (_writer, video) = VideoTrack::channel();
        let source = InputSource::new().with_video(video);

        assert!(build_mixed_track([(0, &source)]).is_none());
    }

    #[test]
    fn test_single_audio_source() {
        let (writer, audio) = AudioTrack::channel();
        let source = InputSource::new().with_audio(audio);

        let (bus, output) = build_mixed_track([(0, &source)]).unwrap();
        assert_eq!(bus.tap_count(), 1);

        writer.push(&[0.5, -0.5]);
        let mut out = [0.0f32; 2];
        assert_eq!(output.pull(&mut out), 2);
        assert_eq!(out, [0.5, -0.5]);
    }

    #[test]
    fn test_all_audio_tracks_of_a_source_are_tapped() {
        let (_w1, first) = AudioTrack::channel();
        let (_w2, second) = AudioTrack::channel();
        let source = InputSource::new().with_audio(first).with_audio(second);

        let (bus, _output) = build_mixed_track([(0, &source)]).unwrap();
        assert_eq!(bus.tap_count(), 2);
    }

    #[test]
    fn test_mixed_roster_taps_only_audio_bearers() {
        let (_vw, video) = VideoTrack::channel();
        let (aw1, audio1) = AudioTrack::channel();
        let (aw2, audio2) = AudioTrack::channel();

        let video_only = InputSource::new().with_video(video.clone());
        let both = InputSource::new().with_video(video).with_audio(audio1);
        let audio_only = InputSource::new().with_audio(audio2);
        let empty = InputSource::new();

        let roster = [
            (0, &video_only),
            (1, &both),
            (2, &audio_only),
            (3, &empty),
        ];
        let (bus, output) = build_mixed_track(roster).unwrap();
        assert_eq!(bus.tap_count(), 2);

        aw1.push(&[0.25]);
        aw2.push(&[0.5]);
        let mut out = [0.0f32; 1];
        assert_eq!(output.pull(&mut out), 1);
        assert!((out[0] - 0.75).abs() < 0.001);
    }
}
