//! Media codec support probe.

use super::environment::Environment;
use super::result::MediaInfo;
use crate::error::Result;

pub const VIDEO_TYPES: [&str; 4] = [
    r#"video/mp4; codecs="avc1.42E01E""#,
    r#"video/webm; codecs="vp8, vorbis""#,
    r#"video/webm; codecs="vp9""#,
    r#"video/ogg; codecs="theora""#,
];

pub const AUDIO_TYPES: [&str; 5] = [
    "audio/mp3",
    "audio/wav",
    "audio/ogg",
    "audio/m4a",
    "audio/aac",
];

pub fn probe<E: Environment + ?Sized>(env: &E) -> Result<MediaInfo> {
    Ok(MediaInfo {
        video_formats: supported(&VIDEO_TYPES, |mime| env.supports_video_type(mime)),
        audio_formats: supported(&AUDIO_TYPES, |mime| env.can_play_audio_type(mime)),
    })
}

/// Candidates the check accepts, in list order. A check that errors
/// counts as unsupported for that candidate only.
fn supported(candidates: &[&str], check: impl Fn(&str) -> Result<bool>) -> Vec<String> {
    candidates
        .iter()
        .filter(|mime| match check(**mime) {
            Ok(ok) => ok,
            Err(e) => {
                log::debug!("media type check for {} failed: {}", mime, e);
                false
            }
        })
        .map(|mime| mime.to_string())
        .collect()
}
