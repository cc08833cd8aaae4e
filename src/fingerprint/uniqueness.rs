//! Uniqueness score.
//!
//! Presence counting, not entropy: each of a fixed set of identifying
//! signals scores 1 when it was collected with a non-empty value, and the
//! score is the percentage of signals present. It answers "how many
//! distinguishing signals could a tracker read", not "how rare is this
//! browser".

use super::result::FingerprintResult;
use super::user_agent::UserAgentInfo;

pub const FACTOR_COUNT: usize = 13;

/// One identifying signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Factor {
    Text(String),
    Count(usize),
    /// A measurement that may be missing entirely.
    Measure(Option<f64>),
}

impl Factor {
    /// Present when non-empty, non-zero and defined.
    pub fn is_present(&self) -> bool {
        match self {
            Factor::Text(s) => !s.is_empty(),
            Factor::Count(n) => *n != 0,
            Factor::Measure(v) => v.is_some_and(|v| v != 0.0 && !v.is_nan()),
        }
    }
}

/// The factor list, in fixed order.
pub fn factors(ua: &UserAgentInfo, fp: &FingerprintResult) -> [Factor; FACTOR_COUNT] {
    [
        Factor::Text(ua.browser_key()),
        Factor::Text(ua.os_key()),
        Factor::Text(format!("{}x{}", fp.screen.width, fp.screen.height)),
        Factor::Text(fp.languages.first().cloned().unwrap_or_default()),
        Factor::Text(fp.timezone.zone.clone()),
        Factor::Text(fp.webgl.renderer.clone()),
        Factor::Text(fp.canvas.hash.clone()),
        Factor::Text(fp.audio.fingerprint.clone()),
        Factor::Count(fp.fonts.len()),
        Factor::Measure(fp.battery.as_ref().map(|b| b.level)),
        Factor::Text(fp.connection.effective_type.clone()),
        Factor::Count(fp.media.video_formats.len()),
        Factor::Count(fp.media.audio_formats.len()),
    ]
}

/// Percentage of present factors, in `[0, 100]`.
pub fn score(factors: &[Factor]) -> f64 {
    if factors.is_empty() {
        return 0.0;
    }
    let present = factors.iter().filter(|f| f.is_present()).count();
    (present as f64 / factors.len() as f64 * 100.0).clamp(0.0, 100.0)
}
