//! Audio-context probe.
//!
//! Builds oscillator -> analyser in a fresh context and samples the first
//! frequency bins. The oscillator is never started; the values come from
//! the analyser's idle state, which still differs across audio stacks.

use std::ops::Deref;

use super::environment::{AudioGraph, Environment};
use super::result::AudioInfo;
use crate::error::Result;

const SAMPLED_BINS: usize = 10;

/// Closes the audio context when dropped.
struct ClosingGraph(Box<dyn AudioGraph>);

impl Deref for ClosingGraph {
    type Target = dyn AudioGraph;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Drop for ClosingGraph {
    fn drop(&mut self) {
        self.0.close();
    }
}

pub fn probe<E: Environment + ?Sized>(env: &E) -> Result<AudioInfo> {
    let graph = ClosingGraph(env.create_audio_graph()?);

    let bins = graph.frequency_data()?;
    let fingerprint = bins
        .iter()
        .take(SAMPLED_BINS)
        .map(|v| js_number(f64::from(*v)))
        .collect::<Vec<_>>()
        .join(",");

    Ok(AudioInfo {
        sample_rate: graph.sample_rate(),
        channels: graph.channel_count(),
        // Read before the guard closes the context.
        state: graph.state(),
        fingerprint,
    })
}

/// Format a number the way JavaScript's `String(n)` does.
fn js_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "Infinity".into()
    } else if v == f64::NEG_INFINITY {
        "-Infinity".into()
    } else if v == 0.0 {
        // -0 prints as "0"
        "0".into()
    } else if v.abs() >= 1e21 || v.abs() < 1e-6 {
        // Exponent form, with an explicit sign on positive exponents.
        let exp = format!("{:e}", v);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        }
    } else {
        v.to_string()
    }
}
