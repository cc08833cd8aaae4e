//! # Privacy Fingerprint
//!
//! A browser fingerprint collector compiled to WebAssembly.
//!
//! Shows a visitor what a tracking script can learn about their browser
//! without cookies: canvas and WebGL rendering, audio stack output, fonts,
//! hardware and network hints, locale and screen geometry, plus a score for
//! how many of those signals were readable.
//!
//! ## Architecture
//!
//! ```text
//! collect_fingerprint (WASM export)
//!   ↓
//! FingerprintCollector
//!   ↓                         ↓
//! sync probes (inline)   async probes (fonts, battery; joined)
//!   ↓                         ↓
//! Environment trait  →  BrowserEnvironment (web-sys / js-sys)
//! ```
//!
//! Every probe either produces its record or falls back to a documented
//! default, so collection itself cannot fail.

use wasm_bindgen::prelude::*;

mod error;
pub mod fingerprint;

pub use error::{ErrorCode, ProbeError, Result};
pub use fingerprint::browser::BrowserEnvironment;
pub use fingerprint::config::CollectorConfig;
pub use fingerprint::environment::{
    AudioGraph, Canvas2d, Environment, NetworkInformation, ScreenMetrics, WebGlContext,
};
pub use fingerprint::result::{
    AudioInfo, BatteryInfo, CanvasInfo, ConnectionInfo, FingerprintResult, HardwareInfo,
    MediaInfo, PluginInfo, ScreenInfo, TimezoneInfo, TouchSupport, UserAgentSummary, WebGlInfo,
};
pub use fingerprint::user_agent::UserAgentInfo;
pub use fingerprint::{collect, collect_fingerprint, FingerprintCollector};

/// Initialize logging.
#[wasm_bindgen(start)]
pub fn init() {
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Already installed by an earlier init.
        return;
    }
    log::info!("Privacy fingerprint collector initialized");
}
