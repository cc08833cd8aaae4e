//! Browser fingerprint collector.
//!
//! Reads every signal a tracking script would typically gather and reports
//! them together with a 0-100 uniqueness score.
//!
//! ## Usage
//!
//! ```javascript
//! import init, { collect_fingerprint } from './pkg/privacy_fingerprint.js';
//! await init();
//! const fp = await collect_fingerprint();                       // everything
//! const quick = await collect_fingerprint({ localFonts: false, probeTimeoutMs: 2000 });
//! console.log(fp.uniqueness, fp.canvas.hash);
//! ```
//!
//! ## Guarantees
//!
//! - Collection always resolves; a probe that fails yields its default
//!   record (or no `battery` key at all)
//! - Canvas and audio resources are released before each probe returns
//! - Nothing is sent over the network or persisted

use std::task::Poll;

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod battery;
pub mod browser;
pub mod canvas;
pub mod config;
pub mod environment;
pub mod fonts;
pub mod js_helpers;
pub mod media;
pub mod navigator;
pub mod probe;
pub mod result;
pub mod screen;
pub mod timezone;
pub mod uniqueness;
pub mod user_agent;
pub mod webgl;

#[cfg(test)]
pub(crate) mod testing;

use browser::BrowserEnvironment;
use config::CollectorConfig;
use environment::Environment;
use probe::{bounded, settle, settle_optional};
use result::{FingerprintResult, HardwareInfo};
use user_agent::UserAgentInfo;

/// Collects a [`FingerprintResult`] from an [`Environment`].
pub struct FingerprintCollector<E> {
    env: E,
    config: CollectorConfig,
}

impl<E: Environment> FingerprintCollector<E> {
    pub fn new(env: E) -> Self {
        Self {
            env,
            config: CollectorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CollectorConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn collect(&self) -> FingerprintResult {
        collect(&self.env, &self.config).await
    }
}

/// Run every probe and assemble the result. Never fails.
///
/// Font enumeration and battery status are started first and polled once,
/// so their browser queries are in flight before the synchronous probes run
/// inline. They are joined afterwards.
pub async fn collect<E: Environment + ?Sized>(env: &E, config: &CollectorConfig) -> FingerprintResult {
    let timeout = config.probe_timeout();

    let fonts = async {
        if !config.local_fonts {
            return Vec::new();
        }
        settle("fonts", bounded(env, timeout, fonts::probe(env)).await)
    };
    let battery = async {
        if !config.battery {
            return None;
        }
        settle_optional("battery", bounded(env, timeout, battery::probe(env)).await)
    };
    let mut pending = Box::pin(futures::future::join(fonts, battery));
    let early = futures::poll!(pending.as_mut());

    let ua = match env.user_agent() {
        Ok(raw) => UserAgentInfo::parse(&raw),
        Err(e) => {
            log::debug!("user agent unavailable: {}", e);
            UserAgentInfo::default()
        }
    };
    let screen = settle("screen", screen::probe(env));
    let languages = settle("languages", navigator::languages(env));
    let timezone = settle("timezone", timezone::probe(env));
    let webgl = settle("webgl", webgl::probe(env));
    let canvas = settle("canvas", canvas::probe(env));
    let audio = settle("audio", audio::probe(env));
    let plugins = settle("plugins", navigator::plugins(env));
    let do_not_track = settle("doNotTrack", navigator::do_not_track(env));
    let cookies_enabled = settle("cookies", navigator::cookies_enabled(env));
    let connection = settle("connection", navigator::connection(env));
    let media = settle("media", media::probe(env));
    let hints = settle("hardware", navigator::hardware(env));
    let touch_support = settle("touch", navigator::touch_support(env));

    let (fonts, battery) = match early {
        Poll::Ready(done) => done,
        Poll::Pending => pending.await,
    };

    let hardware = HardwareInfo {
        cores: hints.cores,
        memory: hints.memory,
        architecture: ua.architecture(),
        gpu: webgl.renderer.clone(),
    };

    let mut result = FingerprintResult {
        user_agent: ua.summary(),
        screen,
        languages,
        timezone,
        webgl,
        canvas,
        fonts,
        audio,
        plugins,
        do_not_track,
        cookies_enabled,
        uniqueness: 0.0,
        connection,
        media,
        hardware,
        battery,
        touch_support,
    };
    result.uniqueness = uniqueness::score(&uniqueness::factors(&ua, &result));

    log::info!(
        "Fingerprint collected: uniqueness {:.1}%",
        result.uniqueness
    );
    result
}

/// Collect the fingerprint of the current browser.
///
/// Pass a JS object to tune collection:
/// ```javascript
/// collect_fingerprint({ battery: false, probeTimeoutMs: 1500 });
/// ```
///
/// Resolves to a plain object shaped like [`FingerprintResult`].
#[wasm_bindgen]
pub async fn collect_fingerprint(options: JsValue) -> Result<JsValue, JsValue> {
    let config: CollectorConfig = if options.is_undefined() || options.is_null() {
        CollectorConfig::default()
    } else {
        serde_wasm_bindgen::from_value(options).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid collector options: {}", e);
            CollectorConfig::default()
        })
    };

    let result = FingerprintCollector::new(BrowserEnvironment::new())
        .with_config(config)
        .collect()
        .await;

    js_helpers::to_plain_object(&result)
}
