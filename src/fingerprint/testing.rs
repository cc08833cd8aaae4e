//! Scripted [`Environment`] for unit tests.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::environment::{
    AudioGraph, Canvas2d, Environment, NetworkInformation, ScreenMetrics, WebGlContext,
};
use super::result::{BatteryInfo, PluginInfo, TouchSupport};
use crate::error::{ProbeError, Result};

fn unsupported<T>(what: &'static str) -> Result<T> {
    Err(ProbeError::Unsupported(what))
}

/// Records draw calls; the "encoding" is the call log itself, so identical
/// scripts yield identical output.
pub struct FakeCanvas {
    ops: Vec<String>,
    released: Rc<Cell<u32>>,
    fail_text: bool,
}

impl Canvas2d for FakeCanvas {
    fn set_font(&mut self, font: &str) {
        self.ops.push(format!("font={}", font));
    }
    fn set_text_baseline(&mut self, baseline: &str) {
        self.ops.push(format!("baseline={}", baseline));
    }
    fn set_fill_style(&mut self, style: &str) {
        self.ops.push(format!("fill={}", style));
    }
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(format!("rect({},{},{},{})", x, y, width, height));
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        if self.fail_text {
            return Err(ProbeError::Js("fillText threw".into()));
        }
        self.ops.push(format!("text({},{},{})", text, x, y));
        Ok(())
    }
    fn clear(&mut self) {
        self.ops.clear();
    }
    fn to_data_url(&self) -> Result<String> {
        Ok(format!("data:image/fake;{}", self.ops.join("|")))
    }
}

impl Drop for FakeCanvas {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

#[derive(Clone, Default)]
pub struct FakeWebGl {
    pub extensions: Vec<String>,
    pub parameters: BTreeMap<String, Result<serde_json::Value>>,
}

impl WebGlContext for FakeWebGl {
    fn has_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|e| e == name)
    }
    fn parameter(&self, name: &str) -> Result<serde_json::Value> {
        self.parameters
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(ProbeError::Js(format!("unknown constant {}", name))))
    }
}

#[derive(Clone)]
pub struct FakeAudio {
    pub sample_rate: f64,
    pub channels: u32,
    pub state: String,
    pub data: Result<Vec<f32>>,
}

pub struct FakeAudioGraph {
    profile: FakeAudio,
    closed: Rc<Cell<u32>>,
}

impl AudioGraph for FakeAudioGraph {
    fn sample_rate(&self) -> f64 {
        self.profile.sample_rate
    }
    fn channel_count(&self) -> u32 {
        self.profile.channels
    }
    fn state(&self) -> String {
        self.profile.state.clone()
    }
    fn frequency_data(&self) -> Result<Vec<f32>> {
        self.profile.data.clone()
    }
    fn close(&mut self) {
        self.closed.set(self.closed.get() + 1);
    }
}

pub struct FakeEnvironment {
    pub user_agent: Result<String>,
    pub screen: Result<ScreenMetrics>,
    pub languages: Result<Vec<String>>,
    pub timezone_name: Result<String>,
    pub timezone_offset: Result<i32>,
    pub do_not_track: Result<Option<String>>,
    pub cookies_enabled: Result<bool>,
    pub plugins: Result<Vec<PluginInfo>>,
    pub cores: Result<Option<u32>>,
    pub memory: Result<Option<f64>>,
    pub network: Result<NetworkInformation>,
    pub touch: Result<TouchSupport>,
    pub canvas_available: bool,
    pub canvas_fails_text: bool,
    pub webgl: Option<FakeWebGl>,
    pub audio: Option<FakeAudio>,
    pub video_types: Vec<String>,
    pub audio_types: Vec<String>,
    pub fonts: Result<Vec<String>>,
    pub fonts_hang: bool,
    pub battery: Result<BatteryInfo>,
    pub battery_hang: bool,
    pub timer_fires: bool,

    pub canvases_released: Rc<Cell<u32>>,
    pub audio_closed: Rc<Cell<u32>>,
    /// `canvases_released` at the moment each async query began.
    pub released_when_fonts_queried: Cell<Option<u32>>,
    pub released_when_battery_queried: Cell<Option<u32>>,
}

impl FakeEnvironment {
    /// Every capability missing.
    pub fn bare() -> Self {
        Self {
            user_agent: unsupported("userAgent"),
            screen: unsupported("screen"),
            languages: unsupported("languages"),
            timezone_name: unsupported("Intl"),
            timezone_offset: unsupported("Date"),
            do_not_track: unsupported("doNotTrack"),
            cookies_enabled: unsupported("cookieEnabled"),
            plugins: unsupported("plugins"),
            cores: unsupported("hardwareConcurrency"),
            memory: unsupported("deviceMemory"),
            network: unsupported("connection"),
            touch: unsupported("touch"),
            canvas_available: false,
            canvas_fails_text: false,
            webgl: None,
            audio: None,
            video_types: Vec::new(),
            audio_types: Vec::new(),
            fonts: unsupported("queryLocalFonts"),
            fonts_hang: false,
            battery: unsupported("getBattery"),
            battery_hang: false,
            timer_fires: true,
            canvases_released: Rc::new(Cell::new(0)),
            audio_closed: Rc::new(Cell::new(0)),
            released_when_fonts_queried: Cell::new(None),
            released_when_battery_queried: Cell::new(None),
        }
    }

    /// A typical desktop Chrome with every capability present.
    pub fn desktop() -> Self {
        let mut parameters = BTreeMap::new();
        parameters.insert("UNMASKED_VENDOR_WEBGL".to_string(), Ok(json!("Google Inc. (NVIDIA)")));
        parameters.insert("UNMASKED_RENDERER_WEBGL".to_string(), Ok(json!("ANGLE (NVIDIA GeForce)")));
        parameters.insert("MAX_VERTEX_ATTRIBS".to_string(), Ok(json!(16)));
        parameters.insert("MAX_TEXTURE_IMAGE_UNITS".to_string(), Ok(json!(16)));
        parameters.insert("ALIASED_LINE_WIDTH_RANGE".to_string(), Ok(json!([1.0, 1.0])));

        Self {
            user_agent: Ok("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .into()),
            screen: Ok(ScreenMetrics {
                width: 1920,
                height: 1080,
                color_depth: 24,
                pixel_ratio: 1.0,
                avail_width: 1920,
                avail_height: 1040,
                orientation: Some("landscape-primary".into()),
            }),
            languages: Ok(vec!["en-US".into(), "en".into()]),
            timezone_name: Ok("Europe/Berlin".into()),
            timezone_offset: Ok(-60),
            do_not_track: Ok(None),
            cookies_enabled: Ok(true),
            plugins: Ok(vec![PluginInfo {
                name: "PDF Viewer".into(),
                description: "Portable Document Format".into(),
                filename: "internal-pdf-viewer".into(),
            }]),
            cores: Ok(Some(8)),
            memory: Ok(Some(8.0)),
            network: Ok(NetworkInformation {
                downlink: Some(10.0),
                effective_type: Some("4g".into()),
                rtt: Some(50.0),
                save_data: Some(false),
            }),
            touch: Ok(TouchSupport::default()),
            canvas_available: true,
            webgl: Some(FakeWebGl {
                extensions: vec!["WEBGL_debug_renderer_info".into()],
                parameters,
            }),
            audio: Some(FakeAudio {
                sample_rate: 48000.0,
                channels: 2,
                state: "suspended".into(),
                data: Ok(vec![f32::NEG_INFINITY; 1024]),
            }),
            video_types: vec![
                r#"video/mp4; codecs="avc1.42E01E""#.into(),
                r#"video/webm; codecs="vp9""#.into(),
            ],
            audio_types: vec!["audio/mp3".into(), "audio/wav".into()],
            fonts: Ok(vec!["Arial".into(), "Consolas".into(), "Arial".into()]),
            battery: Ok(BatteryInfo {
                charging: true,
                level: 0.8,
                charging_time: 0.0,
                discharging_time: f64::INFINITY,
            }),
            ..Self::bare()
        }
    }
}

#[async_trait(?Send)]
impl Environment for FakeEnvironment {
    fn user_agent(&self) -> Result<String> {
        self.user_agent.clone()
    }
    fn screen(&self) -> Result<ScreenMetrics> {
        self.screen.clone()
    }
    fn languages(&self) -> Result<Vec<String>> {
        self.languages.clone()
    }
    fn timezone_name(&self) -> Result<String> {
        self.timezone_name.clone()
    }
    fn timezone_offset(&self) -> Result<i32> {
        self.timezone_offset.clone()
    }
    fn do_not_track(&self) -> Result<Option<String>> {
        self.do_not_track.clone()
    }
    fn cookies_enabled(&self) -> Result<bool> {
        self.cookies_enabled.clone()
    }
    fn plugins(&self) -> Result<Vec<PluginInfo>> {
        self.plugins.clone()
    }
    fn hardware_concurrency(&self) -> Result<Option<u32>> {
        self.cores.clone()
    }
    fn device_memory(&self) -> Result<Option<f64>> {
        self.memory.clone()
    }
    fn network_information(&self) -> Result<NetworkInformation> {
        self.network.clone()
    }
    fn touch_support(&self) -> Result<TouchSupport> {
        self.touch.clone()
    }

    fn create_canvas_2d(&self) -> Result<Box<dyn Canvas2d>> {
        if !self.canvas_available {
            return Err(ProbeError::Unavailable("2d context".into()));
        }
        Ok(Box::new(FakeCanvas {
            ops: Vec::new(),
            released: Rc::clone(&self.canvases_released),
            fail_text: self.canvas_fails_text,
        }))
    }

    fn create_webgl(&self) -> Result<Box<dyn WebGlContext>> {
        match &self.webgl {
            Some(gl) => Ok(Box::new(gl.clone())),
            None => Err(ProbeError::Unavailable("webgl context".into())),
        }
    }

    fn create_audio_graph(&self) -> Result<Box<dyn AudioGraph>> {
        match &self.audio {
            Some(profile) => Ok(Box::new(FakeAudioGraph {
                profile: profile.clone(),
                closed: Rc::clone(&self.audio_closed),
            })),
            None => unsupported("AudioContext"),
        }
    }

    fn supports_video_type(&self, mime: &str) -> Result<bool> {
        Ok(self.video_types.iter().any(|t| t == mime))
    }

    fn can_play_audio_type(&self, mime: &str) -> Result<bool> {
        Ok(self.audio_types.iter().any(|t| t == mime))
    }

    async fn query_local_fonts(&self) -> Result<Vec<String>> {
        self.released_when_fonts_queried
            .set(Some(self.canvases_released.get()));
        if self.fonts_hang {
            futures::future::pending::<()>().await;
        }
        self.fonts.clone()
    }

    async fn battery(&self) -> Result<BatteryInfo> {
        self.released_when_battery_queried
            .set(Some(self.canvases_released.get()));
        if self.battery_hang {
            futures::future::pending::<()>().await;
        }
        self.battery.clone()
    }

    async fn delay(&self, _duration: Duration) {
        if !self.timer_fires {
            futures::future::pending::<()>().await;
        }
    }
}
