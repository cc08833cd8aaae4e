//! Environment capability provider.
//!
//! Everything the probes read goes through [`Environment`]: one method per
//! capability, each returning `Err` when the capability is missing or throws.
//! [`super::browser::BrowserEnvironment`] backs it with the real browser;
//! tests substitute scripted fakes.

use std::time::Duration;

use async_trait::async_trait;

use super::result::{BatteryInfo, PluginInfo, TouchSupport};
use crate::error::Result;

/// Raw screen geometry. Orientation is optional because
/// `screen.orientation` is missing on older engines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenMetrics {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    pub pixel_ratio: f64,
    pub avail_width: u32,
    pub avail_height: u32,
    pub orientation: Option<String>,
}

/// Raw `navigator.connection` snapshot. Each field may be absent
/// independently of the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkInformation {
    pub downlink: Option<f64>,
    pub effective_type: Option<String>,
    pub rtt: Option<f64>,
    pub save_data: Option<bool>,
}

/// A 2D drawing surface. Dropping it releases the backing store.
pub trait Canvas2d {
    fn set_font(&mut self, font: &str);
    fn set_text_baseline(&mut self, baseline: &str);
    fn set_fill_style(&mut self, style: &str);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()>;
    /// Clear the whole surface.
    fn clear(&mut self);
    /// Lossless buffer encoding (PNG data URL in the browser).
    fn to_data_url(&self) -> Result<String>;
}

/// A live WebGL context.
pub trait WebGlContext {
    fn has_extension(&self, name: &str) -> bool;
    /// Look up the named constant (e.g. `MAX_VERTEX_ATTRIBS`,
    /// `UNMASKED_RENDERER_WEBGL`) and read its parameter value.
    fn parameter(&self, name: &str) -> Result<serde_json::Value>;
}

/// An oscillator connected to an analyser inside a fresh audio context.
pub trait AudioGraph {
    fn sample_rate(&self) -> f64;
    fn channel_count(&self) -> u32;
    fn state(&self) -> String;
    /// Full analyser frequency buffer in dB.
    fn frequency_data(&self) -> Result<Vec<f32>>;
    /// Close the underlying context. Must tolerate repeated calls.
    fn close(&mut self);
}

#[async_trait(?Send)]
pub trait Environment {
    fn user_agent(&self) -> Result<String>;
    fn screen(&self) -> Result<ScreenMetrics>;
    fn languages(&self) -> Result<Vec<String>>;
    fn timezone_name(&self) -> Result<String>;
    fn timezone_offset(&self) -> Result<i32>;
    /// Raw `navigator.doNotTrack`; `None` when undefined or null.
    fn do_not_track(&self) -> Result<Option<String>>;
    fn cookies_enabled(&self) -> Result<bool>;
    fn plugins(&self) -> Result<Vec<PluginInfo>>;
    fn hardware_concurrency(&self) -> Result<Option<u32>>;
    fn device_memory(&self) -> Result<Option<f64>>;
    fn network_information(&self) -> Result<NetworkInformation>;
    fn touch_support(&self) -> Result<TouchSupport>;

    fn create_canvas_2d(&self) -> Result<Box<dyn Canvas2d>>;
    fn create_webgl(&self) -> Result<Box<dyn WebGlContext>>;
    fn create_audio_graph(&self) -> Result<Box<dyn AudioGraph>>;

    fn supports_video_type(&self, mime: &str) -> Result<bool>;
    fn can_play_audio_type(&self, mime: &str) -> Result<bool>;

    async fn query_local_fonts(&self) -> Result<Vec<String>>;
    async fn battery(&self) -> Result<BatteryInfo>;

    /// Resolve after `duration`. Only used to bound asynchronous probes.
    async fn delay(&self, duration: Duration);
}
