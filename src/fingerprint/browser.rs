//! [`Environment`] backed by the live browser.

use std::time::Duration;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Object, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AnalyserNode, AudioContext, AudioContextState, CanvasRenderingContext2d, Document,
    HtmlCanvasElement, HtmlMediaElement, Navigator, WebGlRenderingContext, Window,
};

use super::environment::{
    AudioGraph, Canvas2d, Environment, NetworkInformation, ScreenMetrics, WebGlContext,
};
use super::js_helpers::{
    bool_prop, call_method, construct_global, get_prop, has_global, has_prop, number_prop,
    string_prop, to_json,
};
use super::result::{BatteryInfo, PluginInfo, TouchSupport};
use crate::error::{ProbeError, Result};

const DEBUG_RENDERER_INFO: &str = "WEBGL_debug_renderer_info";

fn window() -> Result<Window> {
    web_sys::window().ok_or(ProbeError::Unsupported("window"))
}

fn navigator() -> Result<Navigator> {
    Ok(window()?.navigator())
}

/// `navigator` as a plain value, for reads by property name.
fn navigator_value() -> Result<JsValue> {
    Ok(navigator()?.into())
}

fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or(ProbeError::Unsupported("document"))
}

fn create_canvas() -> Result<HtmlCanvasElement> {
    document()?
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ProbeError::Unavailable("canvas element".into()))
}

fn non_negative(v: i32) -> u32 {
    u32::try_from(v).unwrap_or(0)
}

/// Reads signals from `window`, `navigator` and `screen`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserEnvironment;

impl BrowserEnvironment {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl Environment for BrowserEnvironment {
    fn user_agent(&self) -> Result<String> {
        Ok(navigator()?.user_agent()?)
    }

    fn screen(&self) -> Result<ScreenMetrics> {
        let window = window()?;
        let screen = window.screen()?;
        let orientation = get_prop(&screen, "orientation")
            .and_then(|o| string_prop(&o, "type"));

        Ok(ScreenMetrics {
            width: non_negative(screen.width()?),
            height: non_negative(screen.height()?),
            color_depth: non_negative(screen.color_depth()?),
            pixel_ratio: window.device_pixel_ratio(),
            avail_width: non_negative(screen.avail_width()?),
            avail_height: non_negative(screen.avail_height()?),
            orientation,
        })
    }

    fn languages(&self) -> Result<Vec<String>> {
        Ok(navigator()?
            .languages()
            .iter()
            .filter_map(|lang| lang.as_string())
            .collect())
    }

    fn timezone_name(&self) -> Result<String> {
        let format = js_sys::Intl::DateTimeFormat::new(&Array::new(), &Object::new());
        string_prop(&format.resolved_options(), "timeZone")
            .ok_or_else(|| ProbeError::Unavailable("resolvedOptions().timeZone".into()))
    }

    fn timezone_offset(&self) -> Result<i32> {
        Ok(js_sys::Date::new_0().get_timezone_offset() as i32)
    }

    fn do_not_track(&self) -> Result<Option<String>> {
        Ok(string_prop(&navigator_value()?, "doNotTrack"))
    }

    fn cookies_enabled(&self) -> Result<bool> {
        bool_prop(&navigator_value()?, "cookieEnabled")
            .ok_or(ProbeError::Unsupported("navigator.cookieEnabled"))
    }

    fn plugins(&self) -> Result<Vec<PluginInfo>> {
        let plugins = get_prop(&navigator_value()?, "plugins")
            .ok_or(ProbeError::Unsupported("navigator.plugins"))?;
        let count = number_prop(&plugins, "length").unwrap_or(0.0) as u32;

        let mut out = Vec::with_capacity(count as usize);
        for i in 0..count {
            let plugin = js_sys::Reflect::get_u32(&plugins, i)?;
            out.push(PluginInfo {
                name: string_prop(&plugin, "name").unwrap_or_default(),
                description: string_prop(&plugin, "description").unwrap_or_default(),
                filename: string_prop(&plugin, "filename").unwrap_or_default(),
            });
        }
        Ok(out)
    }

    fn hardware_concurrency(&self) -> Result<Option<u32>> {
        Ok(number_prop(&navigator_value()?, "hardwareConcurrency")
            .filter(|n| *n > 0.0)
            .map(|n| n as u32))
    }

    fn device_memory(&self) -> Result<Option<f64>> {
        Ok(number_prop(&navigator_value()?, "deviceMemory"))
    }

    fn network_information(&self) -> Result<NetworkInformation> {
        let nav = navigator_value()?;
        let connection = ["connection", "mozConnection", "webkitConnection"]
            .iter()
            .find_map(|prop| get_prop(&nav, prop))
            .ok_or(ProbeError::Unsupported("navigator.connection"))?;

        Ok(NetworkInformation {
            downlink: number_prop(&connection, "downlink"),
            effective_type: string_prop(&connection, "effectiveType"),
            rtt: number_prop(&connection, "rtt"),
            save_data: bool_prop(&connection, "saveData"),
        })
    }

    fn touch_support(&self) -> Result<TouchSupport> {
        let window: JsValue = window()?.into();
        Ok(TouchSupport {
            max_touch_points: number_prop(&navigator_value()?, "maxTouchPoints").unwrap_or(0.0) as u32,
            touch_event: has_global("TouchEvent"),
            touch_start: has_prop(&window, "ontouchstart"),
        })
    }

    fn create_canvas_2d(&self) -> Result<Box<dyn Canvas2d>> {
        let canvas = create_canvas()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| ProbeError::Unavailable("2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ProbeError::Unavailable("2d context".into()))?;
        Ok(Box::new(BrowserCanvas { canvas, ctx }))
    }

    fn create_webgl(&self) -> Result<Box<dyn WebGlContext>> {
        let canvas = create_canvas()?;
        let ctx = match canvas.get_context("webgl")? {
            Some(ctx) => Some(ctx),
            None => canvas.get_context("experimental-webgl")?,
        };
        let gl = ctx
            .ok_or_else(|| ProbeError::Unavailable("webgl context".into()))?
            .dyn_into::<WebGlRenderingContext>()
            .map_err(|_| ProbeError::Unavailable("webgl context".into()))?;
        Ok(Box::new(BrowserWebGl { canvas, gl }))
    }

    fn create_audio_graph(&self) -> Result<Box<dyn AudioGraph>> {
        let ctx = if has_global("AudioContext") {
            AudioContext::new()?
        } else if has_global("webkitAudioContext") {
            construct_global("webkitAudioContext")?.unchecked_into::<AudioContext>()
        } else {
            return Err(ProbeError::Unsupported("AudioContext"));
        };

        match connect_analyser(&ctx) {
            Ok(analyser) => Ok(Box::new(BrowserAudioGraph {
                ctx,
                analyser,
                closed: false,
            })),
            Err(e) => {
                let _ = ctx.close();
                Err(e)
            }
        }
    }

    fn supports_video_type(&self, mime: &str) -> Result<bool> {
        if !has_global("MediaSource") {
            return Err(ProbeError::Unsupported("MediaSource"));
        }
        Ok(web_sys::MediaSource::is_type_supported(mime))
    }

    fn can_play_audio_type(&self, mime: &str) -> Result<bool> {
        let audio = document()?
            .create_element("audio")?
            .dyn_into::<HtmlMediaElement>()
            .map_err(|_| ProbeError::Unavailable("audio element".into()))?;
        // "", "maybe" or "probably"
        Ok(!audio.can_play_type(mime).is_empty())
    }

    async fn query_local_fonts(&self) -> Result<Vec<String>> {
        let window: JsValue = window()?.into();
        if !has_prop(&window, "queryLocalFonts") {
            return Err(ProbeError::Unsupported("queryLocalFonts"));
        }
        let fonts = await_promise(call_method(&window, "queryLocalFonts", &Array::new())?).await?;
        Ok(Array::from(&fonts)
            .iter()
            .filter_map(|font| string_prop(&font, "family"))
            .collect())
    }

    async fn battery(&self) -> Result<BatteryInfo> {
        let nav = navigator_value()?;
        if !has_prop(&nav, "getBattery") {
            return Err(ProbeError::Unsupported("getBattery"));
        }
        let battery = await_promise(call_method(&nav, "getBattery", &Array::new())?).await?;
        Ok(BatteryInfo {
            charging: bool_prop(&battery, "charging").unwrap_or(false),
            level: number_prop(&battery, "level").unwrap_or(0.0),
            charging_time: number_prop(&battery, "chargingTime").unwrap_or(0.0),
            discharging_time: number_prop(&battery, "dischargingTime").unwrap_or(0.0),
        })
    }

    async fn delay(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

async fn await_promise(value: JsValue) -> Result<JsValue> {
    let promise: Promise = value
        .dyn_into()
        .map_err(|_| ProbeError::Unavailable("expected a Promise".into()))?;
    JsFuture::from(promise).await.map_err(ProbeError::rejected)
}

fn connect_analyser(ctx: &AudioContext) -> Result<AnalyserNode> {
    let oscillator = ctx.create_oscillator()?;
    let analyser = ctx.create_analyser()?;
    oscillator.connect_with_audio_node(&analyser)?;
    Ok(analyser)
}

struct BrowserCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d for BrowserCanvas {
    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.ctx.set_text_baseline(baseline);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        Ok(self.ctx.fill_text(text, x, y)?)
    }

    fn clear(&mut self) {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.ctx.clear_rect(0.0, 0.0, f64::from(w), f64::from(h));
    }

    fn to_data_url(&self) -> Result<String> {
        Ok(self.canvas.to_data_url()?)
    }
}

impl Drop for BrowserCanvas {
    fn drop(&mut self) {
        // A zero-sized canvas frees its backing store even while the
        // element itself waits for GC.
        self.canvas.set_width(0);
        self.canvas.set_height(0);
    }
}

struct BrowserWebGl {
    canvas: HtmlCanvasElement,
    gl: WebGlRenderingContext,
}

impl WebGlContext for BrowserWebGl {
    fn has_extension(&self, name: &str) -> bool {
        matches!(self.gl.get_extension(name), Ok(Some(_)))
    }

    fn parameter(&self, name: &str) -> Result<serde_json::Value> {
        // Unmasked constants live on the extension object, the rest on the
        // context itself.
        let holder: JsValue = if name.starts_with("UNMASKED_") {
            self.gl
                .get_extension(DEBUG_RENDERER_INFO)?
                .ok_or_else(|| ProbeError::Unavailable(DEBUG_RENDERER_INFO.into()))?
                .into()
        } else {
            self.gl.clone().into()
        };
        let constant = number_prop(&holder, name)
            .ok_or_else(|| ProbeError::Js(format!("{} is not a WebGL constant", name)))?;

        let value = self.gl.get_parameter(constant as u32)?;
        Ok(to_json(&value))
    }
}

impl Drop for BrowserWebGl {
    fn drop(&mut self) {
        self.canvas.set_width(0);
        self.canvas.set_height(0);
    }
}

struct BrowserAudioGraph {
    ctx: AudioContext,
    analyser: AnalyserNode,
    closed: bool,
}

impl AudioGraph for BrowserAudioGraph {
    fn sample_rate(&self) -> f64 {
        f64::from(self.ctx.sample_rate())
    }

    fn channel_count(&self) -> u32 {
        self.ctx.destination().channel_count()
    }

    fn state(&self) -> String {
        match self.ctx.state() {
            AudioContextState::Suspended => "suspended",
            AudioContextState::Running => "running",
            AudioContextState::Closed => "closed",
            _ => "unknown",
        }
        .to_string()
    }

    fn frequency_data(&self) -> Result<Vec<f32>> {
        let mut bins = vec![0f32; self.analyser.frequency_bin_count() as usize];
        self.analyser.get_float_frequency_data(&mut bins);
        Ok(bins)
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.ctx.close() {
            log::debug!("AudioContext.close() threw: {:?}", e);
        }
    }
}
