//! The collected fingerprint record.
//!
//! Field names serialize in camelCase so the JS side sees the same shape
//! the dashboard pages render.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintResult {
    pub user_agent: UserAgentSummary,
    pub screen: ScreenInfo,
    pub languages: Vec<String>,
    pub timezone: TimezoneInfo,
    pub webgl: WebGlInfo,
    pub canvas: CanvasInfo,
    pub fonts: Vec<String>,
    pub audio: AudioInfo,
    pub plugins: Vec<PluginInfo>,
    pub do_not_track: bool,
    pub cookies_enabled: bool,
    pub uniqueness: f64,
    pub connection: ConnectionInfo,
    pub media: MediaInfo,
    pub hardware: HardwareInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatteryInfo>,
    pub touch_support: TouchSupport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAgentSummary {
    pub browser: String,
    pub version: String,
    pub os: String,
    pub device: String,
}

impl Default for UserAgentSummary {
    fn default() -> Self {
        Self {
            browser: UNKNOWN.into(),
            version: UNKNOWN.into(),
            os: UNKNOWN.into(),
            device: "desktop".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    pub pixel_ratio: f64,
    pub avail_width: u32,
    pub avail_height: u32,
    pub orientation: String,
}

impl Default for ScreenInfo {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            color_depth: 0,
            pixel_ratio: 0.0,
            avail_width: 0,
            avail_height: 0,
            orientation: "unknown".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimezoneInfo {
    pub zone: String,
    /// Minutes, same sign convention as `Date.prototype.getTimezoneOffset`.
    pub offset: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebGlInfo {
    pub vendor: String,
    pub renderer: String,
    pub parameters: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasInfo {
    pub hash: String,
    pub text_api: String,
    pub emoji_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioInfo {
    pub sample_rate: f64,
    pub channels: u32,
    pub state: String,
    pub fingerprint: String,
}

impl Default for AudioInfo {
    fn default() -> Self {
        Self {
            sample_rate: 0.0,
            channels: 0,
            state: "unsupported".into(),
            fingerprint: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub description: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    /// Mbps
    pub downlink: f64,
    pub effective_type: String,
    /// Milliseconds
    pub rtt: f64,
    pub save_data: bool,
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self {
            downlink: 0.0,
            effective_type: "unknown".into(),
            rtt: 0.0,
            save_data: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub video_formats: Vec<String>,
    pub audio_formats: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareInfo {
    pub cores: u32,
    /// Approximate GB, as reported by `navigator.deviceMemory`.
    pub memory: f64,
    pub architecture: String,
    pub gpu: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryInfo {
    pub charging: bool,
    /// 0.0 ..= 1.0
    pub level: f64,
    pub charging_time: f64,
    pub discharging_time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchSupport {
    pub max_touch_points: u32,
    pub touch_event: bool,
    pub touch_start: bool,
}

pub(crate) const UNKNOWN: &str = "Unknown";
