//! Navigator-level probes: locale, privacy flags, plugins, hardware hints,
//! network information and touch input.

use super::environment::Environment;
use super::result::{ConnectionInfo, PluginInfo, TouchSupport};
use crate::error::Result;

pub fn languages<E: Environment + ?Sized>(env: &E) -> Result<Vec<String>> {
    env.languages()
}

/// Only the exact string `"1"` means the user opted out of tracking.
pub fn do_not_track<E: Environment + ?Sized>(env: &E) -> Result<bool> {
    Ok(env.do_not_track()?.as_deref() == Some("1"))
}

pub fn cookies_enabled<E: Environment + ?Sized>(env: &E) -> Result<bool> {
    env.cookies_enabled()
}

pub fn plugins<E: Environment + ?Sized>(env: &E) -> Result<Vec<PluginInfo>> {
    env.plugins()
}

/// Logical cores and device memory in GB. Either may be missing on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HardwareHints {
    pub cores: u32,
    pub memory: f64,
}

pub fn hardware<E: Environment + ?Sized>(env: &E) -> Result<HardwareHints> {
    let cores = env.hardware_concurrency().unwrap_or_else(|e| {
        log::debug!("hardwareConcurrency unavailable: {}", e);
        None
    });
    let memory = env.device_memory().unwrap_or_else(|e| {
        log::debug!("deviceMemory unavailable: {}", e);
        None
    });
    Ok(HardwareHints {
        cores: cores.unwrap_or(0),
        memory: memory.unwrap_or(0.0),
    })
}

/// Each field falls back on its own when missing, zero or empty.
pub fn connection<E: Environment + ?Sized>(env: &E) -> Result<ConnectionInfo> {
    let raw = env.network_information()?;
    let defaults = ConnectionInfo::default();
    Ok(ConnectionInfo {
        downlink: raw
            .downlink
            .filter(|v| *v != 0.0 && !v.is_nan())
            .unwrap_or(defaults.downlink),
        effective_type: raw
            .effective_type
            .filter(|t| !t.is_empty())
            .unwrap_or(defaults.effective_type),
        rtt: raw
            .rtt
            .filter(|v| *v != 0.0 && !v.is_nan())
            .unwrap_or(defaults.rtt),
        save_data: raw.save_data.unwrap_or(defaults.save_data),
    })
}

pub fn touch_support<E: Environment + ?Sized>(env: &E) -> Result<TouchSupport> {
    env.touch_support()
}
