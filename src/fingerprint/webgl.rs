//! WebGL vendor/renderer and capability probe.

use std::collections::BTreeMap;

use super::environment::Environment;
use super::result::WebGlInfo;
use crate::error::Result;

const DEBUG_RENDERER_INFO: &str = "WEBGL_debug_renderer_info";

/// Capability constants read into `WebGlInfo::parameters`.
pub const PARAMETERS: [&str; 8] = [
    "MAX_VERTEX_UNIFORM_VECTORS",
    "MAX_VARYING_VECTORS",
    "MAX_TEXTURE_IMAGE_UNITS",
    "MAX_VERTEX_ATTRIBS",
    "MAX_VERTEX_TEXTURE_IMAGE_UNITS",
    "MAX_FRAGMENT_UNIFORM_VECTORS",
    "ALIASED_LINE_WIDTH_RANGE",
    "ALIASED_POINT_SIZE_RANGE",
];

pub fn probe<E: Environment + ?Sized>(env: &E) -> Result<WebGlInfo> {
    let gl = env.create_webgl()?;

    // Without the debug extension the masked strings are useless, and the
    // record stays empty.
    if !gl.has_extension(DEBUG_RENDERER_INFO) {
        log::debug!("{} not exposed", DEBUG_RENDERER_INFO);
        return Ok(WebGlInfo::default());
    }

    let vendor = as_text(gl.parameter("UNMASKED_VENDOR_WEBGL")?);
    let renderer = as_text(gl.parameter("UNMASKED_RENDERER_WEBGL")?);

    let mut parameters = BTreeMap::new();
    for name in PARAMETERS {
        match gl.parameter(name) {
            Ok(value) => {
                parameters.insert(name.to_string(), value);
            }
            Err(e) => log::warn!("Failed to get WebGL parameter {}: {}", name, e),
        }
    }

    Ok(WebGlInfo {
        vendor,
        renderer,
        parameters,
    })
}

fn as_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
