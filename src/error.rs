//! Error types for fingerprint probes
//!
//! Probe errors never leave the collector. They exist so every probe can use
//! `?` internally and so the collector can decide, in one place, how loudly
//! a fallback gets logged:
//! - Unsupported/unavailable capabilities are expected on most browsers
//! - Everything else (thrown JS exceptions, rejected promises, timeouts) is
//!   worth a warning

use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, ProbeError>;

/// Error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Capability errors (1xx)
    Unsupported = 100,
    Unavailable = 101,

    // Runtime errors (2xx)
    JsException = 200,
    Rejected = 201,
    Timeout = 202,
}

/// Failure inside a single probe.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    /// The environment does not expose the capability at all.
    #[error("Capability not supported: {0}")]
    Unsupported(&'static str),

    /// The capability exists but produced nothing usable (null context,
    /// missing extension, missing global).
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    #[error("JavaScript exception: {0}")]
    Js(String),

    #[error("Promise rejected: {0}")]
    Rejected(String),

    #[error("Probe timed out after {0}ms")]
    Timeout(u32),
}

impl ProbeError {
    /// Get the error code for programmatic handling
    pub fn code(&self) -> ErrorCode {
        match self {
            ProbeError::Unsupported(_) => ErrorCode::Unsupported,
            ProbeError::Unavailable(_) => ErrorCode::Unavailable,
            ProbeError::Js(_) => ErrorCode::JsException,
            ProbeError::Rejected(_) => ErrorCode::Rejected,
            ProbeError::Timeout(_) => ErrorCode::Timeout,
        }
    }

    /// Whether this is the normal outcome on a browser lacking the
    /// capability, as opposed to something going wrong.
    pub fn is_expected(&self) -> bool {
        matches!(self, ProbeError::Unsupported(_) | ProbeError::Unavailable(_))
    }

    /// Wrap a rejected promise's value.
    pub fn rejected(value: JsValue) -> Self {
        ProbeError::Rejected(describe_js_value(&value))
    }
}

impl From<JsValue> for ProbeError {
    fn from(value: JsValue) -> Self {
        ProbeError::Js(describe_js_value(&value))
    }
}

/// Render a thrown JS value for a log line. Errors carry a `message`;
/// anything else falls back to its debug form.
fn describe_js_value(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
