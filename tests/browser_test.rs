//! In-browser tests for the collector.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use privacy_fingerprint::{
    collect_fingerprint, BrowserEnvironment, Environment, FingerprintCollector,
    FingerprintResult, UserAgentInfo,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn collect_resolves_with_bounded_score() {
    let fp = FingerprintCollector::new(BrowserEnvironment::new())
        .collect()
        .await;

    assert!((0.0..=100.0).contains(&fp.uniqueness));
    assert!(fp.screen.width > 0);
    assert!(!fp.languages.is_empty());
    assert_eq!(fp.hardware.gpu, fp.webgl.renderer);
}

#[wasm_bindgen_test]
async fn export_returns_plain_object() {
    let value = collect_fingerprint(JsValue::UNDEFINED).await.unwrap();
    assert!(value.is_object());

    let fp: FingerprintResult = serde_wasm_bindgen::from_value(value).unwrap();
    assert!((0.0..=100.0).contains(&fp.uniqueness));
}

#[wasm_bindgen_test]
async fn export_accepts_options() {
    let options = js_sys::JSON::parse(r#"{"battery":false,"localFonts":false}"#).unwrap();
    let value = collect_fingerprint(options).await.unwrap();

    let battery = js_sys::Reflect::get(&value, &JsValue::from_str("battery")).unwrap();
    assert!(battery.is_undefined());
}

#[wasm_bindgen_test]
async fn canvas_is_stable_across_runs() {
    let collector = FingerprintCollector::new(BrowserEnvironment::new());
    let a = collector.collect().await;
    let b = collector.collect().await;
    assert_eq!(a.canvas, b.canvas);
}

#[wasm_bindgen_test]
fn user_agent_parses() {
    let env = BrowserEnvironment::new();
    let raw = env.user_agent().unwrap();
    let ua = UserAgentInfo::parse(&raw);
    assert!(!ua.browser_key().is_empty());
}

#[wasm_bindgen_test]
fn navigator_reads_by_property_name() {
    let env = BrowserEnvironment::new();
    assert!(env.cookies_enabled().is_ok());
    assert!(env.do_not_track().is_ok());
    assert!(env.plugins().is_ok());
    assert!(env.hardware_concurrency().unwrap().is_some());
    assert!(env.touch_support().is_ok());
}
