//! Screen geometry probe.

use super::environment::Environment;
use super::result::ScreenInfo;
use crate::error::Result;

pub fn probe<E: Environment + ?Sized>(env: &E) -> Result<ScreenInfo> {
    let metrics = env.screen()?;
    Ok(ScreenInfo {
        width: metrics.width,
        height: metrics.height,
        color_depth: metrics.color_depth,
        pixel_ratio: metrics.pixel_ratio,
        avail_width: metrics.avail_width,
        avail_height: metrics.avail_height,
        orientation: metrics
            .orientation
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| "unknown".into()),
    })
}
