//! Canvas rendering probe.
//!
//! Draws three fixed scripts onto one 2D surface and keeps each encoded
//! buffer. Output differs between machines (fonts, anti-aliasing, emoji
//! sets) but is stable for repeated runs on the same one.

use super::environment::{Canvas2d, Environment};
use super::result::CanvasInfo;
use crate::error::Result;

const FONT: &str = "14px Arial";
const FAMILY_TEXT: &str = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466} Lorem ipsum 123 !@#$%";
const EMOJI_TEXT: &str = "\u{1F600}\u{1F914}\u{1F30D}\u{1F3A8}\u{1F512}\u{1F4BB}\u{1F308}";

pub fn probe<E: Environment + ?Sized>(env: &E) -> Result<CanvasInfo> {
    // Released on drop, whichever way this function exits.
    let mut canvas = env.create_canvas_2d()?;

    let hash = render_primary(canvas.as_mut())?;
    let text_api = render_line(canvas.as_mut(), FAMILY_TEXT)?;
    let emoji_hash = render_line(canvas.as_mut(), EMOJI_TEXT)?;

    Ok(CanvasInfo {
        hash,
        text_api,
        emoji_hash,
    })
}

fn render_primary(canvas: &mut dyn Canvas2d) -> Result<String> {
    canvas.set_text_baseline("top");
    canvas.set_font(FONT);
    canvas.set_fill_style("#f60");
    canvas.fill_rect(125.0, 1.0, 62.0, 20.0);
    canvas.set_fill_style("#069");
    canvas.fill_text("Privacy Guard", 2.0, 15.0)?;
    canvas.set_fill_style("rgba(102, 204, 0, 0.7)");
    canvas.fill_text("Fingerprint", 4.0, 17.0)?;
    canvas.to_data_url()
}

fn render_line(canvas: &mut dyn Canvas2d, text: &str) -> Result<String> {
    canvas.clear();
    canvas.set_font(FONT);
    canvas.fill_text(text, 0.0, 0.0)?;
    canvas.to_data_url()
}
