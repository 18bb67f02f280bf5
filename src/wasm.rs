//! WASM bindings for flipping stylesheets in the browser.

use wasm_bindgen::prelude::*;

use crate::{Options, WritingDirection};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn direction(text: Option<String>, default: WritingDirection) -> Result<WritingDirection, JsValue> {
    match text {
        Some(text) => text
            .parse()
            .map_err(|e: crate::Error| JsValue::from_str(&e.to_string())),
        None => Ok(default),
    }
}

/// Flip a stylesheet.
///
/// Missing directions default to `lr-tb` → `rl-tb`. An unparseable
/// direction is reported as a JavaScript error.
#[wasm_bindgen]
pub fn flip_css(
    css: &str,
    dir_in_url: bool,
    edge_in_url: bool,
    source_dir: Option<String>,
    target_dir: Option<String>,
) -> Result<String, JsValue> {
    let defaults = Options::default();
    let options = Options::default()
        .with_dir_in_url(dir_in_url)
        .with_edge_in_url(edge_in_url)
        .with_source_dir(direction(source_dir, defaults.source_dir)?)
        .with_target_dir(direction(target_dir, defaults.target_dir)?);
    Ok(crate::transform(css, &options))
}
