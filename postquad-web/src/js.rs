use std::time::Duration;

use js_sys::wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement};

use crate::error::Error;

pub(crate) fn document() -> Result<Document, Error> {
    web_sys::window()
        .ok_or(Error::window_not_found())
        .and_then(|w| w.document().ok_or(Error::document_not_found()))
}

pub(crate) fn get_canvas_by_id(canvas_id: &str) -> Result<HtmlCanvasElement, Error> {
    let document = document()?;
    document
        .query_selector(canvas_id)
        .map_err(|_| Error::canvas_not_found(canvas_id))?
        .ok_or(Error::canvas_not_found(canvas_id))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| Error::canvas_not_found(canvas_id))
}

pub(crate) fn get_webgl2_context(
    canvas: &HtmlCanvasElement,
) -> Result<web_sys::WebGl2RenderingContext, Error> {
    canvas
        .get_context("webgl2")
        .map_err(|_| Error::canvas_context_failed())?
        .ok_or(Error::webgl_context_failed())?
        .dyn_into::<web_sys::WebGl2RenderingContext>()
        .map_err(|_| Error::webgl_context_failed())
}

/// Creates a glow context from the WebGL2 context of the given canvas.
#[cfg(target_arch = "wasm32")]
pub(crate) fn create_glow_context(canvas: &HtmlCanvasElement) -> Result<glow::Context, Error> {
    let webgl2_ctx = get_webgl2_context(canvas)?;
    Ok(glow::Context::from_webgl2_context(webgl2_ctx))
}

/// Native hosts have no WebGL2; only checked so clippy runs on the host.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn create_glow_context(canvas: &HtmlCanvasElement) -> Result<glow::Context, Error> {
    get_webgl2_context(canvas)?;
    Err(Error::webgl_context_failed())
}

/// Shows a blocking message box. Used only for failures the page cannot
/// recover from.
pub(crate) fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Milliseconds on the page's monotonic clock, or 0 when unavailable.
pub(crate) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

/// Time between two `performance.now()` readings; clock skew clamps to zero.
pub(crate) fn elapsed_between(start_ms: f64, now_ms: f64) -> Duration {
    Duration::from_secs_f64(((now_ms - start_ms) / 1000.0).max(0.0))
}
