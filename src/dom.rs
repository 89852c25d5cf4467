use halftone_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::MIN_DEVICE_PIXEL_RATIO;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] #{element_id} not found; click handler not wired");
    }
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
///
/// Returns the CSS-pixel viewport (what scenes lay out in) and the ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Option<(Viewport, f64)> {
    let window = web::window()?;
    let dpr = window.device_pixel_ratio().max(MIN_DEVICE_PIXEL_RATIO);
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
    Some((Viewport::new(rect.width() as f32, rect.height() as f32), dpr))
}

pub fn toggle_fullscreen(canvas: &web::HtmlCanvasElement) {
    if let Some(doc) = window_document() {
        if doc.fullscreen_element().is_some() {
            doc.exit_fullscreen();
        } else if let Err(e) = canvas.request_fullscreen() {
            log::warn!("[dom] fullscreen request failed: {:?}", e);
        }
    }
}

pub fn exit_fullscreen() {
    if let Some(doc) = window_document() {
        if doc.fullscreen_element().is_some() {
            doc.exit_fullscreen();
        }
    }
}
