#![cfg(target_arch = "wasm32")]
use halftone_core::{default_patterns, App, FieldParams};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod canvas;
mod constants;
mod dom;
mod events;
mod frame;
mod hint;
mod overlay;

use constants::{CANVAS_ID, FULLSCREEN_BUTTON_ID};

fn wire_canvas_resize(ctx: &Rc<RefCell<frame::FrameContext>>) {
    let ctx_resize = ctx.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        ctx_resize.borrow_mut().resize();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_fullscreen_button(document: &web::Document, canvas: &web::HtmlCanvasElement) {
    let canvas = canvas.clone();
    dom::add_click_listener(document, FULLSCREEN_BUTTON_ID, move || {
        dom::toggle_fullscreen(&canvas);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("halftone-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let (viewport, dpr) = dom::sync_canvas_backing_size(&canvas)
        .ok_or_else(|| anyhow::anyhow!("cannot size canvas"))?;
    let mut surface = canvas::CanvasSurface::new(&canvas)?;
    surface.set_device_pixel_ratio(dpr);

    let seed: u64 = rand::random();
    let app = App::new(viewport, FieldParams::default(), default_patterns(), seed)?;
    log::info!(
        "[init] {}x{} @{dpr} seed={seed}",
        viewport.width,
        viewport.height
    );

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        canvas: canvas.clone(),
        document: document.clone(),
        surface,
        last_instant: Instant::now(),
        last_hint: String::new(),
    }));
    frame_ctx.borrow_mut().sync_hint_visibility();

    wire_canvas_resize(&frame_ctx);
    wire_fullscreen_button(&document, &canvas);
    events::wire_global_keydown(frame_ctx.clone());
    frame::start_loop(frame_ctx);
    Ok(())
}
