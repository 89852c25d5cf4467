use halftone_core::App;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::canvas::CanvasSurface;
use crate::{dom, hint, overlay};

pub struct FrameContext {
    pub app: App,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub surface: CanvasSurface,
    pub last_instant: Instant,
    pub last_hint: String,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        self.app.tick(dt.as_secs_f64());
        self.app.draw(&mut self.surface);
        if self.app.hint_visible() {
            self.refresh_hint();
        }
    }

    pub fn resize(&mut self) {
        if let Some((viewport, dpr)) = dom::sync_canvas_backing_size(&self.canvas) {
            self.surface.set_device_pixel_ratio(dpr);
            self.app.resize(viewport);
        }
    }

    pub fn sync_hint_visibility(&mut self) {
        overlay::set_hint_visible(&self.document, self.app.hint_visible());
        if self.app.hint_visible() {
            self.refresh_hint();
        }
    }

    /// Rewrite the hint overlay when the status line changed.
    pub fn refresh_hint(&mut self) {
        let status = self.app.status_line();
        if status != self.last_hint {
            overlay::update_hint(&self.document, &hint::hint_html(&status));
            self.last_hint = status;
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
