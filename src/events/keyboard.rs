use halftone_core::{command_for_key, Command};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use super::keys::{suppresses_default, touches_hint};
use crate::dom;
use crate::frame::FrameContext;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, ctx: &Rc<RefCell<FrameContext>>) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(command) = command_for_key(&ev.key()) else {
        return;
    };
    let mut ctx = ctx.borrow_mut();
    if !ctx.app.handle(command) {
        match command {
            Command::ToggleFullscreen => dom::toggle_fullscreen(&ctx.canvas),
            Command::ExitFullscreen => dom::exit_fullscreen(),
            _ => {}
        }
    }
    if touches_hint(command) {
        ctx.sync_hint_visibility();
    }
    if suppresses_default(command) {
        ev.prevent_default();
    }
}

pub fn wire_global_keydown(ctx: Rc<RefCell<FrameContext>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &ctx);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
