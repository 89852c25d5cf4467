use web_sys as web;

use crate::constants::{HIDDEN_CLASS, HINT_OVERLAY_ID};

#[inline]
pub fn show_hint(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HINT_OVERLAY_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide_hint(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HINT_OVERLAY_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

pub fn set_hint_visible(document: &web::Document, visible: bool) {
    if visible {
        show_hint(document);
    } else {
        hide_hint(document);
    }
}

/// Replace the overlay contents with pre-rendered markup.
pub fn update_hint(document: &web::Document, html: &str) {
    if let Some(el) = document.get_element_by_id(HINT_OVERLAY_ID) {
        el.set_inner_html(html);
    }
}
