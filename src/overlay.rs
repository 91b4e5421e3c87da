use crate::constants::{DODGE_MARGIN, LOADING_ID, NO_BUTTON_ID, QUESTION_OVERLAY_ID};
use crate::controls::dodge_position;
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    dom::set_visible(document, QUESTION_OVERLAY_ID, true);
}

#[inline]
pub fn hide(document: &web::Document) {
    dom::set_visible(document, QUESTION_OVERLAY_ID, false);
}

/// `Some(text)` shows the loading line, `None` hides it.
pub fn set_loading(document: &web::Document, text: Option<&str>) {
    match text {
        Some(t) => {
            dom::set_text(document, LOADING_ID, t);
            dom::set_visible(document, LOADING_ID, true);
        }
        None => dom::set_visible(document, LOADING_ID, false),
    }
}

/// Jump the "no" button somewhere else on screen.
pub fn dodge_no_button(document: &web::Document) {
    let Some(el) = document.get_element_by_id(NO_BUTTON_ID) else {
        return;
    };
    let Ok(button) = el.dyn_into::<web::HtmlElement>() else {
        return;
    };
    let (x, y) = dodge_position(js_sys::Math::random(), js_sys::Math::random(), DODGE_MARGIN);
    let style = button.style();
    _ = style.set_property("position", "fixed");
    _ = style.set_property("left", &format!("{:.1}%", x));
    _ = style.set_property("top", &format!("{:.1}%", y));
    _ = style.set_property("transform", "translate(-50%, -50%)");
    log::debug!("[overlay] no -> ({:.1}%, {:.1}%)", x, y);
}
