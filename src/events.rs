use crate::controls::action_for_key;
use crate::frame::FrameContext;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

type SharedFrame = Rc<RefCell<FrameContext<'static>>>;

/// Space toggles pause, `m` toggles the heartbeat sound.
pub fn wire_global_keydown(frame_ctx: SharedFrame) {
    let Some(window) = web::window() else {
        return;
    };
    dom::listen(&window, "keydown", move |ev: web::Event| {
        let Ok(ev) = ev.dyn_into::<web::KeyboardEvent>() else {
            return;
        };
        if ev.repeat() {
            return;
        }
        if let Some(action) = action_for_key(&ev.key()) {
            ev.prevent_default();
            frame_ctx.borrow_mut().apply(action);
        }
    });
}

/// Pause while the tab is hidden; resume when it is shown again.
pub fn wire_visibility(document: &web::Document, frame_ctx: SharedFrame) {
    let doc = document.clone();
    dom::listen(document, "visibilitychange", move |_| {
        let hidden = doc.hidden();
        log::debug!("[events] visibility hidden={}", hidden);
        frame_ctx.borrow_mut().set_hidden(hidden);
    });
}

/// Release the scene when the page is being torn down.
pub fn wire_pagehide(frame_ctx: SharedFrame) {
    let Some(window) = web::window() else {
        return;
    };
    dom::listen(&window, "pagehide", move |_| {
        frame_ctx.borrow_mut().dispose();
    });
}
