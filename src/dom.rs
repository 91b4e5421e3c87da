use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

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
    match document.get_element_by_id(element_id) {
        Some(el) => {
            let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
            _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        None => log::warn!("[dom] missing #{}", element_id),
    }
}

/// Attach a listener for `event` on any target. The closure lives for the page.
pub fn listen(target: &web::EventTarget, event: &str, mut handler: impl FnMut(web::Event) + 'static) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Read once at startup; later changes to the OS setting are not tracked.
pub fn prefers_reduced_motion(window: &web::Window, query: &str) -> bool {
    match window.match_media(query) {
        Ok(Some(mql)) => mql.matches(),
        _ => false,
    }
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_visible(document: &web::Document, element_id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let cl = el.class_list();
        if visible {
            _ = cl.remove_1("hidden");
            _ = el.set_attribute("style", "");
        } else {
            _ = cl.add_1("hidden");
            _ = el.set_attribute("style", "display:none");
        }
    }
}
