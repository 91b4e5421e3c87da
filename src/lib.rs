#![cfg(target_arch = "wasm32")]
use heart_core::{HeartConfig, HeartScene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod asset;
mod audio;
mod constants;
mod controls;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod shaders;

use constants::*;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("heart-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    wire_canvas_resize(&canvas);

    let reduced_motion = dom::prefers_reduced_motion(&window, REDUCED_MOTION_QUERY);
    log::info!("[init] reduced_motion={}", reduced_motion);

    overlay::show(&document);
    overlay::set_loading(&document, None);

    dom::add_click_listener(&document, NO_BUTTON_ID, || {
        if let Some(doc) = dom::window_document() {
            overlay::dodge_no_button(&doc);
        }
    });
    if let Some(no) = document.get_element_by_id(NO_BUTTON_ID) {
        dom::listen(&no, "pointerenter", |_| {
            if let Some(doc) = dom::window_document() {
                overlay::dodge_no_button(&doc);
            }
        });
    }

    static STARTED: AtomicBool = AtomicBool::new(false);
    dom::add_click_listener(&document, YES_BUTTON_ID, move || {
        if STARTED.swap(true, Ordering::SeqCst) {
            return;
        }
        // the AudioContext has to be created inside the gesture
        let audio = match audio::HeartAudio::new() {
            Ok(a) => Some(a),
            Err(e) => {
                log::warn!("[audio] disabled: {:?}", e);
                None
            }
        };
        let canvas = canvas.clone();
        spawn_local(async move {
            if let Err(e) = launch(canvas, audio, reduced_motion).await {
                log::error!("launch error: {:?}", e);
                if let Some(doc) = dom::window_document() {
                    overlay::set_loading(&doc, Some(LOAD_FAILED_TEXT));
                }
            }
        });
    });

    Ok(())
}

async fn launch(
    canvas: web::HtmlCanvasElement,
    audio: Option<audio::HeartAudio>,
    reduced_motion: bool,
) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    overlay::hide(&document);
    overlay::set_loading(&document, Some(LOADING_TEXT));

    let mesh = asset::load_heart_mesh(HEART_MESH_URL).await?;
    let config = HeartConfig::default().with_reduced_motion(reduced_motion);
    let mut rng = StdRng::from_entropy();
    let mut scene = HeartScene::build(config, mesh, &mut rng)?;

    let gpu = frame::init_gpu(&canvas, &scene).await;
    overlay::set_loading(&document, None);
    if let Some(a) = &audio {
        a.resume();
    }
    scene.start()?;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        scene, gpu, audio, canvas,
    )));
    events::wire_global_keydown(frame_ctx.clone());
    events::wire_visibility(&document, frame_ctx.clone());
    events::wire_pagehide(frame_ctx.clone());
    if document.hidden() {
        frame_ctx.borrow_mut().set_hidden(true);
    }
    frame::start_loop(frame_ctx);
    Ok(())
}
