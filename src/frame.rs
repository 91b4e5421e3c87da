use crate::audio::HeartAudio;
use crate::constants::{CAMERA_FOVY_DEG, CAMERA_Z, CLEAR_COLOR, HEART_TINT, THUMP_VELOCITY};
use crate::controls::KeyAction;
use crate::render::{self, FrameUniforms, SceneGeometry};
use heart_core::{Camera, FrameOutcome, HeartScene, LifecycleState};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: HeartScene,
    pub gpu: Option<render::GpuState<'a>>,
    pub audio: Option<HeartAudio>,
    pub canvas: web::HtmlCanvasElement,
    pub camera: Camera,

    started: Instant,
    user_paused: bool,
    hidden: bool,
    last_cycle: u64,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        scene: HeartScene,
        gpu: Option<render::GpuState<'a>>,
        audio: Option<HeartAudio>,
        canvas: web::HtmlCanvasElement,
    ) -> Self {
        let last_cycle = scene.beat_cycles();
        Self {
            scene,
            gpu,
            audio,
            canvas,
            camera: Camera::looking_at_origin(CAMERA_Z, CAMERA_FOVY_DEG),
            started: Instant::now(),
            user_paused: false,
            hidden: false,
            last_cycle,
        }
    }

    pub fn frame(&mut self) {
        let now_sec = self.started.elapsed().as_secs_f64();
        if self.scene.frame(now_sec) != FrameOutcome::Rendered {
            return;
        }

        let cycles = self.scene.beat_cycles();
        if cycles != self.last_cycle {
            self.last_cycle = cycles;
            if let Some(a) = &self.audio {
                a.thump(THUMP_VELOCITY);
            }
        }

        if let Some(g) = &mut self.gpu {
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            self.camera.set_viewport(w, h);
            if self.scene.take_mesh_dirty() {
                g.upload_mesh(self.scene.live_vertex_bytes());
            }
            g.upload_sparks(self.scene.spark_positions(), self.scene.spark_colors());
            let uniforms = FrameUniforms::new(
                self.camera.view_projection(),
                self.scene.model_matrix(),
                HEART_TINT,
                self.scene.beat(),
                self.scene.time_sec() as f32,
            );
            if let Err(e) = g.render(&uniforms) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.scene.state() == LifecycleState::Disposed
    }

    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::TogglePause => {
                self.user_paused = !self.user_paused;
                self.sync_pause();
                log::info!("[keys] paused={}", self.user_paused);
            }
            KeyAction::ToggleMute => {
                if let Some(a) = &mut self.audio {
                    let muted = a.toggle_mute();
                    log::info!("[keys] muted={}", muted);
                }
            }
        }
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.sync_pause();
    }

    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        if let Err(e) = self.scene.dispose() {
            log::warn!("[scene] dispose: {}", e);
        }
        if let Some(a) = &self.audio {
            a.suspend();
        }
        self.gpu = None;
        log::info!("[scene] disposed");
    }

    fn sync_pause(&mut self) {
        if self.is_disposed() {
            return;
        }
        let paused = self.user_paused || self.hidden;
        let res = if paused {
            self.scene.pause()
        } else {
            self.scene.resume()
        };
        if let Err(e) = res {
            log::warn!("[scene] {}", e);
        }
        if let Some(a) = &self.audio {
            if paused {
                a.suspend();
            } else {
                a.resume();
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &HeartScene,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    // never reclaimed, not even by dispose; acceptable with one canvas per page load
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let geometry = SceneGeometry {
        vertex_bytes: scene.live_vertex_bytes(),
        indices: scene.indices(),
        spark_capacity_points: scene.spark_capacity_points(),
    };
    match render::GpuState::new(leaked_canvas, geometry, CLEAR_COLOR).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        {
            let mut ctx = frame_ctx.borrow_mut();
            if ctx.is_disposed() {
                log::info!("[frame] loop stopped");
                return;
            }
            ctx.frame();
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &TickClosure) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
