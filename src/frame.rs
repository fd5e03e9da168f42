use crate::constants::MAX_FRAME_DT_SEC;
use crate::input;
use crate::media::MediaSource;
use crate::overlay;
use crate::panel;
use crate::render::{self, SourceBinding, WaveFrame};
use ascii_core::{
    AppConfig, GlyphSet, OrbitCamera, ParamEffect, ParamEvent, ParamReceiver, ParamSender,
    ParamStore, SourceKind, WaveMesh, WaveUniforms,
};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub gpu: render::GpuState<'a>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,

    pub store: ParamStore,
    pub rx: ParamReceiver,
    pub tx: ParamSender,

    pub main_camera: OrbitCamera,
    pub wave_camera: OrbitCamera,
    pub drag: Rc<RefCell<input::DragState>>,
    pub paused: Rc<Cell<bool>>,

    pub mesh: WaveMesh,
    pub media: Option<MediaSource>,

    pub last_instant: Instant,
    pub wave_time: f32,
    pub hint_paused: bool,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        gpu: render::GpuState<'a>,
        canvas: web::HtmlCanvasElement,
        document: web::Document,
        config: &AppConfig,
        channel: (ParamSender, ParamReceiver),
        mesh: WaveMesh,
    ) -> Self {
        let (tx, rx) = channel;
        let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
        let mut store = ParamStore::from_config(config);
        store.apply(ParamEvent::Viewport {
            width: canvas.width(),
            height: canvas.height(),
        });
        Self {
            gpu,
            canvas,
            document,
            store,
            rx,
            tx,
            main_camera: OrbitCamera::new(ascii_core::Camera::looking_at_origin(
                ascii_core::MAIN_CAMERA_Z,
                aspect,
                ascii_core::MAIN_CAMERA_FAR,
            )),
            wave_camera: OrbitCamera::new(ascii_core::Camera::looking_at_origin(
                ascii_core::WAVE_CAMERA_Z,
                aspect,
                ascii_core::WAVE_CAMERA_FAR,
            )),
            drag: Rc::new(RefCell::new(input::DragState::default())),
            paused: Rc::new(Cell::new(false)),
            mesh,
            media: None,
            last_instant: Instant::now(),
            wave_time: 0.0,
            hint_paused: false,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let paused = self.paused.get();
        if paused != self.hint_paused {
            self.hint_paused = paused;
            self.refresh_hint();
        }
        if paused {
            return;
        }

        self.sync_viewport();
        for effect in self.store.drain(&self.rx) {
            self.apply_effect(effect);
        }

        let drag = self.drag.borrow_mut().take();
        let height = self.canvas.height() as f32;
        for cam in [&mut self.main_camera, &mut self.wave_camera] {
            if drag != glam::Vec2::ZERO {
                cam.drag(drag.x, drag.y, height);
            }
            cam.update(dt_sec);
        }

        if let Some(media) = &mut self.media {
            if let Some((source, w, h)) = media.take_frame() {
                self.gpu.upload_media(source, w, h);
            }
        }

        let wave_active = self.gpu.source() == SourceBinding::Wave;
        if wave_active {
            self.wave_time += dt_sec;
            self.mesh.update(self.wave_time, &self.store.wave);
        }
        let wave = if wave_active {
            Some(WaveFrame {
                uniforms: WaveUniforms::new(self.wave_camera.camera.view_proj()),
                vertices: &self.mesh.vertices,
            })
        } else {
            None
        };
        let uniforms = self.store.ascii_uniforms(self.main_camera.camera.view_proj());

        match self.gpu.render(&uniforms, wave) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::info!("[gpu] surface lost; reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

impl<'a> FrameContext<'a> {
    fn sync_viewport(&mut self) {
        let w = self.canvas.width();
        let h = self.canvas.height();
        if w == 0 || h == 0 {
            return;
        }
        self.gpu.resize_if_needed(w, h);
        let aspect = w as f32 / h as f32;
        if (aspect - self.store.viewport_aspect()).abs() > f32::EPSILON {
            self.store.apply(ParamEvent::Viewport {
                width: w,
                height: h,
            });
            self.main_camera.set_aspect(aspect);
            self.wave_camera.set_aspect(aspect);
        }
    }

    fn apply_effect(&mut self, effect: ParamEffect) {
        let refresh = effect.refreshes_hint();
        match effect {
            ParamEffect::None | ParamEffect::Uniforms => {}
            ParamEffect::RebuildAtlas { glyphs, previous } => {
                self.rebuild_atlas(&glyphs, previous)
            }
            ParamEffect::SwitchSource { kind, url } => self.switch_source(kind, url),
            ParamEffect::RestoreSource(kind) => panel::sync_source(&self.document, kind),
        }
        if refresh {
            self.refresh_hint();
        }
    }

    /// The store keeps the glyphs of the atlas that ends up installed, so
    /// `length` always matches the strip the shader samples.
    fn rebuild_atlas(&mut self, glyphs: &GlyphSet, previous: GlyphSet) {
        match crate::atlas::build(&self.document, glyphs, self.gpu.max_texture_width()) {
            Ok((drawn, image)) => {
                self.gpu.install_atlas(&image);
                self.store.adopt_glyphs(drawn);
            }
            Err(e) => {
                log::error!("[atlas] rebuild failed: {:?}", e);
                self.store.adopt_glyphs(previous);
            }
        }
        panel::update_char_index_range(&self.document, self.store.length(), self.store.char_index);
        panel::sync_glyphs(&self.document, &self.store.glyphs.as_string());
    }

    fn switch_source(&mut self, kind: SourceKind, url: Option<String>) {
        let reuse = matches!((&self.media, &url), (Some(m), Some(u)) if m.url() == u);
        if !reuse {
            if let Some(old) = self.media.take() {
                old.release();
                self.gpu.release_media();
            }
        }
        match (kind, url) {
            (SourceKind::Wave, _) => self.gpu.set_source(SourceBinding::Wave),
            (_, Some(url)) => {
                if !reuse {
                    match MediaSource::load(&self.document, kind, &url, &self.tx) {
                        Ok(m) => self.media = Some(m),
                        Err(e) => {
                            log::warn!("[media] {:?}; staying on wave", e);
                            _ = self.tx.send(ParamEvent::Source(SourceKind::Wave));
                            return;
                        }
                    }
                }
                self.gpu.set_source(SourceBinding::Media);
            }
            (_, None) => {
                log::warn!("[media] {kind} selected without a URL");
                return;
            }
        }
        log::info!("[media] source switched to {kind}");
        panel::sync_source(&self.document, kind);
    }

    fn refresh_hint(&self) {
        overlay::update_hint(
            &self.document,
            self.store.source,
            self.store.length(),
            self.store.gamma,
            self.hint_paused,
        );
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
