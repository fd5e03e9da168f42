#![cfg(target_arch = "wasm32")]
use ascii_core::{
    build_instances, quad_vertices, AppConfig, GlyphSet, GridSpec, ParamEvent, SlabSpec,
    SourceKind, WaveMesh, QUAD_SIZE,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod atlas;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod media;
mod overlay;
mod panel;
mod render;

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

fn load_config() -> AppConfig {
    let query = dom::location_query();
    let (config, errors) = AppConfig::from_query(&query);
    for e in errors {
        log::warn!("[config] {e}; keeping default");
    }
    log::info!(
        "[config] rows={} glyphs={} gamma={} source={}",
        config.rows,
        config.glyphs.len(),
        config.gamma,
        config.source
    );
    config
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ascii-web starting");

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

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let mut config = load_config();
    let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
    let grid = GridSpec::for_aspect(config.rows, aspect, QUAD_SIZE);
    let instances = build_instances(&grid, config.seed);
    log::info!("[grid] {}x{} = {} quads", grid.rows, grid.columns, grid.instance_count());
    let mesh = WaveMesh::new(&SlabSpec::default());

    // The device is requested with default limits, so this bounds the atlas width.
    let max_width = wgpu::Limits::default().max_texture_dimension_2d;
    let (glyphs, atlas_image) = atlas::build(&document, &config.glyphs, max_width)
        .or_else(|e| {
            log::warn!("[atlas] {:?}; retrying with default glyphs", e);
            atlas::build(&document, &GlyphSet::default(), max_width)
        })?;
    // The store starts from whatever the atlas really holds.
    config.glyphs = glyphs;

    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let gpu = render::GpuState::new(
        leaked_canvas,
        &quad_vertices(QUAD_SIZE),
        &instances,
        &mesh,
        &atlas_image,
    )
    .await?;

    let channel = ascii_core::param_channel();
    let tx = channel.0.clone();
    let ctx = frame::FrameContext::new(gpu, canvas.clone(), document.clone(), &config, channel, mesh);

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        drag_state: ctx.drag.clone(),
    });
    events::wire_global_keydown(ctx.paused.clone(), canvas.clone());
    panel::build(&document, &ctx.store, &tx)?;
    overlay::update_hint(&document, SourceKind::Wave, ctx.store.length(), ctx.store.gamma, false);

    if config.source != SourceKind::Wave {
        if let Some(url) = config.media_url.clone() {
            _ = tx.send(ParamEvent::Media {
                kind: config.source,
                url,
            });
        }
    }

    frame::start_loop(Rc::new(RefCell::new(ctx)));
    Ok(())
}
