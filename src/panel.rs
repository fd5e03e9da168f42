//! Generated control panel. Every input only sends a [`ParamEvent`]; the frame
//! loop decides what the change means for GPU resources.

use crate::constants::{MEDIA_ACCEPT, PANEL_ID};
use crate::dom;
use ascii_core::{
    char_index_control, ControlSpec, ParamEvent, ParamId, ParamSender, ParamStore, Rgb, SourceKind,
    GAMMA_CONTROL, WAVE_CONTROLS,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const CHAR_INDEX_INPUT_ID: &str = "ctl-charIndex";
const SOURCE_SELECT_ID: &str = "ctl-source";
const GLYPHS_INPUT_ID: &str = "ctl-glyphs";

fn control_id(spec: &ControlSpec) -> String {
    format!("ctl-{}", spec.label)
}

/// Build the panel under `#controls`, creating the container when the page lacks one.
pub fn build(document: &web::Document, store: &ParamStore, tx: &ParamSender) -> anyhow::Result<()> {
    let panel = match document.get_element_by_id(PANEL_ID) {
        Some(el) => el,
        None => {
            let el = document
                .create_element("div")
                .map_err(|e| anyhow::anyhow!("create panel: {:?}", e))?;
            el.set_id(PANEL_ID);
            document
                .body()
                .ok_or_else(|| anyhow::anyhow!("document has no body"))?
                .append_child(&el)
                .map_err(|e| anyhow::anyhow!("append panel: {:?}", e))?;
            el
        }
    };
    panel.set_inner_html("");

    add_range(document, &panel, &GAMMA_CONTROL, store.gamma, tx)?;
    add_range(
        document,
        &panel,
        &char_index_control(store.length()),
        store.char_index as f32,
        tx,
    )?;
    for i in 0..ascii_core::PALETTE_SIZE {
        let color = store.palette.get(i).unwrap_or(Rgb::WHITE);
        add_color(document, &panel, i, color, tx)?;
    }

    let wave = append(document, &panel, "fieldset")?;
    let legend = append(document, &wave, "legend")?;
    legend.set_text_content(Some("wave"));
    for spec in &WAVE_CONTROLS {
        add_range(document, &wave, spec, store.get(spec.id), tx)?;
    }

    add_glyphs(document, &panel, &store.glyphs.as_string(), tx)?;
    add_source_select(document, &panel, store.source, tx)?;
    add_file_picker(document, &panel, tx)?;
    log::info!("[panel] controls ready");
    Ok(())
}

/// Keep the char index slider in step with the glyph count.
pub fn update_char_index_range(document: &web::Document, length: u32, value: u32) {
    let spec = char_index_control(length);
    if let Some(input) = document
        .get_element_by_id(CHAR_INDEX_INPUT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        input.set_max(&spec.max.to_string());
        input.set_value(&value.to_string());
    }
}

/// Reflect the active source after the frame accepted or rejected a switch.
pub fn sync_source(document: &web::Document, kind: SourceKind) {
    if let Some(select) = document
        .get_element_by_id(SOURCE_SELECT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlSelectElement>().ok())
    {
        select.set_value(kind.as_str());
    }
}

pub fn sync_glyphs(document: &web::Document, glyphs: &str) {
    if let Some(input) = document
        .get_element_by_id(GLYPHS_INPUT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        input.set_value(glyphs);
    }
}

fn append(document: &web::Document, parent: &web::Element, tag: &str) -> anyhow::Result<web::Element> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{tag}>: {:?}", e))?;
    parent
        .append_child(&el)
        .map_err(|e| anyhow::anyhow!("append <{tag}>: {:?}", e))?;
    Ok(el)
}

fn labelled(document: &web::Document, parent: &web::Element, text: &str) -> anyhow::Result<web::Element> {
    let label = append(document, parent, "label")?;
    _ = label.set_attribute("style", "display:block");
    let span = append(document, &label, "span")?;
    span.set_text_content(Some(text));
    Ok(label)
}

fn input(document: &web::Document, parent: &web::Element, ty: &str) -> anyhow::Result<web::HtmlInputElement> {
    let input: web::HtmlInputElement = dom::create(document, "input")?;
    input.set_type(ty);
    parent
        .append_child(&input)
        .map_err(|e| anyhow::anyhow!("append input: {:?}", e))?;
    Ok(input)
}

fn add_range(
    document: &web::Document,
    parent: &web::Element,
    spec: &ControlSpec,
    value: f32,
    tx: &ParamSender,
) -> anyhow::Result<()> {
    let label = labelled(document, parent, spec.label)?;
    let el = input(document, &label, "range")?;
    el.set_id(&control_id(spec));
    el.set_min(&spec.min.to_string());
    el.set_max(&spec.max.to_string());
    el.set_step(&spec.step.to_string());
    el.set_value(&value.to_string());

    let id = spec.id;
    let tx = tx.clone();
    let target = el.clone();
    dom::add_event_listener(&el, "input", move |_| match target.value().parse::<f32>() {
        Ok(v) => {
            _ = tx.send(ParamEvent::Set(id, v));
        }
        Err(_) => log::warn!("[panel] {:?}: unreadable value {:?}", id, target.value()),
    });
    Ok(())
}

fn add_color(
    document: &web::Document,
    parent: &web::Element,
    index: usize,
    color: Rgb,
    tx: &ParamSender,
) -> anyhow::Result<()> {
    let label = labelled(document, parent, &format!("color{}", index + 1))?;
    let el = input(document, &label, "color")?;
    el.set_value(&color.to_hex());

    let tx = tx.clone();
    let target = el.clone();
    dom::add_event_listener(&el, "input", move |_| match target.value().parse::<Rgb>() {
        Ok(c) => {
            _ = tx.send(ParamEvent::Color(index, c));
        }
        Err(e) => log::warn!("[panel] color{}: {e}", index + 1),
    });
    Ok(())
}

fn add_glyphs(
    document: &web::Document,
    parent: &web::Element,
    glyphs: &str,
    tx: &ParamSender,
) -> anyhow::Result<()> {
    let label = labelled(document, parent, "glyphs")?;
    let el = input(document, &label, "text")?;
    el.set_id(GLYPHS_INPUT_ID);
    el.set_value(glyphs);

    let tx = tx.clone();
    let target = el.clone();
    dom::add_event_listener(&el, "change", move |_| {
        _ = tx.send(ParamEvent::Glyphs(target.value()));
    });
    Ok(())
}

fn add_source_select(
    document: &web::Document,
    parent: &web::Element,
    current: SourceKind,
    tx: &ParamSender,
) -> anyhow::Result<()> {
    let label = labelled(document, parent, "source")?;
    let select: web::HtmlSelectElement = dom::create(document, "select")?;
    select.set_id(SOURCE_SELECT_ID);
    for kind in SourceKind::ALL {
        let opt: web::HtmlOptionElement = dom::create(document, "option")?;
        opt.set_value(kind.as_str());
        opt.set_text(kind.as_str());
        select
            .append_child(&opt)
            .map_err(|e| anyhow::anyhow!("append option: {:?}", e))?;
    }
    label
        .append_child(&select)
        .map_err(|e| anyhow::anyhow!("append select: {:?}", e))?;
    select.set_value(current.as_str());

    let tx = tx.clone();
    let target = select.clone();
    dom::add_event_listener(&select, "change", move |_| match target.value().parse::<SourceKind>() {
        Ok(kind) => {
            _ = tx.send(ParamEvent::Source(kind));
        }
        Err(e) => log::warn!("[panel] {e}"),
    });
    Ok(())
}

fn add_file_picker(document: &web::Document, parent: &web::Element, tx: &ParamSender) -> anyhow::Result<()> {
    let label = labelled(document, parent, "media file")?;
    let el = input(document, &label, "file")?;
    el.set_accept(MEDIA_ACCEPT);

    // object URL handed out last; revoked when the next file replaces it
    let last_url: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let tx = tx.clone();
    let target = el.clone();
    dom::add_event_listener(&el, "change", move |_| {
        let Some(file) = target.files().and_then(|files| files.get(0)) else {
            return;
        };
        let url = match web::Url::create_object_url_with_blob(&file) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("[panel] cannot open {}: {:?}", file.name(), e);
                return;
            }
        };
        if let Some(prev) = last_url.borrow_mut().replace(url.clone()) {
            _ = web::Url::revoke_object_url(&prev);
        }
        let kind = SourceKind::for_mime(&file.type_(), &file.name());
        log::info!("[panel] picked {} as {kind}", file.name());
        _ = tx.send(ParamEvent::Media { kind, url });
    });
    Ok(())
}
