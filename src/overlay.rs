use crate::constants::{HINT_ID, PANEL_ID};
use ascii_core::SourceKind;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, id: &str) -> bool {
    if let Some(el) = document.get_element_by_id(id) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

#[inline]
pub fn toggle(document: &web::Document, id: &str) {
    if is_hidden(document, id) {
        show(document, id);
    } else {
        hide(document, id);
    }
}

/// Toggle both the control panel and the hint line.
pub fn toggle_ui(document: &web::Document) {
    toggle(document, PANEL_ID);
    toggle(document, HINT_ID);
}

/// Update the hint overlay with the current source and glyph state
pub fn update_hint(
    document: &web::Document,
    source: SourceKind,
    glyph_count: u32,
    gamma: f32,
    paused: bool,
) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        let state = if paused { " • paused" } else { "" };
        let hint_html = format!(
            "<div style='color: #cfe7ff; font: 13px system-ui; background: rgba(10, 14, 24, 0.8); padding: 8px 12px; border-radius: 6px; border: 1px solid rgba(80, 110, 150, 0.35);'>Source: {} • Glyphs: {} • Gamma: {:.1}{}</div>",
            source, glyph_count, gamma, state
        );
        el.set_inner_html(&hint_html);
    }
}
