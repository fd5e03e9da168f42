use crate::input::{key_action, KeyAction};
use crate::overlay;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    paused: &Rc<Cell<bool>>,
    canvas: &web::HtmlCanvasElement,
) {
    // keys typed into panel inputs belong to the inputs
    if let Some(target) = ev.target() {
        if target.dyn_ref::<web::HtmlInputElement>().is_some()
            || target.dyn_ref::<web::HtmlSelectElement>().is_some()
        {
            return;
        }
    }
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::ToggleUi => {
            if let Some(doc) = crate::dom::window_document() {
                overlay::toggle_ui(&doc);
            }
        }
        KeyAction::TogglePause => {
            paused.set(!paused.get());
            log::info!("[frame] {}", if paused.get() { "paused" } else { "resumed" });
            ev.prevent_default();
        }
        KeyAction::ToggleFullscreen => {
            if let Some(doc) = crate::dom::window_document() {
                if doc.fullscreen_element().is_some() {
                    doc.exit_fullscreen();
                } else {
                    _ = canvas.request_fullscreen();
                }
            }
            ev.prevent_default();
        }
        KeyAction::ExitFullscreen => {
            if let Some(doc) = crate::dom::window_document() {
                doc.exit_fullscreen();
            }
        }
    }
}

pub fn wire_global_keydown(paused: Rc<Cell<bool>>, canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &paused, &canvas);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
