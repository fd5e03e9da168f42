// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn drag_accumulates_until_taken() {
    let mut d = DragState::default();
    d.begin(1, Vec2::new(10.0, 10.0));
    d.move_to(1, Vec2::new(15.0, 12.0));
    d.move_to(1, Vec2::new(20.0, 9.0));
    assert_eq!(d.take(), Vec2::new(10.0, -1.0));
    // taken deltas are not reported twice
    assert_eq!(d.take(), Vec2::ZERO);
}

#[test]
fn other_pointers_are_ignored() {
    let mut d = DragState::default();
    d.begin(1, Vec2::ZERO);
    d.move_to(2, Vec2::new(50.0, 50.0));
    assert_eq!(d.take(), Vec2::ZERO);
    d.end(2);
    assert!(d.active);
}

#[test]
fn moves_after_release_do_nothing() {
    let mut d = DragState::default();
    d.begin(3, Vec2::ZERO);
    d.move_to(3, Vec2::new(4.0, 0.0));
    d.end(3);
    d.move_to(3, Vec2::new(100.0, 0.0));
    assert!(!d.active);
    assert_eq!(d.take(), Vec2::new(4.0, 0.0));
}

#[test]
fn hover_without_press_is_not_a_drag() {
    let mut d = DragState::default();
    d.move_to(0, Vec2::new(30.0, 30.0));
    assert_eq!(d.take(), Vec2::ZERO);
}

#[test]
fn css_positions_scale_to_backing_pixels() {
    // 2x device pixel ratio
    let p = css_to_canvas_px(
        Vec2::new(100.0, 50.0),
        Vec2::new(400.0, 300.0),
        Vec2::new(800.0, 600.0),
    );
    assert_eq!(p, Vec2::new(200.0, 100.0));
}

#[test]
fn zero_sized_canvas_maps_to_origin() {
    let p = css_to_canvas_px(Vec2::new(5.0, 5.0), Vec2::ZERO, Vec2::new(800.0, 600.0));
    assert_eq!(p, Vec2::ZERO);
}

#[test]
fn global_keys_map_to_actions() {
    assert_eq!(key_action("h"), Some(KeyAction::ToggleUi));
    assert_eq!(key_action("H"), Some(KeyAction::ToggleUi));
    assert_eq!(key_action(" "), Some(KeyAction::TogglePause));
    assert_eq!(key_action("Enter"), Some(KeyAction::ToggleFullscreen));
    assert_eq!(key_action("Escape"), Some(KeyAction::ExitFullscreen));
    assert_eq!(key_action("x"), None);
}
