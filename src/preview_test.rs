#![allow(clippy::float_cmp)]

use super::*;
use crate::surface::{DrawOp, RecordingSurface};

fn hovering_state(x: i32, y: i32) -> WidgetState {
    let mut state = WidgetState::default();
    state.hover.active = true;
    state.hover.x = x;
    state.hover.y = y;
    state
}

fn texts(ops: &[DrawOp]) -> Vec<String> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::FillText { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

// =============================================================
// preview
// =============================================================

#[test]
fn inactive_hover_has_no_preview() {
    assert_eq!(preview(&WidgetState::default(), 100), None);
}

#[test]
fn active_hover_places_box_at_hover_point() {
    let p = preview(&hovering_state(60, 70), 100).unwrap();
    assert_eq!(p.rect, Rect::new(60, 70, 100, 100));
    assert_eq!(p.digits.as_str(), "00");
    assert_eq!(p.fill_color, "#000");
}

#[test]
fn preview_uses_requested_size() {
    let p = preview(&hovering_state(0, 0), 40).unwrap();
    assert_eq!((p.rect.width, p.rect.height), (40, 40));
}

#[test]
fn inactive_hover_ignores_stale_coordinates() {
    let mut state = hovering_state(5, 5);
    state.hover.active = false;
    assert_eq!(preview(&state, 100), None);
}

// =============================================================
// attach
// =============================================================

#[test]
fn attach_sizes_and_hides_overlay() {
    let mut store = Store::default();
    let overlay = RecordingSurface::new();
    attach(&mut store, overlay.clone()).unwrap();

    assert_eq!(overlay.size(), (100, 100));
    assert_eq!(overlay.ops(), vec![DrawOp::Resize { width: 100, height: 100 }, DrawOp::Hide]);
    assert!(!overlay.is_visible());
}

#[test]
fn hover_shows_overlay_at_offset_and_draws() {
    let mut store = Store::default();
    let overlay = RecordingSurface::new();
    attach(&mut store, overlay.clone()).unwrap();
    overlay.take_ops();

    store.set_hover(Point::new(50, 60));
    let ops = overlay.ops();
    assert_eq!(ops[0], DrawOp::Show { x: 60, y: 70 });
    assert!(overlay.is_visible());
    // Drawn in overlay-local space.
    assert_eq!(ops[2], DrawOp::FillRect { x: 0.0, y: 0.0, width: 100.0, height: 100.0 });
    assert_eq!(texts(&ops), vec!["00".to_owned()]);
}

#[test]
fn leaving_hides_without_redrawing() {
    let mut store = Store::default();
    let overlay = RecordingSurface::new();
    attach(&mut store, overlay.clone()).unwrap();
    store.set_hover(Point::new(1, 1));
    overlay.take_ops();

    store.clear_hover();
    assert_eq!(overlay.ops(), vec![DrawOp::Hide]);
    assert!(!overlay.is_visible());
}

#[test]
fn color_change_while_hovering_redraws_in_place() {
    let mut store = Store::default();
    let overlay = RecordingSurface::new();
    attach(&mut store, overlay.clone()).unwrap();
    store.set_hover(Point::new(1, 1));
    overlay.take_ops();

    store.set_color("#f00");
    let ops = overlay.ops();
    assert!(!ops.iter().any(|op| matches!(op, DrawOp::Show { .. })));
    assert!(ops.contains(&DrawOp::SetFillStyle("#f00".into())));
    assert_eq!(texts(&ops).len(), 1);
}

#[test]
fn digit_change_while_hovering_redraws_digits() {
    let mut store = Store::default();
    let overlay = RecordingSurface::new();
    attach(&mut store, overlay.clone()).unwrap();
    store.set_hover(Point::new(1, 1));
    overlay.take_ops();

    let mut metrics = RecordingSurface::new();
    store.set_digits("9", &mut metrics).unwrap();
    assert_eq!(texts(&overlay.ops()), vec!["09".to_owned()]);
}

#[test]
fn changes_while_not_hovering_leave_overlay_alone() {
    let mut store = Store::default();
    let overlay = RecordingSurface::new();
    attach(&mut store, overlay.clone()).unwrap();
    overlay.take_ops();

    store.set_color("#0f0");
    store.set_surface_size(700, 300);
    assert!(overlay.ops().is_empty());
}

#[test]
fn attach_while_hovering_shows_immediately() {
    let mut store = Store::default();
    store.set_hover(Point::new(20, 30));
    let overlay = RecordingSurface::new();
    attach(&mut store, overlay.clone()).unwrap();

    assert!(overlay.is_visible());
    assert_eq!(overlay.ops()[1], DrawOp::Show { x: 30, y: 40 });
}

#[test]
fn configured_size_and_offset_are_used() {
    let config = crate::config::WidgetConfig { preview_size: 40, preview_offset: 0, ..Default::default() };
    let mut store = Store::new(config);
    let overlay = RecordingSurface::new();
    attach(&mut store, overlay.clone()).unwrap();
    store.set_hover(Point::new(5, 6));

    assert_eq!(overlay.size(), (40, 40));
    assert!(overlay.ops().contains(&DrawOp::Show { x: 5, y: 6 }));
}
