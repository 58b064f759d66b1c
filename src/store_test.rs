use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::state::PALETTE_OPTIONS;
use crate::surface::{DrawOp, RecordingSurface};

// =============================================================
// Helpers
// =============================================================

/// Records every notification a store sends.
fn record_changes(store: &mut Store) -> Rc<RefCell<Vec<(WidgetState, Change)>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    store.subscribe(move |state, change| sink.borrow_mut().push((state.clone(), change)));
    log
}

/// Surface whose measurements are always `width`.
struct FixedMetrics {
    width: f64,
}

impl Surface for FixedMetrics {
    fn measure_text(&mut self, _text: &str) -> Result<f64, SurfaceError> {
        Ok(self.width)
    }
    fn fill_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {}
    fn set_fill_style(&mut self, _style: &str) {}
    fn set_font(&mut self, _font: &str) {}
    fn fill_text(&mut self, _text: &str, _x: f64, _y: f64) -> Result<(), SurfaceError> {
        Ok(())
    }
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Surface that cannot measure text.
struct BrokenMetrics;

impl Surface for BrokenMetrics {
    fn measure_text(&mut self, _text: &str) -> Result<f64, SurfaceError> {
        Err(SurfaceError::NoContext)
    }
    fn fill_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {}
    fn set_fill_style(&mut self, _style: &str) {}
    fn set_font(&mut self, _font: &str) {}
    fn fill_text(&mut self, _text: &str, _x: f64, _y: f64) -> Result<(), SurfaceError> {
        Ok(())
    }
    fn resize(&mut self, _width: u32, _height: u32) {}
}

// =============================================================
// fit_width
// =============================================================

#[test]
fn fit_width_floors_at_minimum() {
    assert_eq!(fit_width(0.0, 600, 100), 600);
    assert_eq!(fit_width(55.0, 600, 100), 600);
    assert_eq!(fit_width(500.0, 600, 100), 600);
}

#[test]
fn fit_width_grows_past_floor() {
    assert_eq!(fit_width(501.0, 600, 100), 601);
    assert_eq!(fit_width(900.0, 600, 100), 1000);
}

#[test]
fn fit_width_rounds_up_fractional_measurements() {
    assert_eq!(fit_width(700.2, 600, 100), 801);
}

#[test]
fn fit_width_is_non_decreasing() {
    let mut last = 0;
    for w in 0..2000 {
        let fitted = fit_width(f64::from(w) * 0.75, 600, 100);
        assert!(fitted >= last);
        assert!(fitted >= 600);
        last = fitted;
    }
}

#[test]
fn fit_width_handles_non_finite() {
    assert_eq!(fit_width(f64::NAN, 600, 100), 600);
    assert_eq!(fit_width(f64::NEG_INFINITY, 600, 100), 600);
    assert_eq!(fit_width(f64::INFINITY, 600, 100), u32::MAX);
}

// =============================================================
// Change
// =============================================================

#[test]
fn change_default_is_empty() {
    assert!(Change::default().is_empty());
    assert!(!Change::default().needs_repaint());
}

#[test]
fn hover_change_does_not_need_repaint() {
    let change = Change { hover: true, ..Change::default() };
    assert!(!change.is_empty());
    assert!(!change.needs_repaint());
    assert!(change.affects_preview());
}

#[test]
fn render_fields_need_repaint() {
    for change in [
        Change { digits: true, ..Change::default() },
        Change { fill_color: true, ..Change::default() },
        Change { palette: true, ..Change::default() },
        Change { surface_size: true, ..Change::default() },
    ] {
        assert!(change.needs_repaint(), "{change:?}");
    }
}

// =============================================================
// set_digits
// =============================================================

#[test]
fn set_digits_pads_single_digit() {
    let mut store = Store::default();
    let mut metrics = RecordingSurface::new();
    let change = store.set_digits("7", &mut metrics).unwrap();
    assert_eq!(store.state().digits.as_str(), "07");
    assert!(change.digits);
}

#[test]
fn set_digits_empty_becomes_double_zero() {
    let mut store = Store::default();
    let mut metrics = RecordingSurface::new();
    store.set_digits("42", &mut metrics).unwrap();
    store.set_digits("", &mut metrics).unwrap();
    assert_eq!(store.state().digits.as_str(), "00");
}

#[test]
fn set_digits_rejects_non_digits() {
    let mut store = Store::default();
    let mut metrics = RecordingSurface::new();
    store.set_digits("42", &mut metrics).unwrap();
    let log = record_changes(&mut store);
    for raw in ["abc", "123", "4a", " 1"] {
        let change = store.set_digits(raw, &mut metrics).unwrap();
        assert!(change.is_empty(), "input {raw:?}");
        assert_eq!(store.state().digits.as_str(), "42");
    }
    assert!(log.borrow().is_empty());
}

#[test]
fn rejected_digits_do_not_touch_the_surface() {
    let mut store = Store::default();
    let mut metrics = RecordingSurface::new();
    store.set_digits("abc", &mut metrics).unwrap();
    assert!(metrics.ops().is_empty());
}

#[test]
fn same_digits_again_is_a_no_op() {
    let mut store = Store::default();
    let mut metrics = RecordingSurface::new();
    store.set_digits("5", &mut metrics).unwrap();
    let log = record_changes(&mut store);
    assert!(store.set_digits("05", &mut metrics).unwrap().is_empty());
    assert!(store.set_digits("5", &mut metrics).unwrap().is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn set_digits_measures_with_the_digit_font() {
    let mut store = Store::default();
    let mut metrics = RecordingSurface::new();
    store.set_digits("12", &mut metrics).unwrap();
    assert_eq!(metrics.ops(), vec![DrawOp::SetFont("bold 50px sans-serif".to_owned())]);
}

#[test]
fn two_digits_stay_at_width_floor() {
    let mut store = Store::default();
    let mut metrics = RecordingSurface::new();
    for raw in ["0", "7", "42", "99", ""] {
        store.set_digits(raw, &mut metrics).unwrap();
        assert_eq!(store.state().surface_width, 600, "input {raw:?}");
    }
}

#[test]
fn wide_digits_grow_the_surface() {
    let mut store = Store::default();
    let change = store.set_digits("88", &mut FixedMetrics { width: 612.4 }).unwrap();
    assert_eq!(store.state().surface_width, 713);
    assert!(change.surface_size);
}

#[test]
fn digits_change_never_touches_height() {
    let mut store = Store::default();
    store.set_surface_size(700, 250);
    store.set_digits("88", &mut FixedMetrics { width: 900.0 }).unwrap();
    assert_eq!(store.state().surface_height, 250);
}

#[test]
fn digits_change_recomputes_width_after_explicit_resize() {
    let mut store = Store::default();
    store.set_surface_size(320, 240);
    assert_eq!(store.state().surface_width, 320);
    let change = store.set_digits("3", &mut FixedMetrics { width: 50.0 }).unwrap();
    assert_eq!(store.state().surface_width, 600);
    assert!(change.surface_size);
}

#[test]
fn measurement_failure_leaves_state_untouched() {
    let mut store = Store::default();
    let log = record_changes(&mut store);
    let err = store.set_digits("9", &mut BrokenMetrics).unwrap_err();
    assert!(matches!(err, SurfaceError::NoContext));
    assert_eq!(store.state().digits.as_str(), "00");
    assert!(log.borrow().is_empty());
}

#[test]
fn refit_width_applies_to_current_digits() {
    let mut store = Store::default();
    let change = store.refit_width(&mut FixedMetrics { width: 550.0 }).unwrap();
    assert_eq!(store.state().surface_width, 650);
    assert_eq!(change, Change { surface_size: true, ..Change::default() });
    assert!(store.refit_width(&mut FixedMetrics { width: 550.0 }).unwrap().is_empty());
}

// =============================================================
// set_color / set_palette
// =============================================================

#[test]
fn set_color_is_verbatim() {
    let mut store = Store::default();
    let change = store.set_color("not-a-color");
    assert_eq!(store.state().fill_color, "not-a-color");
    assert_eq!(change, Change { fill_color: true, ..Change::default() });
}

#[test]
fn set_color_keeps_palette_id() {
    let mut store = Store::default();
    store.select_palette(PaletteId::Palette1);
    store.set_color("#abcdef");
    assert_eq!(store.state().palette, PaletteId::Palette1);
}

#[test]
fn same_color_again_is_a_no_op() {
    let mut store = Store::default();
    let log = record_changes(&mut store);
    assert!(store.set_color("#000").is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn palette_overrides_any_prior_color() {
    for prior in ["#000", "#f00", "#123456", ""] {
        let mut store = Store::default();
        store.set_color(prior);
        store.set_palette(PaletteOption { id: PaletteId::Palette1, label: "Palette 1", preset_color: "#f00" });
        assert_eq!(store.state().palette, PaletteId::Palette1);
        assert_eq!(store.state().fill_color, "#f00");
    }
}

#[test]
fn palette_change_reports_both_fields() {
    let mut store = Store::default();
    let change = store.select_palette(PaletteId::Palette2);
    assert_eq!(change, Change { palette: true, fill_color: true, ..Change::default() });
}

#[test]
fn reselecting_palette_restores_preset_after_custom_color() {
    let mut store = Store::default();
    store.select_palette(PaletteId::Palette1);
    store.set_color("#abcdef");
    let change = store.select_palette(PaletteId::Palette1);
    assert_eq!(change, Change { fill_color: true, ..Change::default() });
    assert_eq!(store.state().fill_color, "#f00");
}

#[test]
fn palette_notifies_once_per_selection() {
    let mut store = Store::default();
    let log = record_changes(&mut store);
    store.select_palette(PaletteId::Palette2);
    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0.palette, PaletteId::Palette2);
    assert_eq!(log[0].0.fill_color, "#0f0");
}

#[test]
fn every_option_applies_its_preset() {
    let mut store = Store::default();
    for opt in PALETTE_OPTIONS {
        store.set_color("#fafafa");
        store.set_palette(opt);
        assert_eq!(store.state().palette, opt.id);
        assert_eq!(store.state().fill_color, opt.preset_color);
    }
}

// =============================================================
// set_surface_size
// =============================================================

#[test]
fn set_surface_size_overwrites_both_dimensions() {
    let mut store = Store::default();
    let change = store.set_surface_size(320, 200);
    assert_eq!((store.state().surface_width, store.state().surface_height), (320, 200));
    assert!(change.surface_size);
}

#[test]
fn set_surface_size_raises_zero_to_one() {
    let mut store = Store::default();
    store.set_surface_size(0, 0);
    assert_eq!((store.state().surface_width, store.state().surface_height), (1, 1));
}

#[test]
fn same_size_again_is_a_no_op() {
    let mut store = Store::default();
    assert!(store.set_surface_size(600, 400).is_empty());
}

// =============================================================
// Hover
// =============================================================

#[test]
fn set_hover_offsets_pointer() {
    let mut store = Store::default();
    let change = store.set_hover(Point::new(30, 40));
    assert_eq!(store.state().hover, Hover { active: true, x: 40, y: 50 });
    assert_eq!(change, Change { hover: true, ..Change::default() });
}

#[test]
fn clear_hover_deactivates() {
    let mut store = Store::default();
    store.set_hover(Point::new(30, 40));
    store.clear_hover();
    assert!(!store.state().hover.active);
}

#[test]
fn clear_hover_when_inactive_is_a_no_op() {
    let mut store = Store::default();
    assert!(store.clear_hover().is_empty());
}

#[test]
fn hover_offset_comes_from_config() {
    let config = WidgetConfig { preview_offset: 4, ..WidgetConfig::default() };
    let mut store = Store::new(config);
    store.set_hover(Point::new(1, 2));
    assert_eq!(store.state().hover, Hover { active: true, x: 5, y: 6 });
}

// =============================================================
// Subscriptions
// =============================================================

#[test]
fn listeners_run_in_subscription_order() {
    let mut store = Store::default();
    let order = Rc::new(RefCell::new(Vec::new()));
    for n in 0..3 {
        let order = Rc::clone(&order);
        store.subscribe(move |_, _| order.borrow_mut().push(n));
    }
    store.set_color("#fff");
    assert_eq!(*order.borrow(), vec![0, 1, 2]);
}

#[test]
fn listeners_see_the_new_state() {
    let mut store = Store::default();
    let log = record_changes(&mut store);
    store.set_digits("3", &mut RecordingSurface::new()).unwrap();
    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0.digits.as_str(), "03");
    assert!(log[0].1.digits);
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let mut store = Store::default();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let id = store.subscribe(move |_, _| *counter.borrow_mut() += 1);
    store.set_color("#111");
    assert!(store.unsubscribe(id));
    store.set_color("#222");
    assert_eq!(*calls.borrow(), 1);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn unsubscribe_unknown_id_returns_false() {
    let mut store = Store::default();
    let id = store.subscribe(|_, _| {});
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
}

#[test]
fn subscription_ids_are_unique() {
    let mut store = Store::default();
    let a = store.subscribe(|_, _| {});
    let b = store.subscribe(|_, _| {});
    assert_ne!(a, b);
}
