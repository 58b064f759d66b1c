use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::config::WidgetConfig;
use crate::error::{SurfaceError, UnknownPalette, js_error};
use crate::geom::{Point, Rect};
use crate::hit::{Bounds, hit_test};
use crate::preview::{self, Preview};
use crate::render;
use crate::state::{PALETTE_OPTIONS, PaletteId, WidgetState};
use crate::store::{Change, Store, SubscriptionId};
use crate::surface::{CanvasSurface, Overlay, Surface};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Core engine state: the store plus its attached surfaces.
///
/// Generic over the surface so it can be tested without WASM/browser dependencies.
pub struct EngineCore<S> {
    store: Store,
    /// Handle onto the main surface, used for text measurement and explicit repaints.
    surface: S,
    bounds: Bounds,
    overlay_sub: Option<SubscriptionId>,
}

impl<S> EngineCore<S>
where
    S: Surface + Clone + 'static,
{
    /// Build a store from `config`, fit its width to the initial digits, and
    /// attach the renderer to `surface`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface cannot measure or paint.
    pub fn new(mut surface: S, config: WidgetConfig) -> Result<Self, SurfaceError> {
        let mut store = Store::new(config);
        store.refit_width(&mut surface)?;
        render::attach(&mut store, surface.clone())?;
        tracing::debug!(
            width = store.state().surface_width,
            height = store.state().surface_height,
            "engine mounted"
        );
        Ok(Self { store, surface, bounds: Bounds::default(), overlay_sub: None })
    }

    /// Attach `overlay` as the hover preview, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the overlay cannot be synced; the previous overlay is
    /// already detached by then.
    pub fn attach_overlay<O>(&mut self, overlay: O) -> Result<(), SurfaceError>
    where
        O: Overlay + 'static,
    {
        if let Some(id) = self.overlay_sub.take() {
            self.store.unsubscribe(id);
        }
        self.overlay_sub = Some(preview::attach(&mut self.store, overlay)?);
        Ok(())
    }

    /// Register an extra listener on the underlying store.
    pub fn subscribe(&mut self, listener: impl FnMut(&WidgetState, Change) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if self.overlay_sub == Some(id) {
            self.overlay_sub = None;
        }
        self.store.unsubscribe(id)
    }

    // --- Data inputs ---

    /// Apply raw text from the digit field.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface cannot measure the new digits.
    pub fn set_digits(&mut self, raw: &str) -> Result<Change, SurfaceError> {
        self.store.set_digits(raw, &mut self.surface)
    }

    pub fn set_color(&mut self, value: &str) -> Change {
        self.store.set_color(value)
    }

    /// Select a palette by its id string.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownPalette`] if `id` is not one of the fixed options.
    pub fn set_palette(&mut self, id: &str) -> Result<Change, UnknownPalette> {
        let id: PaletteId = id.parse()?;
        Ok(self.store.select_palette(id))
    }

    pub fn select_palette(&mut self, id: PaletteId) -> Change {
        self.store.select_palette(id)
    }

    pub fn set_surface_size(&mut self, width: u32, height: u32) -> Change {
        self.store.set_surface_size(width, height)
    }

    /// Replace the hover region. Takes effect on the next pointer event.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    // --- Pointer ---

    /// Hit-test `pointer` against the widget bounds and update hover.
    pub fn on_pointer_move(&mut self, pointer: Point) -> Change {
        if hit_test(pointer, self.bounds, self.store.state()) {
            self.store.set_hover(pointer)
        } else {
            self.store.clear_hover()
        }
    }

    pub fn on_pointer_leave(&mut self) -> Change {
        self.store.clear_hover()
    }

    // --- Queries ---

    /// Repaint the main surface from the current state.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects a draw call.
    pub fn render(&mut self) -> Result<(), SurfaceError> {
        render::repaint(&mut self.surface, self.store.state())
    }

    #[must_use]
    pub fn state(&self) -> &WidgetState {
        self.store.state()
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The hover preview as it should currently appear, if any.
    #[must_use]
    pub fn preview(&self) -> Option<Preview> {
        preview::preview(self.store.state(), self.store.config().preview_size)
    }
}

// =============================================================
// Browser binding
// =============================================================

/// The digit widget as seen from JavaScript.
///
/// The host forwards input events and pointer positions (widget-local pixels);
/// the engine keeps the canvas and the optional preview canvas painted.
#[wasm_bindgen]
pub struct Engine {
    core: EngineCore<CanvasSurface>,
}

#[wasm_bindgen]
impl Engine {
    /// Mount on `canvas` with default settings. `overlay`, when given, is a
    /// separately positioned canvas used for the hover preview.
    ///
    /// # Errors
    ///
    /// Returns a JS `Error` if either canvas has no usable 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, overlay: Option<HtmlCanvasElement>) -> Result<Engine, JsValue> {
        Self::mount(canvas, overlay, WidgetConfig::default())
    }

    /// Mount with a JSON config object (see [`WidgetConfig`]).
    ///
    /// # Errors
    ///
    /// Returns a JS `Error` for an invalid config or an unusable canvas.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        canvas: HtmlCanvasElement,
        overlay: Option<HtmlCanvasElement>,
        config_json: &str,
    ) -> Result<Engine, JsValue> {
        let config = WidgetConfig::from_json(config_json)?;
        Self::mount(canvas, overlay, config)
    }

    /// Apply raw text from the digit field. Returns the value the field should display.
    ///
    /// # Errors
    ///
    /// Returns a JS `Error` if the canvas cannot measure text.
    #[wasm_bindgen(js_name = setDigits)]
    pub fn set_digits(&mut self, raw: &str) -> Result<String, JsValue> {
        self.core.set_digits(raw)?;
        Ok(self.core.state().digits.to_string())
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, value: &str) {
        self.core.set_color(value);
    }

    /// Select a palette. Returns the new fill color for the color picker.
    ///
    /// # Errors
    ///
    /// Returns a JS `Error` for an unknown palette id.
    #[wasm_bindgen(js_name = setPalette)]
    pub fn set_palette(&mut self, id: &str) -> Result<String, JsValue> {
        self.core.set_palette(id)?;
        Ok(self.core.state().fill_color.clone())
    }

    #[wasm_bindgen(js_name = setSurfaceSize)]
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.core.set_surface_size(width, height);
    }

    /// Use a fixed hover region instead of the surface rectangle.
    #[wasm_bindgen(js_name = setBounds)]
    pub fn set_bounds(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.core.set_bounds(Bounds::Explicit(Rect::new(x, y, width, height)));
    }

    /// Go back to hit-testing against the surface rectangle.
    #[wasm_bindgen(js_name = clearBounds)]
    pub fn clear_bounds(&mut self) {
        self.core.set_bounds(Bounds::Surface);
    }

    #[wasm_bindgen(js_name = onPointerMove)]
    pub fn on_pointer_move(&mut self, x: i32, y: i32) {
        self.core.on_pointer_move(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = onPointerLeave)]
    pub fn on_pointer_leave(&mut self) {
        self.core.on_pointer_leave();
    }

    /// Force a full repaint of the main canvas.
    ///
    /// # Errors
    ///
    /// Returns a JS `Error` if a canvas call throws.
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.core.render()?;
        Ok(())
    }

    #[must_use]
    pub fn digits(&self) -> String {
        self.core.state().digits.to_string()
    }

    #[must_use]
    #[wasm_bindgen(js_name = fillColor)]
    pub fn fill_color(&self) -> String {
        self.core.state().fill_color.clone()
    }

    /// The full widget state as JSON.
    ///
    /// # Errors
    ///
    /// Returns a JS `Error` if serialization fails.
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.core.state()).map_err(|err| js_error(&err))
    }

    /// The palette selector's options as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns a JS `Error` if serialization fails.
    #[wasm_bindgen(js_name = paletteOptionsJson)]
    pub fn palette_options_json() -> Result<String, JsValue> {
        serde_json::to_string(&PALETTE_OPTIONS).map_err(|err| js_error(&err))
    }
}

impl Engine {
    fn mount(
        canvas: HtmlCanvasElement,
        overlay: Option<HtmlCanvasElement>,
        config: WidgetConfig,
    ) -> Result<Engine, JsValue> {
        let mut core = EngineCore::new(CanvasSurface::new(canvas)?, config)?;
        if let Some(overlay) = overlay {
            core.attach_overlay(CanvasSurface::new(overlay)?)?;
        }
        Ok(Self { core })
    }
}
