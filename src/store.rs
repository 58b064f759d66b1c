//! Render state holder: validated mutations plus change notification.
//!
//! DESIGN
//! ======
//! `Store` owns the one [`WidgetState`] of a widget. Each mutation validates
//! its input, applies the causal rules between fields, and reports what moved
//! as a [`Change`]. When anything moved, every subscriber is called
//! synchronously, in subscription order, before the mutation returns. A
//! mutation that changes nothing notifies nobody.
//!
//! Causal rules:
//! - Digits are accepted only as 0-2 decimal digits and stored left-padded.
//! - A digits change refits the surface width to the measured digit width
//!   plus a margin, never below the floor. Height is untouched.
//! - Selecting a palette overwrites the fill color with its preset.
//! - An explicit resize overrides both dimensions until the next digits change.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::config::WidgetConfig;
use crate::consts::DIGIT_FONT;
use crate::error::SurfaceError;
use crate::geom::Point;
use crate::state::{Digits, Hover, PaletteId, PaletteOption, WidgetState};
use crate::surface::{Surface, text_width};

/// Which fields a mutation changed.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Change {
    pub digits: bool,
    pub fill_color: bool,
    pub palette: bool,
    /// Either surface dimension.
    pub surface_size: bool,
    pub hover: bool,
}

impl Change {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::default()
    }

    /// Whether the main surface must be repainted.
    #[must_use]
    pub fn needs_repaint(self) -> bool {
        self.digits || self.fill_color || self.palette || self.surface_size
    }

    /// Whether the preview's content (not just its position) may differ.
    #[must_use]
    pub fn affects_preview(self) -> bool {
        self.digits || self.fill_color || self.hover
    }
}

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked after every effective mutation.
pub type Listener = Box<dyn FnMut(&WidgetState, Change)>;

/// Fitted surface width for digits measuring `measured` pixels.
///
/// The result is `ceil(measured) + margin`, never below `min_width`.
/// Non-finite measurements saturate rather than wrap.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fit_width(measured: f64, min_width: u32, margin: u32) -> u32 {
    let wanted = measured.max(0.0).ceil() + f64::from(margin);
    (wanted as u32).max(min_width)
}

/// Owner of the widget state.
pub struct Store {
    state: WidgetState,
    config: WidgetConfig,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(WidgetConfig::default())
    }
}

impl Store {
    /// A store in the config's initial state, with no subscribers.
    #[must_use]
    pub fn new(config: WidgetConfig) -> Self {
        Self { state: config.initial_state(), config, listeners: Vec::new(), next_id: 0 }
    }

    #[must_use]
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    // --- Subscriptions ---

    /// Register `listener` to be called after every effective mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&WidgetState, Change) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    // --- Mutations ---

    /// Apply raw digit text from the input field.
    ///
    /// Input that is not 0-2 decimal digits is silently ignored. Accepted
    /// input is left-padded to two characters; if that differs from the
    /// current digits the surface width is refitted using `metrics`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `metrics` cannot measure the new digits. The state is
    /// left untouched in that case.
    pub fn set_digits(&mut self, raw: &str, metrics: &mut dyn Surface) -> Result<Change, SurfaceError> {
        let Some(digits) = Digits::parse(raw) else {
            tracing::debug!(raw, "rejected digit input");
            return Ok(Change::default());
        };
        if digits == self.state.digits {
            return Ok(Change::default());
        }

        let width = self.fitted_width(&digits, metrics)?;
        let change = Change { digits: true, surface_size: width != self.state.surface_width, ..Change::default() };
        self.state.digits = digits;
        self.state.surface_width = width;
        self.notify(change);
        Ok(change)
    }

    /// Recompute the surface width from the current digits, as a digits change would.
    ///
    /// Used once a surface becomes available to measure with.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `metrics` cannot measure the digits.
    pub fn refit_width(&mut self, metrics: &mut dyn Surface) -> Result<Change, SurfaceError> {
        let width = self.fitted_width(&self.state.digits, metrics)?;
        if width == self.state.surface_width {
            return Ok(Change::default());
        }
        self.state.surface_width = width;
        let change = Change { surface_size: true, ..Change::default() };
        self.notify(change);
        Ok(change)
    }

    /// Set the fill color verbatim. The palette id is left alone.
    pub fn set_color(&mut self, value: &str) -> Change {
        if self.state.fill_color == value {
            return Change::default();
        }
        self.state.fill_color = value.to_owned();
        let change = Change { fill_color: true, ..Change::default() };
        self.notify(change);
        change
    }

    /// Select a palette: sets the id and overwrites the fill color with the
    /// option's preset, even if the user just picked a color by hand.
    pub fn set_palette(&mut self, option: PaletteOption) -> Change {
        let change = Change {
            palette: self.state.palette != option.id,
            fill_color: self.state.fill_color != option.preset_color,
            ..Change::default()
        };
        self.state.palette = option.id;
        if change.fill_color {
            self.state.fill_color = option.preset_color.to_owned();
        }
        self.notify(change);
        change
    }

    /// [`Store::set_palette`] by id.
    pub fn select_palette(&mut self, id: PaletteId) -> Change {
        self.set_palette(id.option())
    }

    /// Overwrite both surface dimensions from an external resize.
    ///
    /// Zero is raised to one so the surface never becomes empty.
    pub fn set_surface_size(&mut self, width: u32, height: u32) -> Change {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == (self.state.surface_width, self.state.surface_height) {
            return Change::default();
        }
        self.state.surface_width = width;
        self.state.surface_height = height;
        let change = Change { surface_size: true, ..Change::default() };
        self.notify(change);
        change
    }

    /// Mark the pointer as inside the widget at `pointer`.
    ///
    /// The preview is placed at the pointer plus the configured offset.
    pub fn set_hover(&mut self, pointer: Point) -> Change {
        let offset = self.config.preview_offset;
        let at = pointer.offset(offset, offset);
        let hover = Hover { active: true, x: at.x, y: at.y };
        self.replace_hover(hover)
    }

    /// Mark the pointer as outside the widget.
    pub fn clear_hover(&mut self) -> Change {
        let hover = Hover { active: false, ..self.state.hover };
        self.replace_hover(hover)
    }

    // --- Internals ---

    fn replace_hover(&mut self, hover: Hover) -> Change {
        if hover == self.state.hover {
            return Change::default();
        }
        self.state.hover = hover;
        let change = Change { hover: true, ..Change::default() };
        self.notify(change);
        change
    }

    fn fitted_width(&self, digits: &Digits, metrics: &mut dyn Surface) -> Result<u32, SurfaceError> {
        let measured = text_width(metrics, DIGIT_FONT, digits.as_str())?;
        Ok(fit_width(measured, self.config.min_width, self.config.width_margin))
    }

    fn notify(&mut self, change: Change) {
        if change.is_empty() {
            return;
        }
        tracing::trace!(?change, listeners = self.listeners.len(), "state changed");
        for (_, listener) in &mut self.listeners {
            listener(&self.state, change);
        }
    }
}
