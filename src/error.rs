//! Error types shared across the crate.
//!
//! Each concern gets its own enum so callers can match on exactly the
//! failures they can see. `JsValue` conversions live here as well, since the
//! `wasm-bindgen` boundary is the only place these errors leave Rust.

use wasm_bindgen::JsValue;

/// A drawing-surface call failed.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// A `Canvas2D` call threw; the payload is the debug rendering of the thrown value.
    #[error("canvas call failed: {0}")]
    Canvas(String),
    /// `getContext("2d")` returned nothing usable for the given element.
    #[error("canvas element has no 2d context")]
    NoContext,
}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        Self::Canvas(format!("{value:?}"))
    }
}

/// Widget configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document was malformed or had wrongly typed fields.
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    /// `initialDigits` does not satisfy the 0-2 decimal digit rule.
    #[error("initial digits {0:?} must be 0 to 2 decimal digits")]
    InitialDigits(String),
    /// A size field was zero.
    #[error("{field} must be positive")]
    NonPositive {
        /// Config key of the offending field.
        field: &'static str,
    },
}

/// A palette id string that is not one of the fixed options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown palette id {0:?}")]
pub struct UnknownPalette(pub String);

/// A JS `Error` carrying `err`'s display text.
#[must_use]
pub fn js_error(err: &impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

impl From<SurfaceError> for JsValue {
    fn from(err: SurfaceError) -> Self {
        js_error(&err)
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        js_error(&err)
    }
}

impl From<UnknownPalette> for JsValue {
    fn from(err: UnknownPalette) -> Self {
        js_error(&err)
    }
}
