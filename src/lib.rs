//! Two-digit canvas widget.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! widget's render state, validates and normalizes input from the host form
//! (a digit field, a color picker, a palette selector), keeps the drawing
//! surface painted, and drives a magnified hover preview that follows the
//! pointer. The host JavaScript layer only forwards DOM events to
//! [`engine::Engine`].
//!
//! Everything below the binding draws through [`surface::Surface`], so the
//! whole widget also runs headless against [`surface::RecordingSurface`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | `wasm-bindgen` export and the testable [`engine::EngineCore`] |
//! | [`store`] | State holder: validated mutations and change subscriptions |
//! | [`state`] | Widget state, digit normalization, palette options |
//! | [`render`] | Full repaint of the surface and of the preview box |
//! | [`preview`] | Hover preview derivation and overlay syncing |
//! | [`hit`] | Hit-testing pointer positions against widget bounds |
//! | [`surface`] | Drawing-surface trait, canvas and recording implementations |
//! | [`geom`] | Integer points and rectangles in widget-local space |
//! | [`config`] | Host-supplied JSON configuration |
//! | [`error`] | Error types and their `JsValue` conversions |
//! | [`consts`] | Fonts, anchors, sizes, and colors |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod preview;
pub mod render;
pub mod state;
pub mod store;
pub mod surface;
