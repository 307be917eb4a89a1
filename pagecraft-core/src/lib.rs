//! # Pagecraft Core
//!
//! Core logic for a drag-and-drop page builder.
//! Compiles to WASM so the browser editor shell can drive it directly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             pagecraft-core.wasm             │
//! ├─────────────────────────────────────────────┤
//! │  Element Model   │  Canvas                  │
//! │  - Block types   │  - Ordered elements      │
//! │  - Factory       │  - Drop placement        │
//! │  - Markup        │  - Single selection      │
//! ├─────────────────────────────────────────────┤
//! │  Properties      │  Export                  │
//! │  - Form specs    │  - Clean fragment        │
//! │  - Apply         │  - Standalone document   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! All user interactions go through [`BuilderState::dispatch`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod apply;
pub mod canvas;
pub mod color;
pub mod element;
pub mod error;
pub mod event;
pub mod export;
pub mod form;
pub mod markup;
pub mod state;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use apply::{apply, FormValues};
pub use canvas::Canvas;
pub use color::{to_hex, Rgb};
pub use element::{
    Align, BorderStyle, ButtonSize, Clock, CommonStyle, Element, ElementContent, ElementFactory,
    ElementId, ElementType, HeadingLevel,
};
pub use error::{CanvasError, CanvasResult};
pub use event::{Action, DropPayload, Outcome, Target};
pub use export::{clean_export, Download, ExportConfig, PageExporter};
pub use form::{FormField, FormSpec, PropertiesPanel, Widget};
pub use state::BuilderState;

/// Pagecraft core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
