//! # Grid Core
//!
//! Data model and geometry for a paintable cell grid.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 grid-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Matrix Store    │  Geometry Engine         │
//! │  - Cells         │  - Canvas sizing         │
//! │  - Copy-on-write │  - Paper layout (mm)     │
//! ├─────────────────────────────────────────────┤
//! │  GridState       │  Symbol Registry         │
//! │  - Intents       │  - 24x24 glyph paths     │
//! │  - Transpose     │  - Fill/stroke + fallback│
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cell;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod matrix;
pub mod preferences;
pub mod state;
pub mod symbols;
pub mod toggle;
pub mod transform;

pub use cell::{Cell, HexColor};
pub use config::{
    validate_dimensions, GridConfig, Orientation, PaperSize, DEFAULT_COLS, DEFAULT_PALETTE,
    DEFAULT_ROWS, MAX_DIMENSION, MIN_DIMENSION,
};
pub use error::{GridError, GridResult};
pub use event::{PointerEvent, TouchEvent, TouchPhase, TouchPoint};
pub use geometry::{canvas_dimensions, paper_layout, CanvasDimensions, PaperLayout, Viewport};
pub use matrix::Matrix;
pub use preferences::{
    load_language, store_language, FilePreferences, Language, MemoryPreferences, PreferenceStore,
};
pub use state::{GridState, Intent};
pub use symbols::{FallbackShape, SymbolCategory, SymbolDefinition, SymbolPaint};
pub use toggle::{resolve_toggle, Selection};
pub use transform::{transpose, Transposed};

/// Grid core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
