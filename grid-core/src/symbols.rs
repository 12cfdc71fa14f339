//! Symbol registry: named glyphs drawn inside cells.
//!
//! Every glyph is an SVG path in a 24x24 box together with its paint mode.
//! Both the canvas renderer and the PDF exporter read [`SymbolDefinition::paint`]
//! from this table, which is what keeps the exported document identical to the
//! screen. Unknown ids resolve to `None` and are drawn as nothing on screen.

use serde::{Deserialize, Serialize};

/// Edge length of the normalized glyph box.
pub const VIEWBOX_SIZE: f32 = 24.0;

/// Stroke width of outline glyphs, in glyph units.
pub const STROKE_WIDTH: f32 = 2.0;

/// How a glyph's path is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPaint {
    /// Interior filled with the cell color, no outline.
    Fill,
    /// Outline stroked with the cell color, round caps and joins.
    Stroke,
}

/// Picker grouping of a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolCategory {
    /// Embroidery stitch marks.
    Stitches,
    /// Solid geometric shapes.
    Shapes,
    /// Direction arrows.
    Arrows,
    /// Check, cross, plus and minus marks.
    Marks,
    /// Everything else.
    Misc,
}

/// Primitive drawn instead of a glyph when vector embedding fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackShape {
    /// Filled disc.
    Circle,
    /// Filled square.
    Square,
}

/// One registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolDefinition {
    /// Registry identifier stored in cells.
    pub id: &'static str,
    /// SVG path data in the 24x24 box.
    pub path_data: &'static str,
    /// Fill or stroke.
    pub paint: SymbolPaint,
    /// Picker grouping.
    pub category: SymbolCategory,
}

impl SymbolDefinition {
    /// Whether the glyph is painted filled.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.paint == SymbolPaint::Fill
    }

    /// Primitive substitute for this glyph.
    #[must_use]
    pub fn fallback_shape(&self) -> FallbackShape {
        fallback_shape(self.id)
    }
}

const fn stroke(id: &'static str, path_data: &'static str, category: SymbolCategory) -> SymbolDefinition {
    SymbolDefinition {
        id,
        path_data,
        paint: SymbolPaint::Stroke,
        category,
    }
}

const fn fill(id: &'static str, path_data: &'static str, category: SymbolCategory) -> SymbolDefinition {
    SymbolDefinition {
        id,
        path_data,
        paint: SymbolPaint::Fill,
        category,
    }
}

use SymbolCategory::{Arrows, Marks, Misc, Shapes, Stitches};

static SYMBOLS: &[SymbolDefinition] = &[
    stroke("cross", "M3 3L21 21M21 3L3 21", Stitches),
    stroke("crossDouble", "M2 7L7 2M17 22L22 17M2 17L7 22M17 2L22 7M12 2v20", Stitches),
    stroke("crossBlock", "M6 6h4v4H6zM14 6h4v4h-4zM6 14h4v4H6zM14 14h4v4h-4z", Stitches),
    stroke("dottedLine", "M2 12h3M7 12h3M12 12h3M17 12h3", Stitches),
    stroke("backstitch", "M2 12h20", Stitches),
    stroke("stemStitch", "M3 20L9 14L15 20L21 14", Stitches),
    stroke(
        "chain",
        "M4 12a2 2 0 1 0 4 0a2 2 0 1 0 -4 0M10 12a2 2 0 1 0 4 0a2 2 0 1 0 -4 0M16 12a2 2 0 1 0 4 0a2 2 0 1 0 -4 0",
        Stitches,
    ),
    stroke("feston", "M2 16c2-4 6-4 8 0c2-4 6-4 8 0", Stitches),
    stroke("squareFilled", "M6 6h12v12H6z", Stitches),
    stroke("paiteFill", "M4 20L8 16M6 22L10 18M8 24L12 20M10 2L14 6M12 0L16 4", Stitches),
    stroke("zigzag", "M2 12l4-6 4 6 4-6 4 6 4-6", Stitches),
    stroke("wave", "M0 14c3-6 6-6 9 0s6 6 9 0s6-6 9 0", Stitches),
    stroke("romb", "M12 2L20 12L12 22L4 12Z", Stitches),
    stroke("rombFilled", "M12 4L18 12L12 20L6 12Z", Stitches),
    stroke("star8", "M12 2l2.8 6.2L21 11l-6 2 -2.8 6.2L12 18l-2.2 1.2L3 13l6-2L12 2z", Stitches),
    stroke(
        "rosette",
        "M12 2a10 10 0 0 0 0 20a10 10 0 0 0 0-20ZM12 6v12M6 12h12M7.5 7.5l9 9M7.5 16.5l9-9",
        Stitches,
    ),
    stroke("leaf", "M20 4c-6 6-10 6-14 10c4-6 8-8 14-10z", Stitches),
    stroke("vine", "M3 20c4-8 8-8 12-12c0 0 1 2 3 2c-4 4-6 6-12 12", Stitches),
    stroke("spike", "M12 2v20M12 6l4 2M12 10l-4 2M12 14l4 2M12 18l-4 2", Stitches),
    stroke(
        "sun",
        "M12 4a8 8 0 1 0 0 16a8 8 0 0 0 0-16M12 0v4M12 20v4M4 12H0M24 12h-4M4.5 4.5L2 2M21.5 21.5L24 24M4.5 19.5L2 22M21.5 2.5L24 0",
        Stitches,
    ),
    stroke("teethLarge", "M2 20l4-8 4 8 4-8 4 8 4-8", Stitches),
    stroke("squareOutline", "M4 4h16v16H4z", Stitches),
    stroke("centerLine", "M12 0v24", Stitches),
    stroke("marginLine", "M2 2v20h2M20 2v20h2", Stitches),
    stroke("cornerBox", "M4 4h8M4 4v8M20 20h-8M20 20v-8", Stitches),
    fill("circle", "M12 0C5.37 0 0 5.37 0 12s5.37 12 12 12 12-5.37 12-12S18.63 0 12 0z", Shapes),
    fill("square", "M0 0h24v24H0z", Shapes),
    fill("triangle", "M12 0l12 24H0z", Shapes),
    fill(
        "star",
        "M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z",
        Shapes,
    ),
    fill(
        "heart",
        "M12 21.35l-1.45-1.32C5.4 15.36 2 12.28 2 8.5 2 5.42 4.42 3 7.5 3c1.74 0 3.41.81 4.5 2.09C13.09 3.81 14.76 3 16.5 3 19.58 3 22 5.42 22 8.5c0 3.78-3.4 6.86-8.55 11.54L12 21.35z",
        Shapes,
    ),
    stroke("up", "M7 14l5-5 5 5z", Arrows),
    stroke("down", "M7 10l5 5 5-5z", Arrows),
    stroke("left", "M14 7l-5 5 5 5z", Arrows),
    stroke("right", "M10 17l5-5-5-5z", Arrows),
    stroke("up-right", "M7 17L17 7M17 7H9M17 7v8", Arrows),
    stroke("down-left", "M17 7L7 17M7 17h8M7 17V9", Arrows),
    stroke("check", "M20 6L9 17l-5-5", Marks),
    stroke("x", "M18 6L6 18M6 6l12 12", Marks),
    stroke("plus", "M12 5v14M5 12h14", Marks),
    stroke("minus", "M5 12h14", Marks),
    stroke("moon", "M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z", Misc),
    stroke("lightning", "M13 2L3 14h9l-1 8 10-12h-9l1-8z", Misc),
    stroke(
        "target",
        "M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zM12 6c3.31 0 6 2.69 6 6s-2.69 6-6 6-6-2.69-6-6 2.69-6 6-6zM12 10c1.1 0 2 .9 2 2s-.9 2-2 2-2-.9-2-2 .9-2 2-2z",
        Misc,
    ),
    stroke(
        "gear",
        "M12 15.5A3.5 3.5 0 0 1 8.5 12A3.5 3.5 0 0 1 12 8.5a3.5 3.5 0 0 1 3.5 3.5 3.5 3.5 0 0 1-3.5 3.5zM19.43 12.98c.04-.32.07-.64.07-.98s-.03-.66-.07-.98l2.11-1.65c.19-.15.24-.42.12-.64l-2-3.46c-.12-.22-.39-.3-.61-.22l-2.49 1c-.52-.4-1.08-.73-1.69-.98l-.38-2.65C14.46 2.18 14.25 2 14 2h-4c-.25 0-.46.18-.49.42l-.38 2.65c-.61.25-1.17.59-1.69.98l-2.49-1c-.23-.09-.49 0-.61.22l-2 3.46c-.13.22-.07.49.12.64l2.11 1.65c-.04.32-.07.65-.07.98s.03.66.07.98l-2.11 1.65c-.19.15-.24.42-.12.64l2 3.46c.12.22.39.3.61.22l2.49-1c.52.4 1.08.73 1.69.98l.38 2.65c.03.24.24.42.49.42h4c.25 0 .46-.18.49-.42l.38-2.65c.61-.25 1.17-.59 1.69-.98l2.49 1c.23.09.49 0 .61-.22l2-3.46c.12-.22.07-.49-.12-.64l-2.11-1.65z",
        Misc,
    ),
];

/// Look up a glyph by id.
#[must_use]
pub fn resolve(id: &str) -> Option<&'static SymbolDefinition> {
    SYMBOLS.iter().find(|s| s.id == id)
}

/// Every glyph in table order.
#[must_use]
pub fn all() -> &'static [SymbolDefinition] {
    SYMBOLS
}

/// Glyphs of one picker category, in table order.
pub fn category(category: SymbolCategory) -> impl Iterator<Item = &'static SymbolDefinition> {
    SYMBOLS.iter().filter(move |s| s.category == category)
}

/// Primitive substitute for any id, known or not.
///
/// Round glyphs become a [`FallbackShape::Circle`]; everything else, including
/// ids missing from the registry, becomes a [`FallbackShape::Square`].
#[must_use]
pub fn fallback_shape(id: &str) -> FallbackShape {
    match id {
        "circle" | "chain" | "rosette" | "sun" | "target" | "gear" | "moon" | "heart"
        | "star8" | "wave" | "feston" => FallbackShape::Circle,
        _ => FallbackShape::Square,
    }
}
