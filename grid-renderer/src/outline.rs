//! Vector outlines of registry symbols.
//!
//! Symbol path data is wrapped in a 24x24 SVG document and parsed with
//! `usvg`, which normalizes relative commands, shorthand curves and arcs into
//! absolute move/line/cubic segments. The exporter maps these segments onto
//! PDF path operators.

use grid_core::symbols::{SymbolDefinition, SymbolPaint, STROKE_WIDTH, VIEWBOX_SIZE};
use usvg::tiny_skia_path::PathSegment;

use crate::error::{RenderError, RenderResult};

/// A point in glyph units, origin at the top-left of the 24x24 box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlinePoint {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position, growing downward.
    pub y: f32,
}

/// One absolute drawing command after a subpath's start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineSegment {
    /// Straight edge to a point.
    LineTo(OutlinePoint),
    /// Cubic curve: two control points, then the end point.
    CubicTo(OutlinePoint, OutlinePoint, OutlinePoint),
    /// Close the current subpath.
    Close,
}

/// A contiguous run of segments starting with a move.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpath {
    /// Start point.
    pub start: Option<OutlinePoint>,
    /// Edges after the start point.
    pub segments: Vec<OutlineSegment>,
    /// Whether the subpath ends with a close command.
    pub closed: bool,
}

/// Parsed outline of one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolOutline {
    /// Registry id.
    pub id: &'static str,
    /// Fill or stroke, copied from the registry entry.
    pub paint: SymbolPaint,
    /// Subpaths in drawing order.
    pub subpaths: Vec<Subpath>,
}

impl SymbolOutline {
    /// Total number of edges across all subpaths.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.subpaths.iter().map(|s| s.segments.len()).sum()
    }
}

/// Standalone SVG document for a symbol, painted black.
#[must_use]
pub fn symbol_svg(symbol: &SymbolDefinition) -> String {
    let paint = match symbol.paint {
        SymbolPaint::Fill => "fill=\"#000000\" stroke=\"none\"".to_string(),
        SymbolPaint::Stroke => format!(
            "fill=\"none\" stroke=\"#000000\" stroke-width=\"{STROKE_WIDTH}\" stroke-linecap=\"round\" stroke-linejoin=\"round\""
        ),
    };
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{VIEWBOX_SIZE}\" height=\"{VIEWBOX_SIZE}\" viewBox=\"0 0 {VIEWBOX_SIZE} {VIEWBOX_SIZE}\"><path d=\"{}\" {paint}/></svg>",
        symbol.path_data
    )
}

/// Parse a symbol's path data into absolute segments.
///
/// # Errors
///
/// Returns [`RenderError::SymbolPath`] if the path data does not parse or
/// produces no drawable geometry.
pub fn symbol_outline(symbol: &SymbolDefinition) -> RenderResult<SymbolOutline> {
    let svg = symbol_svg(symbol);
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())
        .map_err(|e| RenderError::SymbolPath(format!("{}: {e}", symbol.id)))?;

    let mut subpaths = Vec::new();
    collect_group(tree.root(), &mut subpaths);
    subpaths.retain(|s: &Subpath| s.start.is_some() && !s.segments.is_empty());

    if subpaths.is_empty() {
        return Err(RenderError::SymbolPath(format!(
            "{}: no drawable geometry",
            symbol.id
        )));
    }

    Ok(SymbolOutline {
        id: symbol.id,
        paint: symbol.paint,
        subpaths,
    })
}

fn collect_group(group: &usvg::Group, out: &mut Vec<Subpath>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(child) => collect_group(child, out),
            usvg::Node::Path(path) => collect_path(path, out),
            usvg::Node::Image(_) | usvg::Node::Text(_) => {}
        }
    }
}

fn collect_path(path: &usvg::Path, out: &mut Vec<Subpath>) {
    let ts = path.abs_transform();
    let map = |p: usvg::tiny_skia_path::Point| OutlinePoint {
        x: ts.sx * p.x + ts.kx * p.y + ts.tx,
        y: ts.ky * p.x + ts.sy * p.y + ts.ty,
    };

    let mut current = Subpath::default();
    let mut last = OutlinePoint { x: 0.0, y: 0.0 };

    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                if current.start.is_some() {
                    out.push(std::mem::take(&mut current));
                }
                last = map(p);
                current.start = Some(last);
            }
            PathSegment::LineTo(p) => {
                last = map(p);
                current.segments.push(OutlineSegment::LineTo(last));
            }
            PathSegment::QuadTo(c, p) => {
                let c = map(c);
                let end = map(p);
                // Degree elevation: each cubic control sits 2/3 of the way to the quad control.
                let c1 = OutlinePoint {
                    x: last.x + 2.0 / 3.0 * (c.x - last.x),
                    y: last.y + 2.0 / 3.0 * (c.y - last.y),
                };
                let c2 = OutlinePoint {
                    x: end.x + 2.0 / 3.0 * (c.x - end.x),
                    y: end.y + 2.0 / 3.0 * (c.y - end.y),
                };
                current.segments.push(OutlineSegment::CubicTo(c1, c2, end));
                last = end;
            }
            PathSegment::CubicTo(c1, c2, p) => {
                last = map(p);
                current
                    .segments
                    .push(OutlineSegment::CubicTo(map(c1), map(c2), last));
            }
            PathSegment::Close => {
                current.closed = true;
                current.segments.push(OutlineSegment::Close);
                if let Some(start) = current.start {
                    last = start;
                }
                out.push(std::mem::take(&mut current));
                // A segment after close continues from the subpath start.
                current.start = Some(last);
            }
        }
    }

    if current.start.is_some() && !current.segments.is_empty() {
        out.push(current);
    }
}
