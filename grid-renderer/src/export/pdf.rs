//! printpdf drawing primitives in top-left millimeter space.

use grid_core::symbols::{FallbackShape, SymbolPaint, STROKE_WIDTH, VIEWBOX_SIZE};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineCapStyle, LineJoinStyle, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Polygon, Rgb,
};

use crate::error::{RenderError, RenderResult};
use crate::outline::{OutlinePoint, OutlineSegment, SymbolOutline};

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Cubic control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

type Ring = Vec<(Point, bool)>;

/// One-page document with a y-down coordinate helper.
pub(crate) struct PdfPage {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    height: f32,
}

impl PdfPage {
    pub(crate) fn new(title: &str, width: f32, height: f32) -> Self {
        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), "Grid");
        let layer = doc.get_page(page).get_layer(layer);
        Self { doc, layer, height }
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(Mm(x), Mm(self.height - y))
    }

    pub(crate) fn fill_rect(&self, x: f32, y: f32, w: f32, h: f32, color: [u8; 3]) {
        self.layer.set_fill_color(rgb(color));
        let ring = vec![
            (self.point(x, y), false),
            (self.point(x + w, y), false),
            (self.point(x + w, y + h), false),
            (self.point(x, y + h), false),
        ];
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    pub(crate) fn line(&self, from: (f32, f32), to: (f32, f32), width_mm: f32, color: [u8; 3]) {
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(width_mm * PT_PER_MM);
        self.layer.add_line(Line {
            points: vec![
                (self.point(from.0, from.1), false),
                (self.point(to.0, to.1), false),
            ],
            is_closed: false,
        });
    }

    /// Stroke the outline of a rectangle.
    pub(crate) fn stroke_rect(&self, x: f32, y: f32, w: f32, h: f32, width_mm: f32, color: [u8; 3]) {
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(width_mm * PT_PER_MM);
        self.layer.add_line(Line {
            points: vec![
                (self.point(x, y), false),
                (self.point(x + w, y), false),
                (self.point(x + w, y + h), false),
                (self.point(x, y + h), false),
            ],
            is_closed: true,
        });
    }

    /// Draw a filled circle or square centered at `(cx, cy)`.
    pub(crate) fn fallback(&self, shape: FallbackShape, cx: f32, cy: f32, half: f32, color: [u8; 3]) {
        match shape {
            FallbackShape::Square => {
                self.fill_rect(cx - half, cy - half, half * 2.0, half * 2.0, color);
            }
            FallbackShape::Circle => {
                let k = half * KAPPA;
                let mut ring = Ring::new();
                ring.push((self.point(cx + half, cy), false));
                let quarters = [
                    ((cx + half, cy + k), (cx + k, cy + half), (cx, cy + half)),
                    ((cx - k, cy + half), (cx - half, cy + k), (cx - half, cy)),
                    ((cx - half, cy - k), (cx - k, cy - half), (cx, cy - half)),
                    ((cx + k, cy - half), (cx + half, cy - k), (cx + half, cy)),
                ];
                for (c1, c2, end) in quarters {
                    self.push_cubic(&mut ring, c1, c2, end);
                }
                self.layer.set_fill_color(rgb(color));
                self.layer.add_polygon(Polygon {
                    rings: vec![ring],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                });
            }
        }
    }

    /// Draw a symbol outline into the box with top-left `(x, y)` and edge `size`.
    pub(crate) fn symbol(&self, outline: &SymbolOutline, x: f32, y: f32, size: f32, color: [u8; 3]) {
        let scale = size / VIEWBOX_SIZE;
        let map = |p: OutlinePoint| (x + p.x * scale, y + p.y * scale);

        let mut rings: Vec<(Ring, bool)> = Vec::with_capacity(outline.subpaths.len());
        for sub in &outline.subpaths {
            let Some(start) = sub.start else { continue };
            let mut ring = Ring::new();
            let (sx, sy) = map(start);
            ring.push((self.point(sx, sy), false));
            for segment in &sub.segments {
                match *segment {
                    OutlineSegment::LineTo(p) => {
                        let (px, py) = map(p);
                        ring.push((self.point(px, py), false));
                    }
                    OutlineSegment::CubicTo(c1, c2, p) => {
                        self.push_cubic(&mut ring, map(c1), map(c2), map(p));
                    }
                    OutlineSegment::Close => {}
                }
            }
            rings.push((ring, sub.closed));
        }

        self.layer.save_graphics_state();
        match outline.paint {
            SymbolPaint::Fill => {
                self.layer.set_fill_color(rgb(color));
                self.layer.add_polygon(Polygon {
                    rings: rings.into_iter().map(|(ring, _)| ring).collect(),
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                });
            }
            SymbolPaint::Stroke => {
                self.layer.set_outline_color(rgb(color));
                self.layer
                    .set_outline_thickness(STROKE_WIDTH * scale * PT_PER_MM);
                self.layer.set_line_cap_style(LineCapStyle::Round);
                self.layer.set_line_join_style(LineJoinStyle::Round);
                for (points, is_closed) in rings {
                    self.layer.add_line(Line { points, is_closed });
                }
            }
        }
        self.layer.restore_graphics_state();
    }

    pub(crate) fn builtin_font(&self) -> RenderResult<IndirectFontRef> {
        self.doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Export(format!("Failed to load font: {e}")))
    }

    /// Draw text centered on `cx` with its baseline `baseline` mm from the top.
    pub(crate) fn centered_text(
        &self,
        text: &str,
        size_pt: f32,
        cx: f32,
        baseline: f32,
        color: [u8; 3],
        font: &IndirectFontRef,
    ) {
        // Built-in fonts carry no metrics here; estimate half an em per glyph.
        #[allow(clippy::cast_precision_loss)]
        let width = text.chars().count() as f32 * size_pt * 0.5 / PT_PER_MM;
        self.layer.set_fill_color(rgb(color));
        self.layer.use_text(
            text,
            size_pt,
            Mm(cx - width / 2.0),
            Mm(self.height - baseline),
            font,
        );
    }

    pub(crate) fn save(self) -> RenderResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| RenderError::Export(format!("PDF save failed: {e}")))
    }

    /// Append a cubic to `ring`; the current end point becomes the curve start.
    fn push_cubic(&self, ring: &mut Ring, c1: (f32, f32), c2: (f32, f32), end: (f32, f32)) {
        if let Some(last) = ring.last_mut() {
            last.1 = true;
        }
        ring.push((self.point(c1.0, c1.1), true));
        ring.push((self.point(c2.0, c2.1), false));
        ring.push((self.point(end.0, end.1), false));
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}
