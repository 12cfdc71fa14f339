//! Property tests for export page placement (grid-renderer).

use grid_core::{GridConfig, PaperSize};
use grid_renderer::{ExportOptions, PdfExporter, RenderError};
use proptest::prelude::*;

const EPS: f32 = 1e-3;

fn paper_sizes() -> impl Strategy<Value = PaperSize> {
    prop::sample::select(PaperSize::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_accepted_layout_stays_in_margin_box(
        rows in 1usize..=50,
        cols in 1usize..=50,
        is_horizontal in any::<bool>(),
        paper in paper_sizes(),
        margin in 0.0f32..120.0,
    ) {
        let config = GridConfig::new(rows, cols, is_horizontal).expect("config");
        let exporter = PdfExporter::new(ExportOptions {
            margin_mm: margin,
            ..ExportOptions::default()
        });

        match exporter.layout(&config, paper) {
            Ok(layout) => {
                prop_assert!(layout.cell_size > 0.0);
                prop_assert!(layout.start_x >= margin - EPS);
                prop_assert!(layout.start_y >= margin - EPS);
                prop_assert!(layout.start_x + layout.grid_width() <= layout.page_width - margin + EPS);
                prop_assert!(layout.start_y + layout.grid_height() <= layout.page_height - margin + EPS);
            }
            Err(e) => {
                // Only a margin that eats the whole short side is rejected.
                prop_assert!(matches!(e, RenderError::Layout(_)));
                let (short, _) = paper.dimensions_mm();
                prop_assert!(margin * 2.0 >= short - EPS);
            }
        }
    }

    #[test]
    fn prop_layout_orients_page_with_grid(
        rows in 1usize..=50,
        cols in 1usize..=50,
        is_horizontal in any::<bool>(),
        paper in paper_sizes(),
    ) {
        let config = GridConfig::new(rows, cols, is_horizontal).expect("config");
        let layout = PdfExporter::with_defaults().layout(&config, paper).expect("layout");
        prop_assert_eq!(layout.page_width > layout.page_height, is_horizontal);
    }
}
