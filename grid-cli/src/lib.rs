//! # Grid CLI
//!
//! Headless host for the grid designer. Builds a grid from command-line
//! cells or a replayed intent log, then exports it to PDF.
//!
//! ## Usage
//!
//! ```bash
//! grid-cli --rows 10 --cols 12 --cell 0,0,#FF0000,cross --paper A5
//! grid-cli --intents session.json --preview
//! grid-cli --list-symbols
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Validated run settings derived from the arguments
//! - `run` - Builds the `GridState`, resolves the caption language and drives
//!   `PdfExporter`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use grid_core::symbols::{self, SymbolCategory};
use grid_core::{
    load_language, store_language, Cell, FilePreferences, GridError, GridState, HexColor, Intent,
    Language, MemoryPreferences, PaperSize, PreferenceStore, Viewport,
};
use grid_renderer::{
    CanvasRenderer, ExportOptions, ExportOutput, ExportReport, ExportRequest, PdfExporter,
};

/// Command-line arguments for grid-cli.
#[derive(Debug, Clone, Parser)]
#[command(name = "grid-cli")]
#[command(about = "Grid designer: paint a cell grid and export it to PDF")]
#[command(version)]
pub struct CliArgs {
    /// Number of rows (1-50)
    #[arg(long, default_value = "22")]
    pub rows: usize,

    /// Number of columns (1-50)
    #[arg(long, default_value = "33")]
    pub cols: usize,

    /// Lay the page out portrait instead of landscape
    #[arg(long)]
    pub portrait: bool,

    /// Paper size (A3, A4 or A5)
    #[arg(long, env = "GRID_PAPER", default_value = "A4")]
    pub paper: PaperSize,

    /// Paint a cell: `row,col,#RRGGBB[,symbol]` (repeatable)
    #[arg(long = "cell", value_name = "SPEC")]
    pub cells: Vec<CellSpec>,

    /// JSON file holding an array of intents to replay after `--cell`
    #[arg(long, value_name = "FILE")]
    pub intents: Option<PathBuf>,

    /// Build a preview data URL instead of writing a file
    #[arg(long)]
    pub preview: bool,

    /// Directory the PDF is written to
    #[arg(long, env = "GRID_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Caption language (en or ro); stored as the new preference
    #[arg(long)]
    pub language: Option<Language>,

    /// Preference file holding the stored language
    #[arg(long, env = "GRID_PREFS")]
    pub prefs: Option<PathBuf>,

    /// Omit the title and grid info lines
    #[arg(long)]
    pub no_captions: bool,

    /// Also write the on-screen canvas as a PNG
    #[arg(long, value_name = "FILE")]
    pub canvas_png: Option<PathBuf>,

    /// Print the symbol registry and exit
    #[arg(long)]
    pub list_symbols: bool,
}

/// One `--cell` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSpec {
    /// Target row.
    pub row: usize,
    /// Target column.
    pub col: usize,
    /// Content to write.
    pub cell: Cell,
}

impl CellSpec {
    /// The intent that writes this cell.
    #[must_use]
    pub fn to_intent(&self) -> Intent {
        Intent::SetCell {
            row: self.row,
            col: self.col,
            cell: Some(self.cell.clone()),
        }
    }
}

/// A `--cell` argument that does not parse.
#[derive(Debug, thiserror::Error)]
pub enum CellSpecError {
    /// Wrong field count or a non-numeric coordinate.
    #[error("Invalid cell spec {0:?} (expected row,col,#RRGGBB[,symbol])")]
    Malformed(String),

    /// The color field is not a hex color.
    #[error(transparent)]
    Color(#[from] GridError),
}

impl FromStr for CellSpec {
    type Err = CellSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CellSpecError::Malformed(s.to_string());
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let (row, col, color, symbol) = match parts.as_slice() {
            [row, col, color] => (row, col, color, None),
            [row, col, color, symbol] if !symbol.is_empty() => (row, col, color, Some(*symbol)),
            _ => return Err(invalid()),
        };

        let row = row.parse().map_err(|_| invalid())?;
        let col = col.parse().map_err(|_| invalid())?;
        let color = HexColor::parse(color)?;
        let cell = match symbol {
            Some(id) => Cell::with_symbol(color, id),
            None => Cell::filled(color),
        };
        Ok(Self { row, col, cell })
    }
}

/// Validated run settings.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Initial row count.
    pub rows: usize,
    /// Initial column count.
    pub cols: usize,
    /// Initial orientation.
    pub is_horizontal: bool,
    /// Paper selected before intents run.
    pub paper: PaperSize,
    /// Cells written before intents run.
    pub cells: Vec<CellSpec>,
    /// Intent log to replay.
    pub intents: Option<PathBuf>,
    /// Preview instead of download.
    pub preview: bool,
    /// Download target directory.
    pub output_dir: PathBuf,
    /// Language override.
    pub language: Option<Language>,
    /// Preference file; in-memory preferences when absent.
    pub prefs: Option<PathBuf>,
    /// Print captions.
    pub captions: bool,
    /// Canvas PNG target.
    pub canvas_png: Option<PathBuf>,
    /// List symbols only.
    pub list_symbols: bool,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            rows: args.rows,
            cols: args.cols,
            is_horizontal: !args.portrait,
            paper: args.paper,
            cells: args.cells,
            intents: args.intents,
            preview: args.preview,
            output_dir: args.output_dir,
            language: args.language,
            prefs: args.prefs,
            captions: !args.no_captions,
            canvas_png: args.canvas_png,
            list_symbols: args.list_symbols,
        }
    }
}

/// Result of one run.
#[derive(Debug)]
pub enum RunOutcome {
    /// The symbol listing.
    Listed(String),
    /// A PDF written to disk.
    Written {
        /// Path of the new file.
        path: PathBuf,
        /// What was drawn.
        report: ExportReport,
    },
    /// A preview built in memory.
    Previewed {
        /// The `data:` URL.
        data_url: String,
        /// What was drawn.
        report: ExportReport,
    },
}

/// Read a JSON array of intents.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not an intent array.
pub fn load_intents(path: &Path) -> anyhow::Result<Vec<Intent>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read intents from {}", path.display()))?;
    let intents = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid intent log {}", path.display()))?;
    Ok(intents)
}

/// Build the grid described by `config`.
///
/// # Errors
///
/// Returns an error for invalid dimensions, out-of-range cells or a bad
/// intent log.
pub fn build_state(config: &CliConfig) -> anyhow::Result<GridState> {
    let mut state = GridState::new(config.rows, config.cols, config.is_horizontal)?;
    state.apply(Intent::SelectPaper {
        paper: config.paper,
    })?;
    state.apply_all(config.cells.iter().map(CellSpec::to_intent))?;

    if let Some(path) = &config.intents {
        let intents = load_intents(path)?;
        tracing::info!("Replaying {} intents from {}", intents.len(), path.display());
        state.apply_all(intents)?;
    }
    Ok(state)
}

/// Caption language: the override (which is then stored) or the stored one.
///
/// # Errors
///
/// Returns an error if an override cannot be stored.
pub fn resolve_language(
    store: &dyn PreferenceStore,
    requested: Option<Language>,
) -> anyhow::Result<Language> {
    match requested {
        Some(language) => {
            store_language(store, language).context("Failed to store language preference")?;
            Ok(language)
        }
        None => Ok(load_language(store)),
    }
}

/// Registry listing grouped by category.
#[must_use]
pub fn symbol_listing() -> String {
    let mut out = String::new();
    for category in [
        SymbolCategory::Stitches,
        SymbolCategory::Shapes,
        SymbolCategory::Arrows,
        SymbolCategory::Marks,
        SymbolCategory::Misc,
    ] {
        let _ = writeln!(out, "{category:?}:");
        for symbol in symbols::category(category) {
            let paint = if symbol.is_filled() { "fill" } else { "stroke" };
            let _ = writeln!(out, "  {:<16} {paint}", symbol.id);
        }
    }
    out
}

/// Run the CLI against `config`, stamping file names with `now`.
///
/// # Errors
///
/// Returns an error if the grid cannot be built, the export fails or the
/// output cannot be written.
pub async fn run(config: &CliConfig, now: DateTime<Utc>) -> anyhow::Result<RunOutcome> {
    if config.list_symbols {
        return Ok(RunOutcome::Listed(symbol_listing()));
    }

    let state = build_state(config)?;

    let store: Box<dyn PreferenceStore> = match &config.prefs {
        Some(path) => Box::new(FilePreferences::new(path)),
        None => Box::new(MemoryPreferences::new()),
    };
    let language = resolve_language(store.as_ref(), config.language)?;

    if let Some(path) = &config.canvas_png {
        let frame = CanvasRenderer::new(Viewport::unconstrained())
            .render(state.matrix(), state.config())?;
        let png = frame.pixmap.encode_png().context("Failed to encode canvas")?;
        std::fs::write(path, png)
            .with_context(|| format!("Failed to write canvas to {}", path.display()))?;
        tracing::info!("Wrote canvas to {}", path.display());
    }

    let exporter = PdfExporter::new(ExportOptions {
        captions: config.captions,
        language,
        ..ExportOptions::default()
    });
    let request = if config.preview {
        ExportRequest::preview(state.paper(), now)
    } else {
        ExportRequest::download(state.paper(), now)
    };
    let artifact = exporter
        .export(state.matrix(), state.config(), &request)
        .await?;

    match artifact.output {
        ExportOutput::Download { filename, bytes } => {
            std::fs::create_dir_all(&config.output_dir).with_context(|| {
                format!("Failed to create {}", config.output_dir.display())
            })?;
            let path = config.output_dir.join(filename);
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(RunOutcome::Written {
                path,
                report: artifact.report,
            })
        }
        ExportOutput::Preview { data_url } => Ok(RunOutcome::Previewed {
            data_url,
            report: artifact.report,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn args(argv: &[&str]) -> CliConfig {
        let mut full = vec!["grid-cli"];
        full.extend_from_slice(argv);
        CliConfig::from(CliArgs::try_parse_from(full).expect("parse args"))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 7, 8, 9, 10)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn test_cell_spec_parsing() {
        let plain: CellSpec = "2, 3, #ff0000".parse().expect("plain cell");
        assert_eq!((plain.row, plain.col), (2, 3));
        assert_eq!(plain.cell.color.as_str(), "#FF0000");
        assert!(!plain.cell.has_symbol());

        let symbol: CellSpec = "0,0,#00FF00,cross".parse().expect("symbol cell");
        assert_eq!(symbol.cell.symbol.as_deref(), Some("cross"));

        assert!("1,2".parse::<CellSpec>().is_err());
        assert!("a,2,#000000".parse::<CellSpec>().is_err());
        assert!("1,2,red".parse::<CellSpec>().is_err());
        assert!("1,2,#000000,".parse::<CellSpec>().is_err());
    }

    #[test]
    fn test_defaults_match_grid_defaults() {
        let config = args(&[]);
        assert_eq!((config.rows, config.cols), (22, 33));
        assert!(config.is_horizontal);
        assert!(config.captions);
        assert_eq!(config.paper, PaperSize::A4);
    }

    #[test]
    fn test_build_state_applies_cells_then_intents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = dir.path().join("intents.json");
        std::fs::write(
            &log,
            r##"[{"intent":"select_color","color":"#0000FF"},{"intent":"edit_cell","row":1,"col":1},{"intent":"toggle_orientation"}]"##,
        )
        .expect("write log");

        let log_arg = log.to_string_lossy().to_string();
        let config = args(&[
            "--rows", "2", "--cols", "3", "--cell", "0,2,#FF0000", "--intents", &log_arg,
        ]);
        let state = build_state(&config).expect("state");

        assert_eq!((state.config().rows, state.config().cols), (3, 2));
        assert!(!state.config().is_horizontal);
        assert_eq!(
            state.matrix().get(2, 0).map(|c| c.color.as_str()),
            Some("#FF0000")
        );
        assert_eq!(
            state.matrix().get(1, 1).map(|c| c.color.as_str()),
            Some("#0000FF")
        );
    }

    #[test]
    fn test_build_state_rejects_out_of_range_cell() {
        let config = args(&["--rows", "2", "--cols", "2", "--cell", "5,0,#000000"]);
        assert!(build_state(&config).is_err());
    }

    #[test]
    fn test_language_override_is_persisted() {
        let store = MemoryPreferences::new();
        assert_eq!(resolve_language(&store, None).expect("load"), Language::Ro);
        assert_eq!(
            resolve_language(&store, Some(Language::En)).expect("store"),
            Language::En
        );
        assert_eq!(resolve_language(&store, None).expect("load"), Language::En);
    }

    #[test]
    fn test_symbol_listing_covers_registry() {
        let listing = symbol_listing();
        for symbol in symbols::all() {
            assert!(listing.contains(symbol.id), "{} missing", symbol.id);
        }
        assert!(listing.starts_with("Stitches:"));
    }

    #[tokio::test]
    async fn test_run_writes_named_pdf() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().to_string_lossy().to_string();
        let png = dir.path().join("canvas.png");
        let png_arg = png.to_string_lossy().to_string();
        let config = args(&[
            "--rows", "3", "--cols", "4", "--paper", "a5", "--cell", "1,1,#112233,heart",
            "--output-dir", &out, "--canvas-png", &png_arg,
        ]);

        match run(&config, now()).await.expect("run") {
            RunOutcome::Written { path, report } => {
                assert_eq!(
                    path.file_name().and_then(|n| n.to_str()),
                    Some("grid_symbols_3x4_A5_landscape_2025-06-07T08-09-10.pdf")
                );
                let bytes = std::fs::read(&path).expect("read pdf");
                assert!(bytes.starts_with(b"%PDF"));
                assert_eq!(report.filled_cells, 1);
                assert_eq!(report.embedded.len(), 1);
            }
            other => panic!("expected a written file, got {other:?}"),
        }
        let png_bytes = std::fs::read(&png).expect("read png");
        assert!(png_bytes.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn test_run_preview_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("out");
        let out_arg = out.to_string_lossy().to_string();
        let config = args(&["--rows", "2", "--cols", "2", "--preview", "--output-dir", &out_arg]);

        match run(&config, now()).await.expect("run") {
            RunOutcome::Previewed { data_url, report } => {
                assert!(data_url.starts_with("data:application/pdf;base64,"));
                assert_eq!(report.filled_cells, 0);
            }
            other => panic!("expected a preview, got {other:?}"),
        }
        assert!(!out.exists());
    }
}
