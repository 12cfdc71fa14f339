//! # Grid CLI
//!
//! Paints a grid from flags or a replayed intent log and exports it to PDF.
//!
//! ## Environment Variables
//!
//! - `GRID_PAPER`: Default paper size (default: A4)
//! - `GRID_OUTPUT_DIR`: Directory for downloads (default: .)
//! - `GRID_PREFS`: Preference file holding the caption language
//! - `RUST_LOG`: Log filter (default: `info` for the grid crates)
//! - `RUST_LOG_FORMAT`: Set to `json` for structured logs

use clap::Parser;
use grid_cli::{run, CliArgs, CliConfig, RunOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("grid_cli=info,grid_renderer=info,grid_core=info"));

    // Logs go to stderr; stdout carries the listing and the report.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = CliConfig::from(args);

    tracing::debug!(
        "Grid {}x{} ({}), paper {}",
        config.rows,
        config.cols,
        if config.is_horizontal { "landscape" } else { "portrait" },
        config.paper
    );

    match run(&config, chrono::Utc::now()).await? {
        RunOutcome::Listed(listing) => print!("{listing}"),
        RunOutcome::Written { path, report } => {
            tracing::info!("Wrote {}", path.display());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        RunOutcome::Previewed { data_url, report } => {
            tracing::info!("Preview ready ({} bytes)", data_url.len());
            println!("{}", serde_json::to_string_pretty(&report)?);
            println!("{data_url}");
        }
    }

    Ok(())
}
