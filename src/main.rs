mod app;
mod chat;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use app::CrossrefApp;
use clap::Parser;
use config::{AppConfig, Cli, Command};
use data::cache::DatasetCache;
use data::compare::{compare, ComparisonOutcome, ComparisonRequest};
use data::export::{to_csv, write_csv};
use eframe::egui;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::from(&cli);

    match cli.command {
        Some(Command::Export {
            models,
            competitors,
            base,
            out,
        }) => export(&config, base, models, competitors, out),
        None => run_gui(config),
    }
}

fn run_gui(config: AppConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Model Cross-Reference",
        options,
        Box::new(|_cc| Ok(Box::new(CrossrefApp::new(config)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}

/// Headless comparison: same engine as the Comparison tab, CSV to a file or stdout.
fn export(
    config: &AppConfig,
    base: Option<String>,
    models: Vec<String>,
    competitors: Vec<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut cache = DatasetCache::new();
    let dataset = cache.get_or_load(&config.loader(), &config.base_column)?;

    let base = base.unwrap_or_else(|| config.base_column.clone());
    let competitors = if competitors.is_empty() {
        dataset
            .columns
            .iter()
            .filter(|c| **c != base)
            .cloned()
            .collect()
    } else {
        competitors
    };

    let request = ComparisonRequest::new(base, models, competitors);
    let result = match compare(&dataset, &request)? {
        ComparisonOutcome::Ready(result) => result,
        ComparisonOutcome::EmptySelection => {
            eprintln!("Nothing selected: pass at least one model and one competitor brand.");
            return Ok(());
        }
        ComparisonOutcome::NoMatch => {
            eprintln!("Warning: no competitor data for the selected models.");
            return Ok(());
        }
    };

    match out {
        Some(path) => write_csv(&result.export, &path)
            .with_context(|| format!("writing {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(&to_csv(&result.export)?)
            .context("writing to stdout")?,
    }
    Ok(())
}
