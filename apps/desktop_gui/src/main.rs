use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use clap::Parser;
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use game_core::{load_settings, load_settings_from, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spectrum_gui")]
struct Args {
    /// Settings file; defaults to ./spectrum.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
}

fn resolve_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };
    if let Some(api_url) = &args.api_url {
        settings.api_url = api_url.clone();
    }
    settings.validate()?;
    Ok(settings)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let settings = match resolve_settings(&args) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!("invalid settings, falling back to defaults: {err:#}");
            Settings::default()
        }
    };
    let article_url = settings.article_url();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Spectrum")
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([760.0, 680.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Spectrum",
        options,
        Box::new(move |_cc| {
            let article_url = article_url?;
            Ok(Box::new(ui::SpectrumApp::new(cmd_tx, ui_rx, article_url)))
        }),
    )
}
