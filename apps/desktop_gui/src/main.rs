use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::{backend_bridge::commands::BackendCommand, controller::events::UiEvent};

#[derive(Parser, Debug)]
#[command(name = "expense-tracker-gui", about = "Desktop expense tracker")]
struct Args {
    /// Settings file; defaults to ./expense_tracker.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(load_settings(args.config.as_deref()), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Expense Tracker")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Expense Tracker",
        options,
        Box::new(|_cc| Ok(Box::new(ui::ExpenseTrackerApp::new(cmd_tx, ui_rx)))),
    )
}
