//! Top-level entry point for running the viewer as a native window.

use eframe::egui;

use crate::config::PlotterConfig;
use crate::sink::PlotterCommand;

use super::LivePlotApp;

/// Open a native window plotting the commands received on `rx`.
///
/// Blocks until the window is closed.
pub fn run_plotter(
    rx: std::sync::mpsc::Receiver<PlotterCommand>,
    cfg: PlotterConfig,
) -> eframe::Result<()> {
    let app = LivePlotApp::new(rx, &cfg);
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(cfg.title.clone())
            .with_inner_size(egui::vec2(cfg.window.width, cfg.window.height)),
        ..Default::default()
    };
    eframe::run_native(&cfg.title, opts, Box::new(|_cc| Ok(Box::new(app))))
}
