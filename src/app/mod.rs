//! Native viewer: an eframe window showing the plotter's chart.
//!
//! | Sub-module | Responsibility |
//! | ---------- | -------------- |
//! | [`view`]   | [`PlotView`] chart widget drawn with `egui_plot` |
//! | [`run`]    | [`run_plotter()`] entry point |

mod run;
mod view;

pub use run::run_plotter;
pub use view::{series_color, PlotTrace, PlotView};

use std::sync::mpsc::Receiver;
use std::time::Duration;

use eframe::egui;

use crate::config::PlotterConfig;
use crate::plotter::Plotter;
use crate::sink::PlotterCommand;

/// Standalone eframe application wrapping a [`Plotter`] and its [`PlotView`].
pub struct LivePlotApp {
    rx: Receiver<PlotterCommand>,
    plotter: Plotter<PlotView>,
}

impl LivePlotApp {
    pub fn new(rx: Receiver<PlotterCommand>, cfg: &PlotterConfig) -> Self {
        Self {
            rx,
            plotter: Plotter::with_config(PlotView::new(), cfg),
        }
    }

    fn status_bar(&mut self, ui: &mut egui::Ui) {
        let stats = self.plotter.stats();
        ui.horizontal(|ui| {
            ui.label(format!("series: {}", self.plotter.selected()));
            ui.separator();
            match self.plotter.latest_t() {
                Some(t) => ui.label(format!("t = {t:.3}")),
                None => ui.label("waiting for samples"),
            };
            ui.separator();
            ui.label(format!(
                "samples {} | restarts {} | field errors {}",
                stats.samples, stats.restarts, stats.field_errors
            ));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear").clicked() {
                    self.plotter.reset();
                }
            });
        });
    }
}

impl eframe::App for LivePlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.plotter.drain_commands(&self.rx);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.plotter.chart().show(ui));

        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
