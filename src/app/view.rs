//! `PlotView`: the egui chart widget that redraw requests land in.

use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints};

use crate::plotter::{ChartWidget, RenderSeries};

/// Points of one drawn series, kept between redraws.
#[derive(Debug, Clone, Default)]
pub struct PlotTrace {
    pub label: String,
    pub color: Option<usize>,
    pub points: Vec<PlotPoint>,
}

impl PlotTrace {
    /// Bring the cached points in line with `series`.
    ///
    /// A series that only grew at the back is extended in place; anything else
    /// (restart, pruned front, other label) rebuilds the cache.
    fn sync(&mut self, series: &RenderSeries<'_>) {
        self.color = series.color;
        let same = |cached: Option<&PlotPoint>, point: Option<&[f64; 2]>| match (cached, point) {
            (Some(c), Some(&[x, y])) => c.x == x && c.y == y,
            (None, _) => true,
            (Some(_), None) => false,
        };
        let known = self.points.len();
        let grew = self.label == series.label
            && series.data.len() >= known
            && same(self.points.first(), series.data.front())
            && same(self.points.last(), known.checked_sub(1).and_then(|i| series.data.get(i)));
        if !grew {
            self.label = series.label.to_string();
            self.points.clear();
        }
        let known = self.points.len();
        self.points
            .extend(series.data.iter().skip(known).map(|&[x, y]| PlotPoint::new(x, y)));
    }
}

/// Keeps the series of the latest redraw request and paints them with `egui_plot`.
#[derive(Debug, Default)]
pub struct PlotView {
    traces: Vec<PlotTrace>,
    redraws: u64,
}

impl ChartWidget for PlotView {
    fn redraw(&mut self, series: &[RenderSeries<'_>]) {
        self.traces.resize_with(series.len(), PlotTrace::default);
        for (trace, s) in self.traces.iter_mut().zip(series) {
            trace.sync(s);
        }
        self.redraws += 1;
    }
}

impl PlotView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traces(&self) -> &[PlotTrace] {
        &self.traces
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        Plot::new("realtime_plot")
            .legend(Legend::default())
            .x_axis_label("t [s]")
            .show(ui, |plot_ui| {
                for (idx, tr) in self.traces.iter().enumerate() {
                    let color = series_color(tr.color.unwrap_or(idx));
                    plot_ui.line(
                        Line::new(tr.label.as_str(), PlotPoints::Borrowed(&tr.points))
                            .color(color)
                            .width(1.5),
                    );
                }
            });
    }
}

/// Distinct color for a palette index.
pub fn series_color(index: usize) -> egui::Color32 {
    const PALETTE: [egui::Color32; 10] = [
        egui::Color32::from_rgb(31, 119, 180),
        egui::Color32::from_rgb(255, 127, 14),
        egui::Color32::from_rgb(44, 160, 44),
        egui::Color32::from_rgb(214, 39, 40),
        egui::Color32::from_rgb(148, 103, 189),
        egui::Color32::from_rgb(140, 86, 75),
        egui::Color32::from_rgb(227, 119, 194),
        egui::Color32::from_rgb(127, 127, 127),
        egui::Color32::from_rgb(188, 189, 34),
        egui::Color32::from_rgb(23, 190, 207),
    ];
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    fn xy(view: &PlotView) -> Vec<[f64; 2]> {
        view.traces()[0].points.iter().map(|p| [p.x, p.y]).collect()
    }

    fn redraw(view: &mut PlotView, label: &str, data: &VecDeque<[f64; 2]>) {
        view.redraw(&[RenderSeries {
            label,
            data,
            color: Some(1),
        }]);
    }

    #[test]
    fn growing_series_is_extended() {
        let mut view = PlotView::new();
        let mut data = VecDeque::from(vec![[0.0, 1.0]]);
        redraw(&mut view, "z(ship)", &data);
        data.push_back([1.0, 2.0]);
        redraw(&mut view, "z(ship)", &data);

        assert_eq!(xy(&view), vec![[0.0, 1.0], [1.0, 2.0]]);
        assert_eq!(view.traces()[0].color, Some(1));
        assert_eq!(view.redraws(), 2);
    }

    #[test]
    fn restarted_or_pruned_series_is_rebuilt() {
        let mut view = PlotView::new();
        redraw(&mut view, "z(ship)", &VecDeque::from(vec![[0.0, 1.0], [1.0, 2.0]]));

        // pruned front, same length
        redraw(&mut view, "z(ship)", &VecDeque::from(vec![[1.0, 2.0], [2.0, 3.0]]));
        assert_eq!(xy(&view), vec![[1.0, 2.0], [2.0, 3.0]]);

        // restart: fewer points
        redraw(&mut view, "z(ship)", &VecDeque::from(vec![[0.5, 9.0]]));
        assert_eq!(xy(&view), vec![[0.5, 9.0]]);

        // other series selected
        redraw(&mut view, "x(ship)", &VecDeque::from(vec![[0.5, 9.0], [0.6, 1.0]]));
        assert_eq!(view.traces()[0].label, "x(ship)");
        assert_eq!(xy(&view), vec![[0.5, 9.0], [0.6, 1.0]]);
    }
}
