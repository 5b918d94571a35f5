//! The stateful plotter: accumulate samples, detect restarts, trigger redraws.
//!
//! [`Plotter::ingest`] handles one sample in three steps:
//!
//! 1. If the sample has a time `t`, check it against the last accepted time.
//!    A regression means the stream restarted and all series are dropped.
//! 2. Append `[t, value]` to the series of every field, creating series on
//!    first sighting, then ask the [`ChartWidget`] to redraw the selected series.
//! 3. If the sample carries a `waves` payload, decode it and log the elevations.
//!
//! Nothing in here fails the whole sample. Problems are reported through
//! [`IngestReport`] and the `log` facade.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::PlotterConfig;
use crate::data::restart::{RestartDetector, StreamState};
use crate::data::sample::{FieldError, Sample, SampleError, WavesPayload};
use crate::data::series::{PlotState, Series};
use crate::decode::{Base91Float32, DecodeError, WaveDecoder};
use crate::sink::PlotterCommand;

/// Series handed to a chart for drawing, in the `{label, data, color}` shape.
///
/// Borrows the accumulated points; a chart copies only what it needs to keep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderSeries<'a> {
    pub label: &'a str,
    pub data: &'a VecDeque<[f64; 2]>,
    /// Palette index chosen by the plotter configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<usize>,
}

impl<'a> From<&'a Series> for RenderSeries<'a> {
    fn from(series: &'a Series) -> Self {
        Self {
            label: &series.label,
            data: &series.data,
            color: None,
        }
    }
}

/// A chart that can be asked to redraw itself with a list of series.
pub trait ChartWidget {
    fn redraw(&mut self, series: &[RenderSeries<'_>]);
}

/// What happened on the render side of one ingestion.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RenderOutcome {
    /// The sample had no time, so nothing was accumulated or drawn.
    #[default]
    Skipped,
    Redrawn { label: String, points: usize },
    /// The selected series has not arrived in this run yet.
    SeriesNotFound { label: String },
}

/// Diagnostics for one ingested sample.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// `None` when the sample had no time.
    pub stream: Option<StreamState>,
    /// Points appended across all series.
    pub appended: usize,
    pub diagnostics: Vec<FieldError>,
    pub render: RenderOutcome,
    /// Result of the wave decode hook, if the sample carried waves.
    pub waves: Option<Result<Vec<f32>, DecodeError>>,
}

impl IngestReport {
    pub fn restarted(&self) -> bool {
        self.stream == Some(StreamState::Reset)
    }

    pub fn redrawn(&self) -> bool {
        matches!(self.render, RenderOutcome::Redrawn { .. })
    }
}

/// Running totals since the plotter was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotterStats {
    pub samples: u64,
    pub restarts: u64,
    pub redraws: u64,
    pub field_errors: u64,
}

pub struct Plotter<C> {
    state: PlotState,
    detector: RestartDetector,
    selected: String,
    color: Option<usize>,
    max_points: Option<usize>,
    chart: C,
    decoder: Box<dyn WaveDecoder>,
    stats: PlotterStats,
}

impl<C: ChartWidget> Plotter<C> {
    pub fn new(chart: C) -> Self {
        Self::with_config(chart, &PlotterConfig::default())
    }

    pub fn with_config(chart: C, cfg: &PlotterConfig) -> Self {
        Self {
            state: PlotState::new(),
            detector: RestartDetector::new(cfg.restart),
            selected: cfg.selector.label(),
            color: cfg.color,
            max_points: cfg.max_points,
            chart,
            decoder: Box::new(Base91Float32),
            stats: PlotterStats::default(),
        }
    }

    /// Replace the decoder used for `waves` payloads.
    pub fn with_decoder<D: WaveDecoder + 'static>(mut self, decoder: D) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn state(&self) -> &PlotState {
        &self.state
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn stats(&self) -> PlotterStats {
        self.stats
    }

    pub fn latest_t(&self) -> Option<f64> {
        self.detector.latest_t()
    }

    /// Label of the series that gets drawn.
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Change the drawn series. Takes effect on the next ingested sample.
    pub fn select<S: Into<String>>(&mut self, label: S) {
        self.selected = label.into();
    }

    /// Discard every series and forget the last sample time.
    pub fn reset(&mut self) {
        self.state.clear();
        self.detector.forget();
    }

    /// Parse a YAML/JSON document and ingest it.
    ///
    /// Only a document that is not a mapping at all is rejected; bad entries
    /// inside the mapping end up in [`IngestReport::diagnostics`].
    pub fn ingest_str(&mut self, text: &str) -> Result<IngestReport, SampleError> {
        let parsed = Sample::parse(text)?;
        for err in &parsed.diagnostics {
            warn!("skipping field: {err}");
        }
        let mut report = self.ingest(&parsed.sample);
        self.stats.field_errors += parsed.diagnostics.len() as u64;
        report.diagnostics.extend(parsed.diagnostics);
        Ok(report)
    }

    pub fn ingest(&mut self, sample: &Sample) -> IngestReport {
        let mut report = IngestReport::default();
        self.stats.samples += 1;

        match sample.t {
            Some(t) if !t.is_finite() => {
                warn!("sample time {t} is not finite; plot left untouched");
                report.diagnostics.push(FieldError::InvalidTime);
                self.stats.field_errors += 1;
            }
            Some(t) => {
                let stream = self.detector.check(t);
                if stream == StreamState::Reset {
                    info!(
                        "time went back from {:?} to {t}; restarting plot",
                        self.detector.latest_t()
                    );
                    self.state.clear();
                    self.stats.restarts += 1;
                }
                report.stream = Some(stream);
                report.appended = self.accumulate(t, sample);
                self.detector.observe(t);
                report.render = self.render();
            }
            None => debug!("sample without time; plot left untouched"),
        }

        if let Some(waves) = &sample.waves {
            report.waves = Some(self.decode_waves(waves));
        }
        report
    }

    /// Apply one channel command. `Reset` yields no report.
    pub fn apply(&mut self, cmd: PlotterCommand) -> Option<IngestReport> {
        match cmd {
            PlotterCommand::Sample(sample) => Some(self.ingest(&sample)),
            PlotterCommand::Text(text) => match self.ingest_str(&text) {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!("dropping sample: {e}");
                    None
                }
            },
            PlotterCommand::Reset => {
                self.reset();
                None
            }
        }
    }

    /// Apply every queued command without blocking. Returns how many were applied.
    pub fn drain_commands(&mut self, rx: &Receiver<PlotterCommand>) -> usize {
        let mut applied = 0;
        while let Ok(cmd) = rx.try_recv() {
            self.apply(cmd);
            applied += 1;
        }
        applied
    }

    /// All series of the current run as a JSON array of `{label, data}`.
    pub fn export_json(&self) -> serde_json::Result<String> {
        let all: Vec<RenderSeries> = self.state.iter().map(RenderSeries::from).collect();
        serde_json::to_string(&all)
    }

    fn accumulate(&mut self, t: f64, sample: &Sample) -> usize {
        for field in &sample.fields {
            let label = field.name.to_string();
            let series = self.state.append(&label, t, field.value);
            if let Some(max) = self.max_points {
                series.prune_by_points(max);
            }
        }
        debug!("t={t}: appended {} points", sample.fields.len());
        sample.fields.len()
    }

    fn render(&mut self) -> RenderOutcome {
        let Some(series) = self.state.get(&self.selected) else {
            warn!("series {} not received yet; skipping redraw", self.selected);
            return RenderOutcome::SeriesNotFound {
                label: self.selected.clone(),
            };
        };
        let selected = RenderSeries {
            color: self.color,
            ..RenderSeries::from(series)
        };
        let points = series.len();
        self.chart.redraw(&[selected]);
        self.stats.redraws += 1;
        RenderOutcome::Redrawn {
            label: self.selected.clone(),
            points,
        }
    }

    fn decode_waves(&self, waves: &WavesPayload) -> Result<Vec<f32>, DecodeError> {
        let decoded = self.decoder.decode(&waves.z);
        match &decoded {
            Ok(z) => info!("waves: {} elevations {:?}", z.len(), z),
            Err(e) => warn!("cannot decode waves: {e}"),
        }
        decoded
    }
}
