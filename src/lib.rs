//! Realtime plotter crate root: re-exports and module wiring.
//!
//! Telemetry samples (`t` plus named values such as `z(ship)`) are accumulated
//! into one point series per field. When time jumps backward the stream is
//! considered restarted and the series start over. After every sample the
//! selected series is handed to a chart widget for redraw.
//!
//! - `data`: samples, series, restart detection
//! - `plotter`: the stateful ingestion loop and the `ChartWidget` seam
//! - `decode`: basE91 float decoder for wave payloads
//! - `sink`: channel to feed samples from another thread
//! - `config`: plotter and window configuration
//! - `app`: native egui viewer

pub mod app;
pub mod config;
pub mod data;
pub mod decode;
pub mod plotter;
pub mod sink;

pub use app::{run_plotter, LivePlotApp, PlotTrace, PlotView};
pub use config::{ConfigError, PlotterConfig, SeriesSelector, WindowSize};
pub use data::restart::{RestartDetector, RestartPolicy, StreamState};
pub use data::sample::{Field, FieldError, ParsedSample, Sample, SampleError, SeriesName, WavesPayload};
pub use data::series::{PlotState, Series};
pub use decode::{Base91Float32, DecodeError, WaveDecoder};
pub use plotter::{ChartWidget, IngestReport, Plotter, PlotterStats, RenderOutcome, RenderSeries};
pub use sink::{channel_samples, feed_documents, PlotterCommand, SampleSink};
