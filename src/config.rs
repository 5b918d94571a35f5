//! Configuration for the plotter and the native viewer.
//!
//! Every field has a default, so a YAML file only needs the keys it changes:
//!
//! ```yaml
//! title: Ship motions
//! selector: { variable: z, entity: Anthineas }
//! color: 1
//! restart: strict        # or non_increasing
//! max_points: 3000
//! window: { width: 1200, height: 700 }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::restart::RestartPolicy;
use crate::data::sample::SeriesName;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Chooses the series that gets drawn: `variable(entity)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSelector {
    pub variable: String,
    pub entity: String,
}

impl Default for SeriesSelector {
    fn default() -> Self {
        Self::new("z", "Anthineas")
    }
}

impl SeriesSelector {
    pub fn new<V: Into<String>, E: Into<String>>(variable: V, entity: E) -> Self {
        Self {
            variable: variable.into(),
            entity: entity.into(),
        }
    }

    pub fn series_name(&self) -> SeriesName {
        SeriesName::new(self.variable.clone(), self.entity.clone())
    }

    /// Label of the selected series, e.g. `z(Anthineas)`.
    pub fn label(&self) -> String {
        self.series_name().to_string()
    }
}

/// Initial native window size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 900.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterConfig {
    /// Window title.
    pub title: String,
    pub selector: SeriesSelector,
    /// Palette index attached to the rendered series. `None` lets the chart pick.
    pub color: Option<usize>,
    pub restart: RestartPolicy,
    /// Keep at most this many points per series. `None` keeps the whole run.
    pub max_points: Option<usize>,
    pub window: WindowSize,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            title: "Realtime plot".to_string(),
            selector: SeriesSelector::default(),
            color: Some(1),
            restart: RestartPolicy::default(),
            max_points: None,
            window: WindowSize::default(),
        }
    }
}

impl PlotterConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }
}
