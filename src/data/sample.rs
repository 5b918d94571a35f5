//! Typed telemetry samples and their parsing from YAML/JSON documents.
//!
//! A sample arrives as one mapping such as
//! `{t: 0.5, "x(ship)": 1.2, "z(ship)": -0.3, waves: {z: "..."}}`.
//! Parsing validates every entry and turns the ones that cannot be plotted into
//! [`FieldError`] diagnostics instead of failing the whole sample.

use std::fmt;

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Name of the time field carried by every plottable sample.
pub const TIME_FIELD: &str = "t";
/// Name of the optional field holding encoded wave elevations.
pub const WAVES_FIELD: &str = "waves";

/// Errors that reject a sample document as a whole.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("yaml error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("sample is not a mapping")]
    NotAMapping,
}

/// Problems with a single entry of a sample. These never abort ingestion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("field `{name}` is not numeric")]
    NonNumeric { name: String },
    #[error("key {key} is not a valid series name")]
    InvalidName { key: String },
    #[error("time field `t` is not a finite number")]
    InvalidTime,
    #[error("`waves` field is malformed: {reason}")]
    InvalidWaves { reason: String },
}

/// A series identifier of the form `variable(entity)`.
///
/// The entity part may itself contain commas or parentheses, e.g.
/// `Fx(gravity,ship,ship)`. Names without a parenthesized suffix are kept as a
/// bare variable. `to_string()` always reproduces the original field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesName {
    pub variable: String,
    pub entity: Option<String>,
}

impl SeriesName {
    pub fn new<V: Into<String>, E: Into<String>>(variable: V, entity: E) -> Self {
        Self {
            variable: variable.into(),
            entity: Some(entity.into()),
        }
    }

    /// Split a field name into variable and entity. Returns `None` for empty names.
    pub fn parse(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }
        if let Some(inner) = name.strip_suffix(')') {
            if let Some(open) = inner.find('(') {
                return Some(Self {
                    variable: inner[..open].to_string(),
                    entity: Some(inner[open + 1..].to_string()),
                });
            }
        }
        Some(Self {
            variable: name.to_string(),
            entity: None,
        })
    }
}

impl fmt::Display for SeriesName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entity {
            Some(entity) => write!(f, "{}({})", self.variable, entity),
            None => f.write_str(&self.variable),
        }
    }
}

/// One numeric measurement of a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: SeriesName,
    pub value: f64,
}

/// Encoded wave payload attached to a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavesPayload {
    /// basE91 encoded little-endian `f32` elevations.
    pub z: String,
}

/// A validated telemetry record.
///
/// `t` is `None` when the document had no usable time; such samples never
/// touch the plot state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub t: Option<f64>,
    pub fields: Vec<Field>,
    pub waves: Option<WavesPayload>,
}

/// Result of parsing a sample document: the usable part plus per-field diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSample {
    pub sample: Sample,
    pub diagnostics: Vec<FieldError>,
}

impl Sample {
    /// Sample at time `t` with no fields yet.
    pub fn at(t: f64) -> Self {
        Self {
            t: Some(t),
            ..Default::default()
        }
    }

    /// Builder: add a field. `name` is split with [`SeriesName::parse`].
    pub fn with(mut self, name: &str, value: f64) -> Self {
        let name = SeriesName::parse(name).unwrap_or_else(|| SeriesName {
            variable: String::new(),
            entity: None,
        });
        self.fields.push(Field { name, value });
        self
    }

    /// Builder: attach an encoded wave payload.
    pub fn with_waves<S: Into<String>>(mut self, z: S) -> Self {
        self.waves = Some(WavesPayload { z: z.into() });
        self
    }

    /// Value of the field whose full name is `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|f| f.name.to_string() == name)
            .map(|f| f.value)
    }

    /// Parse one YAML (or JSON) document.
    pub fn parse(text: &str) -> Result<ParsedSample, SampleError> {
        let value: Value = serde_yaml::from_str(text)?;
        match value {
            Value::Mapping(map) => Ok(Self::from_mapping(&map)),
            _ => Err(SampleError::NotAMapping),
        }
    }

    /// Validate an already decoded mapping, keeping the field order of the document.
    pub fn from_mapping(map: &Mapping) -> ParsedSample {
        let mut parsed = ParsedSample::default();
        for (key, value) in map {
            let key = match key.as_str() {
                Some(k) => k,
                None => {
                    parsed.diagnostics.push(FieldError::InvalidName {
                        key: format!("{:?}", key),
                    });
                    continue;
                }
            };
            match key {
                TIME_FIELD => match as_number(value).filter(|t| t.is_finite()) {
                    Some(t) => parsed.sample.t = Some(t),
                    None => parsed.diagnostics.push(FieldError::InvalidTime),
                },
                WAVES_FIELD => match parse_waves(value) {
                    Ok(waves) => parsed.sample.waves = Some(waves),
                    Err(e) => parsed.diagnostics.push(e),
                },
                _ => {
                    let Some(name) = SeriesName::parse(key) else {
                        parsed.diagnostics.push(FieldError::InvalidName {
                            key: format!("{:?}", key),
                        });
                        continue;
                    };
                    match as_number(value) {
                        Some(value) => parsed.sample.fields.push(Field { name, value }),
                        None => parsed.diagnostics.push(FieldError::NonNumeric {
                            name: key.to_string(),
                        }),
                    }
                }
            }
        }
        parsed
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn parse_waves(value: &Value) -> Result<WavesPayload, FieldError> {
    let Value::Mapping(map) = value else {
        return Err(FieldError::InvalidWaves {
            reason: "expected a mapping".to_string(),
        });
    };
    match map.get("z") {
        Some(Value::String(z)) => Ok(WavesPayload { z: z.clone() }),
        Some(_) => Err(FieldError::InvalidWaves {
            reason: "`z` is not a string".to_string(),
        }),
        None => Err(FieldError::InvalidWaves {
            reason: "missing `z`".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_name_keeps_original_text() {
        for name in ["z(Anthineas)", "Fx(gravity,ship,ship)", "qr", "a(b(c))", "x(ship"] {
            let parsed = SeriesName::parse(name).unwrap();
            assert_eq!(parsed.to_string(), name);
        }
    }

    #[test]
    fn series_name_splits_variable_and_entity() {
        let parsed = SeriesName::parse("Fx(gravity,ship,ship)").unwrap();
        assert_eq!(parsed.variable, "Fx");
        assert_eq!(parsed.entity.as_deref(), Some("gravity,ship,ship"));
        assert!(SeriesName::parse("").is_none());
    }

    #[test]
    fn waves_without_z_is_reported() {
        let value: Value = serde_yaml::from_str("{x: 1}").unwrap();
        assert!(matches!(
            parse_waves(&value),
            Err(FieldError::InvalidWaves { .. })
        ));
    }
}
