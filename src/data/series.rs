use std::collections::{HashMap, VecDeque};

/// Point history of one named measurement: `[t, value]` pairs in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub label: String,
    pub data: VecDeque<[f64; 2]>,
}

impl Series {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            data: VecDeque::new(),
        }
    }

    pub fn push(&mut self, t: f64, value: f64) {
        self.data.push_back([t, value]);
    }

    pub fn prune_by_points(&mut self, max_points: usize) {
        while self.data.len() > max_points {
            self.data.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// All series of the current run, keyed by label and kept in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct PlotState {
    series: HashMap<String, Series>,
    order: Vec<String>,
}

impl PlotState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `[t, value]` to the series `label`, creating it on first sighting.
    pub fn append(&mut self, label: &str, t: f64, value: f64) -> &mut Series {
        let series = self.series.entry(label.to_string()).or_insert_with(|| {
            self.order.push(label.to_string());
            Series::new(label)
        });
        series.push(t, value);
        series
    }

    pub fn get(&self, label: &str) -> Option<&Series> {
        self.series.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.series.contains_key(label)
    }

    /// Drop every series.
    pub fn clear(&mut self) {
        self.series.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.order
    }

    /// Series in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.order.iter().filter_map(|label| self.series.get(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prune_keeps_newest_points() {
        let mut s = Series::new("x(ship)");
        for i in 0..5 {
            s.push(i as f64, i as f64 * 10.0);
        }
        s.prune_by_points(2);
        assert_eq!(s.data, VecDeque::from(vec![[3.0, 30.0], [4.0, 40.0]]));
    }

    #[test]
    fn iteration_follows_first_sighting() {
        let mut state = PlotState::new();
        state.append("b", 0.0, 1.0);
        state.append("a", 0.0, 2.0);
        state.append("b", 1.0, 3.0);
        let labels: Vec<&str> = state.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);
        assert_eq!(state.get("b").map(Series::len), Some(2));
    }
}
