use std::collections::{BTreeMap, HashSet};

use serde::{Serialize, Deserialize};

use crate::config::palette::{HighlightColors, Palette};
use crate::error::{DashboardError, Result};

/// Everything a `TrainingDashboard` needs to know up front.
///
/// # Fields
/// - `validation`       : whether the training loop reports `val_*` values;
///                         when false no validation lines or columns exist
/// - `min_loss`         : pins the bottom of every loss axis (auto if `None`)
/// - `max_loss`         : pins the top of every loss axis (auto if `None`)
/// - `metrics`          : ordered metric names; only the first one is drawn
///                         on the live intra-epoch chart
/// - `min_metric_bounds`: per-metric y-axis minimum; absent keys auto-scale
/// - `max_metric_bounds`: per-metric y-axis maximum; absent keys auto-scale
/// - `batch_step`       : the live chart takes a point every `batch_step`
///                         batches; small values slow training down
/// - `palette`          : line colors
/// - `highlight`        : table min/max cell colors
///
/// The configuration is fixed once a dashboard has been built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub validation: bool,
    pub min_loss: Option<f64>,
    pub max_loss: Option<f64>,
    pub metrics: Vec<String>,
    pub min_metric_bounds: BTreeMap<String, f64>,
    pub max_metric_bounds: BTreeMap<String, f64>,
    pub batch_step: usize,
    pub palette: Palette,
    pub highlight: HighlightColors,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            validation: false,
            min_loss: None,
            max_loss: None,
            metrics: Vec::new(),
            min_metric_bounds: BTreeMap::new(),
            max_metric_bounds: BTreeMap::new(),
            batch_step: 10,
            palette: Palette::default(),
            highlight: HighlightColors::default(),
        }
    }
}

impl RunConfig {
    /// No validation, no metrics, auto-scaled axes, `batch_step = 10`.
    pub fn new() -> Self {
        RunConfig::default()
    }

    pub fn with_validation(mut self, validation: bool) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_loss_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_loss = min;
        self.max_loss = max;
        self
    }

    /// Appends a metric, optionally pinning its y-axis bounds.
    pub fn with_metric(mut self, name: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        let name = name.into();
        if let Some(min) = min {
            self.min_metric_bounds.insert(name.clone(), min);
        }
        if let Some(max) = max {
            self.max_metric_bounds.insert(name.clone(), max);
        }
        self.metrics.push(name);
        self
    }

    pub fn with_batch_step(mut self, batch_step: usize) -> Self {
        self.batch_step = batch_step;
        self
    }

    /// The metric mirrored on the live chart, if any.
    pub fn first_metric(&self) -> Option<&str> {
        self.metrics.first().map(String::as_str)
    }

    pub fn min_metric(&self, metric: &str) -> Option<f64> {
        self.min_metric_bounds.get(metric).copied()
    }

    pub fn max_metric(&self, metric: &str) -> Option<f64> {
        self.max_metric_bounds.get(metric).copied()
    }

    /// Checks every constraint the dashboard relies on.
    pub fn validate(&self) -> Result<()> {
        if self.batch_step == 0 {
            return Err(invalid("batch_step must be at least 1"));
        }

        check_bounds("loss", self.min_loss, self.max_loss)?;

        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if metric.is_empty() {
                return Err(invalid("metric names must not be empty"));
            }
            if metric == "loss" || metric.starts_with("val_") {
                return Err(invalid(format!(
                    "metric `{}` collides with a reserved log key",
                    metric
                )));
            }
            if !seen.insert(metric.as_str()) {
                return Err(invalid(format!("metric `{}` is listed twice", metric)));
            }
        }

        for key in self.min_metric_bounds.keys().chain(self.max_metric_bounds.keys()) {
            if !seen.contains(key.as_str()) {
                return Err(invalid(format!(
                    "bound given for `{}`, which is not a configured metric",
                    key
                )));
            }
        }

        for metric in &self.metrics {
            check_bounds(metric, self.min_metric(metric), self.max_metric(metric))?;
        }

        Ok(())
    }

    /// Serializes the configuration to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads a configuration written by `save_json` (or by hand) and
    /// validates it before returning.
    pub fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: RunConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

fn invalid(reason: impl Into<String>) -> DashboardError {
    DashboardError::InvalidConfiguration(reason.into())
}

fn check_bounds(name: &str, min: Option<f64>, max: Option<f64>) -> Result<()> {
    for bound in [min, max].into_iter().flatten() {
        if !bound.is_finite() {
            return Err(invalid(format!("bound for `{}` must be finite", name)));
        }
    }
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(invalid(format!(
                "minimum {} exceeds maximum {} for `{}`",
                lo, hi, name
            )));
        }
    }
    Ok(())
}
