use serde::{Serialize, Deserialize};

use crate::logs::MetricValues;

/// Training or validation side of a tracked quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Train,
    Validation,
}

impl Split {
    /// Column / log key for `name` on this side (`accuracy`, `val_accuracy`).
    pub fn key(self, name: &str) -> String {
        match self {
            Split::Train      => name.to_owned(),
            Split::Validation => format!("val_{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub name: String,
    pub train: Vec<f64>,
    /// Empty unless validation is configured.
    pub val: Vec<f64>,
}

/// Per-epoch values of every configured metric, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsHistory {
    series: Vec<MetricSeries>,
}

impl MetricsHistory {
    pub fn new(metrics: &[String]) -> Self {
        MetricsHistory {
            series: metrics.iter()
                .map(|name| MetricSeries { name: name.clone(), train: Vec::new(), val: Vec::new() })
                .collect(),
        }
    }

    /// Appends one epoch. `values` is parallel to the configured metrics.
    pub fn record(&mut self, values: &[MetricValues]) {
        debug_assert_eq!(values.len(), self.series.len());
        for (series, v) in self.series.iter_mut().zip(values) {
            series.train.push(v.train);
            if let Some(val) = v.val {
                series.val.push(val);
            }
        }
    }

    pub fn get(&self, name: &str, split: Split) -> Option<&[f64]> {
        self.series.iter()
            .find(|s| s.name == name)
            .map(|s| match split {
                Split::Train      => s.train.as_slice(),
                Split::Validation => s.val.as_slice(),
            })
    }

    pub fn series(&self) -> &[MetricSeries] {
        &self.series
    }
}
