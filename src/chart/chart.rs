use serde::{Serialize, Deserialize};

use crate::chart::axis::Axis;
use crate::chart::line::Line;

/// A line chart: one shared x axis, one or more y axes, and lines that each
/// plot against the shared x-series and one of the y axes.
///
/// Charts are built once by the factory functions and afterwards only their
/// data and title change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_axis: Axis,
    /// Shared x-series; every line has exactly one y value per entry once a
    /// point has been fully appended.
    pub x: Vec<usize>,
    pub y_axes: Vec<Axis>,
    pub lines: Vec<Line>,
}

impl Chart {
    /// Appends one point: `x` to the shared series and `ys[i]` to line `i`.
    ///
    /// # Panics
    /// Panics if `ys` does not supply exactly one value per line.
    pub fn push_point(&mut self, x: usize, ys: &[f64]) {
        assert_eq!(ys.len(), self.lines.len(), "one y value per line is required");
        self.x.push(x);
        for (line, &y) in self.lines.iter_mut().zip(ys) {
            line.y.push(y);
        }
    }

    /// Empties the shared x-series and every line, keeping axes and title.
    pub fn clear(&mut self) {
        self.x.clear();
        for line in &mut self.lines {
            line.y.clear();
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn line(&self, label: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.label == label)
    }

    /// All y values plotted against the given axis.
    pub fn values_on_axis(&self, axis: usize) -> Vec<f64> {
        self.lines.iter()
            .filter(|l| l.y_axis == axis)
            .flat_map(|l| l.y.iter().copied())
            .collect()
    }
}

/// Addresses one chart inside a `ChartSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum ChartSlot {
    Live,
    Loss,
    Metric(usize),
}

impl ChartSlot {
    /// Stable DOM id used by the HTML renderers.
    pub fn dom_id(self) -> String {
        match self {
            ChartSlot::Live      => "chart-live".into(),
            ChartSlot::Loss      => "chart-loss".into(),
            ChartSlot::Metric(i) => format!("chart-metric-{}", i),
        }
    }
}

/// Every chart a dashboard owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub live: Chart,
    pub loss: Chart,
    /// One per configured metric, in configuration order.
    pub metrics: Vec<Chart>,
}

impl ChartSet {
    pub fn get(&self, slot: ChartSlot) -> Option<&Chart> {
        match slot {
            ChartSlot::Live      => Some(&self.live),
            ChartSlot::Loss      => Some(&self.loss),
            ChartSlot::Metric(i) => self.metrics.get(i),
        }
    }

    /// Swaps in a new version of the chart at `slot`. Unknown metric slots
    /// are ignored.
    pub fn replace(&mut self, slot: ChartSlot, chart: Chart) {
        match slot {
            ChartSlot::Live      => self.live = chart,
            ChartSlot::Loss      => self.loss = chart,
            ChartSlot::Metric(i) => {
                if let Some(c) = self.metrics.get_mut(i) {
                    *c = chart;
                }
            }
        }
    }

    /// The loss chart followed by every metric chart.
    pub fn cross_epoch(&self) -> impl Iterator<Item = (ChartSlot, &Chart)> {
        std::iter::once((ChartSlot::Loss, &self.loss))
            .chain(self.metrics.iter().enumerate().map(|(i, c)| (ChartSlot::Metric(i), c)))
    }
}
