use serde::{Serialize, Deserialize};

/// One plotted series. Its x values are the owning chart's shared x-series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub label: String,
    pub color: String,
    /// Index into the owning chart's `y_axes`.
    pub y_axis: usize,
    pub y: Vec<f64>,
}

impl Line {
    pub fn new(label: impl Into<String>, color: impl Into<String>, y_axis: usize) -> Line {
        Line { label: label.into(), color: color.into(), y_axis, y: Vec::new() }
    }
}
